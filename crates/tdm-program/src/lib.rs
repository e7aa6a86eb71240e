//! Time-domain multiplexed programs
//!
//! A time-domain program describes one period of a photonic circuit over a
//! small, fixed pool of registers. Each period is replayed once per time bin
//! with that bin's gate parameters, and the registers are shifted between
//! bins so that measured modes are replaced by fresh ones.
//!
//! # Core Components
//!
//! - **Construction**: [`TdmProgram::begin`] binds the parameter sequences and
//!   returns a [`TdmBuilder`]; [`TdmProgram::end`] validates the measurements
//!   and freezes the rolled circuit
//! - **Unrolling**: [`TdmProgram::unroll`] expands the rolled circuit over all
//!   time bins using the program's [`ShiftPolicy`]
//! - **Scheduling**: [`MeasurementSchedule`] lists which register every
//!   logical channel lands on, step by step
//! - **Reshaping**: [`TdmProgram::reshape_samples`] regroups raw outcomes by
//!   logical channel
//! - **Descriptions**: [`ProgramDescription`] loads a program from JSON or YAML

pub mod builder;
pub mod description;
pub mod error;
pub mod parameters;
pub mod program;
pub mod samples;
pub mod schedule;
pub mod shift;
pub mod unroll;

pub use builder::TdmBuilder;
pub use description::{BandsDescription, CommandDescription, ProgramDescription};
pub use error::{ProgramError, ProgramResult};
pub use parameters::ParameterTable;
pub use program::{CircuitView, TdmProgram};
pub use samples::{ChannelSamples, ReshapedSamples, reshape_samples};
pub use schedule::{MeasurementSchedule, ScheduledMeasurement, measurement_schedule};
pub use shift::{ModePermutation, ShiftPolicy};
pub use unroll::{UnrolledCircuit, unroll_circuit};
