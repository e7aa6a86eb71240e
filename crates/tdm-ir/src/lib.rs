//! Time-domain circuit intermediate representation
//!
//! This crate provides the data structures shared by the time-domain
//! toolchain: register identifiers, command arguments, photonic operations,
//! commands, circuits and the spatial band specification.
//!
//! # Core Components
//!
//! - **Modes**: [`ModeId`] addresses one slot of a program's register pool
//! - **Arguments**: [`Argument`] is either a concrete value or a symbolic
//!   placeholder ([`PlaceholderId`]) resolved per time bin
//! - **Operations**: [`Operation`] lists the supported gates and measurements
//! - **Commands**: [`Command`] combines an operation with modes and arguments
//! - **Circuits**: [`Circuit`] is an ordered command sequence
//! - **Bands**: [`BandSpec`] partitions the register pool into spatial bands
//!
//! # Example
//!
//! ```rust
//! use tdm_ir::{Argument, BandSpec, Circuit, Command, ModeId, Operation};
//!
//! let bands = BandSpec::new(vec![1, 2]).unwrap();
//! assert_eq!(bands.slices(), vec![0..1, 1..3]);
//!
//! let mut circuit = Circuit::new();
//! circuit.push(Command::new(Operation::Sgate, [ModeId(0)], [Argument::from(0.5)]).unwrap());
//! circuit.push(
//!     Command::new(Operation::MeasureHomodyne, [ModeId(0)], [Argument::symbolic(0)]).unwrap(),
//! );
//! assert_eq!(circuit.num_measured_modes(), 1);
//! ```

pub mod argument;
pub mod band;
pub mod circuit;
pub mod command;
pub mod error;
pub mod mode;
pub mod operation;

pub use argument::{Argument, PlaceholderId};
pub use band::BandSpec;
pub use circuit::Circuit;
pub use command::Command;
pub use error::{IrError, IrResult};
pub use mode::{ModeId, register_pool};
pub use operation::{ModeArity, Operation};
