//! Built-in device compilation passes.
//!
//! Passes run in a fixed order: capacity first (it needs no layout), then the
//! layout passes which compare the rolled circuit against the device's
//! operation sequence.

mod capacity;
mod layout;
mod parameters;

pub use capacity::ModeCapacityCheck;
pub use layout::{GateSequenceCheck, ModeWiringCheck};
pub use parameters::ParameterRangeCheck;

use tdm_hal::{DeviceLayout, DeviceSpec};
use tdm_ir::Circuit;
use tdm_program::{ProgramError, TdmProgram};

use crate::error::{CompileError, CompileResult};
use crate::property::PropertySet;

fn device(properties: &PropertySet) -> CompileResult<&DeviceSpec> {
    properties.device.as_ref().ok_or(CompileError::MissingDevice)
}

fn rolled(program: &TdmProgram) -> CompileResult<&Circuit> {
    program
        .rolled_circuit()
        .ok_or_else(|| ProgramError::NotBuilt(program.name().to_string()).into())
}

fn layout(properties: &PropertySet) -> Option<&DeviceLayout> {
    properties.device.as_ref().and_then(|d| d.layout.as_ref())
}
