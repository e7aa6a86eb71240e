//! Layout conformance passes.

use tracing::debug;

use tdm_program::TdmProgram;

use super::{device, layout, rolled};
use crate::error::{CompileError, CompileResult};
use crate::pass::Pass;
use crate::property::PropertySet;

/// Analysis pass checking that the rolled circuit's operation names equal
/// the layout's, in order.
pub struct GateSequenceCheck;

impl Pass for GateSequenceCheck {
    fn name(&self) -> &'static str {
        "gate_sequence_check"
    }

    fn should_run(&self, _program: &TdmProgram, properties: &PropertySet) -> bool {
        layout(properties).is_some()
    }

    fn run(&self, program: &TdmProgram, properties: &mut PropertySet) -> CompileResult<()> {
        let circuit = rolled(program)?;
        let device = device(properties)?;
        let Some(layout) = device.layout.as_ref() else {
            return Ok(());
        };

        let program_ops = circuit.op_names();
        let device_ops = layout.op_names();
        if program_ops != device_ops {
            return Err(CompileError::TopologyMismatch {
                target: device.target.clone(),
                program: program_ops.into_iter().map(String::from).collect(),
                device: device_ops.into_iter().map(String::from).collect(),
            });
        }

        debug!(operations = program_ops.len(), "Gate sequence matches layout");
        properties.report.operations_checked = program_ops.len();
        properties.report.layout_checked = true;
        Ok(())
    }
}

/// Analysis pass checking that every command acts on the modes the layout
/// declares for its position.
pub struct ModeWiringCheck;

impl Pass for ModeWiringCheck {
    fn name(&self) -> &'static str {
        "mode_wiring_check"
    }

    fn should_run(&self, _program: &TdmProgram, properties: &PropertySet) -> bool {
        layout(properties).is_some()
    }

    fn run(&self, program: &TdmProgram, properties: &mut PropertySet) -> CompileResult<()> {
        let circuit = rolled(program)?;
        let device = device(properties)?;
        let Some(layout) = device.layout.as_ref() else {
            return Ok(());
        };

        if circuit.len() != layout.operations.len() {
            return Err(CompileError::TopologyMismatch {
                target: device.target.clone(),
                program: circuit.op_names().into_iter().map(String::from).collect(),
                device: layout.op_names().into_iter().map(String::from).collect(),
            });
        }

        for (position, (cmd, entry)) in circuit.iter().zip(&layout.operations).enumerate() {
            let modes: Vec<u32> = cmd.modes().iter().map(|m| m.0).collect();
            if modes != entry.modes {
                return Err(CompileError::ModeOrderingMismatch {
                    target: device.target.clone(),
                    position,
                    program: modes,
                    device: entry.modes.clone(),
                });
            }
        }

        debug!(operations = circuit.len(), "Mode wiring matches layout");
        Ok(())
    }
}
