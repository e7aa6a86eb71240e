//! Parameter range check.

use rustc_hash::FxHashSet;
use tracing::debug;

use tdm_hal::{DeviceSpec, ParameterRange};
use tdm_ir::{Argument, Command, PlaceholderId};
use tdm_program::{ProgramError, TdmProgram};

use super::{device, layout, rolled};
use crate::error::{CompileError, CompileResult};
use crate::pass::Pass;
use crate::property::PropertySet;

/// Analysis pass checking every argument against the device's allowed
/// ranges.
///
/// Arguments are matched to layout argument names by position. Concrete
/// values are checked directly; a placeholder is checked through every value
/// of its bound sequence. Arguments past the declared ones must be zero.
pub struct ParameterRangeCheck;

impl Pass for ParameterRangeCheck {
    fn name(&self) -> &'static str {
        "parameter_range_check"
    }

    fn should_run(&self, _program: &TdmProgram, properties: &PropertySet) -> bool {
        layout(properties).is_some()
    }

    fn run(&self, program: &TdmProgram, properties: &mut PropertySet) -> CompileResult<()> {
        let circuit = rolled(program)?;
        let parameters = program
            .parameters()
            .ok_or_else(|| ProgramError::NotBuilt(program.name().to_string()))?;
        let device = device(properties)?;
        let Some(layout) = device.layout.as_ref() else {
            return Ok(());
        };

        let mut concrete = 0;
        let mut sequence = 0;
        // A placeholder used twice under the same argument name is checked once.
        let mut seen: FxHashSet<(PlaceholderId, &str)> = FxHashSet::default();

        for (position, (cmd, entry)) in circuit.iter().zip(&layout.operations).enumerate() {
            let declared = entry.args.len();
            check_undeclared(device, position, cmd, declared)?;

            for (name, &arg) in entry.args.iter().zip(cmd.args()) {
                let range = device.range(name).ok_or_else(|| CompileError::UnknownParameter {
                    target: device.target.clone(),
                    name: name.clone(),
                })?;
                let out_of_range = |value: f64| CompileError::ParameterOutOfRange {
                    target: device.target.clone(),
                    position,
                    op_name: cmd.name().to_string(),
                    argument: name.clone(),
                    value,
                    range: range.to_string(),
                };

                match arg {
                    Argument::Concrete(value) => {
                        if !range.contains(value) {
                            return Err(out_of_range(value));
                        }
                        concrete += 1;
                    }
                    Argument::Symbolic(id) => {
                        if !seen.insert((id, name.as_str())) {
                            continue;
                        }
                        let values = parameters.sequence(id)?;
                        if let Some(&value) = first_outside(range, values) {
                            return Err(out_of_range(value));
                        }
                        sequence += values.len();
                    }
                }
            }
        }

        debug!(concrete, sequence, "Parameters within device ranges");
        properties.report.concrete_values_checked = concrete;
        properties.report.sequence_values_checked = sequence;
        Ok(())
    }
}

fn first_outside<'a>(range: &ParameterRange, values: &'a [f64]) -> Option<&'a f64> {
    values.iter().find(|&&v| !range.contains(v))
}

fn check_undeclared(
    device: &DeviceSpec,
    position: usize,
    cmd: &Command,
    declared: usize,
) -> CompileResult<()> {
    for (index, arg) in cmd.args().iter().enumerate().skip(declared) {
        if !arg.is_zero() {
            return Err(CompileError::UndeclaredArgument {
                target: device.target.clone(),
                position,
                op_name: cmd.name().to_string(),
                index,
                value: arg.to_string(),
            });
        }
    }
    Ok(())
}
