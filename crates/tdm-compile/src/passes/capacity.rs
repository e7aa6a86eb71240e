//! Mode capacity check.

use tracing::debug;

use tdm_program::TdmProgram;

use super::{device, rolled};
use crate::error::{Capacity, CompileError, CompileResult};
use crate::pass::Pass;
use crate::property::PropertySet;

/// Analysis pass comparing the program's mode counts with the device.
///
/// Time bins may not exceed the temporal maximum. Concurrent and spatial
/// modes must match the device exactly. Runs whether or not the device
/// declares a layout.
pub struct ModeCapacityCheck;

impl Pass for ModeCapacityCheck {
    fn name(&self) -> &'static str {
        "mode_capacity_check"
    }

    fn run(&self, program: &TdmProgram, properties: &mut PropertySet) -> CompileResult<()> {
        rolled(program)?;
        let device = device(properties)?;
        let modes = device.modes;
        let exceeded = |quantity: Capacity, found: usize, limit: usize| {
            CompileError::CapacityExceeded {
                quantity,
                program: found,
                device: limit,
                target: device.target.clone(),
            }
        };

        if program.time_bins() > modes.temporal.max {
            return Err(exceeded(
                Capacity::Temporal,
                program.time_bins(),
                modes.temporal.max,
            ));
        }
        if program.concurrent_modes() != modes.concurrent {
            return Err(exceeded(
                Capacity::Concurrent,
                program.concurrent_modes() as usize,
                modes.concurrent as usize,
            ));
        }
        if program.spatial_modes() != modes.spatial {
            return Err(exceeded(
                Capacity::Spatial,
                program.spatial_modes(),
                modes.spatial,
            ));
        }

        debug!(
            time_bins = program.time_bins(),
            concurrent = modes.concurrent,
            spatial = modes.spatial,
            "Capacity fits device"
        );
        properties.report.capacity_checked = true;
        Ok(())
    }
}
