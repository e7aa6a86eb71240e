//! Device compatibility compilation
//!
//! Checks a constructed [`TdmProgram`] against a [`DeviceSpec`] without
//! modifying it. The checks run as passes in a [`PassManager`]:
//!
//! 1. [`ModeCapacityCheck`]: time bins, concurrent and spatial modes
//! 2. [`GateSequenceCheck`]: operation names match the layout in order
//! 3. [`ModeWiringCheck`]: each command acts on the layout's modes
//! 4. [`ParameterRangeCheck`]: arguments and sequences lie in their ranges
//!
//! The layout passes are skipped for devices that declare no layout.
//!
//! # Example
//!
//! ```rust
//! use tdm_compile::compile_for_device;
//! use tdm_hal::{DeviceLayout, DeviceSpec, LayoutOperation, ModeCapacity, ParameterRange};
//! use tdm_ir::BandSpec;
//! use tdm_program::{ShiftPolicy, TdmProgram};
//!
//! let device = DeviceSpec::new("tdm", ModeCapacity::new(2, 1, 100))
//!     .with_layout(DeviceLayout::new(vec![
//!         LayoutOperation::new("BSgate", [1, 0], ["p0"]),
//!         LayoutOperation::new("MeasureHomodyne", [0], ["p1"]),
//!     ]))
//!     .with_parameter("p0", ParameterRange::interval(0.0, 6.3))
//!     .with_parameter("p1", ParameterRange::point(0.0));
//!
//! let mut prog = TdmProgram::new(BandSpec::single(2).unwrap());
//! let mut b = prog.begin(vec![vec![0.5, 1.0]], 1, ShiftPolicy::Default).unwrap();
//! let theta = b.p(0).unwrap();
//! let (q0, q1) = (b.q(0), b.q(1));
//! b.bsgate(theta, 0.0, q1, q0).unwrap();
//! b.measure_homodyne(0.0, q0).unwrap();
//! prog.end(b).unwrap();
//!
//! let report = compile_for_device(&prog, &device).unwrap();
//! assert_eq!(report.operations_checked, 2);
//! ```

pub mod error;
pub mod manager;
pub mod pass;
pub mod passes;
pub mod property;

pub use error::{Capacity, CompileError, CompileResult};
pub use manager::{PassManager, PassManagerBuilder};
pub use pass::Pass;
pub use passes::{GateSequenceCheck, ModeCapacityCheck, ModeWiringCheck, ParameterRangeCheck};
pub use property::{CompatibilityReport, PropertySet};

use tdm_hal::DeviceSpec;
use tdm_program::{ProgramError, TdmProgram};
use tracing::{info, instrument};

/// Check `program` against `device`.
///
/// Returns what was verified, or the first incompatibility found.
#[instrument(skip_all, fields(program = program.name(), device = %device.target))]
pub fn compile_for_device(
    program: &TdmProgram,
    device: &DeviceSpec,
) -> CompileResult<CompatibilityReport> {
    if !program.is_built() {
        return Err(ProgramError::NotBuilt(program.name().to_string()).into());
    }
    device.validate()?;

    let (pm, mut properties) = PassManagerBuilder::new()
        .with_device(device.clone())
        .build();
    pm.run(program, &mut properties)?;

    info!("Program is compatible with device");
    Ok(properties.report)
}
