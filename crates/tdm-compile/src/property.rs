//! Property set shared between compilation passes.

use serde::Serialize;
use std::fmt;

use tdm_hal::DeviceSpec;

/// Properties passed between compilation passes.
#[derive(Debug, Clone, Default)]
pub struct PropertySet {
    /// Device the program is compiled for.
    pub device: Option<DeviceSpec>,
    /// What the passes have verified so far.
    pub report: CompatibilityReport,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target device.
    pub fn with_device(mut self, device: DeviceSpec) -> Self {
        self.report.target.clone_from(&device.target);
        self.device = Some(device);
        self
    }
}

/// Summary of a successful device compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompatibilityReport {
    /// Device target name.
    pub target: String,
    /// Whether the capacity check ran.
    pub capacity_checked: bool,
    /// Whether the layout checks ran.
    pub layout_checked: bool,
    /// Rolled-circuit operations compared against the layout.
    pub operations_checked: usize,
    /// Concrete arguments checked against a range.
    pub concrete_values_checked: usize,
    /// Sequence values checked against a range.
    pub sequence_values_checked: usize,
}

impl fmt::Display for CompatibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "device:                  {}", self.target)?;
        writeln!(f, "capacity checked:        {}", self.capacity_checked)?;
        writeln!(f, "layout checked:          {}", self.layout_checked)?;
        writeln!(f, "operations checked:      {}", self.operations_checked)?;
        writeln!(f, "concrete values checked: {}", self.concrete_values_checked)?;
        write!(f, "sequence values checked: {}", self.sequence_values_checked)
    }
}
