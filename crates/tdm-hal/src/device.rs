//! Device specifications.
//!
//! A device spec describes what a time-domain photonic device can run: the
//! exact sequence of operations one period must consist of (the layout), the
//! allowed values of every named gate parameter, and how many temporal,
//! concurrent and spatial modes the hardware supports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use tdm_ir::{IrError, Operation};

use crate::error::{HalError, HalResult};
use crate::range::ParameterRange;

/// One operation slot of a device layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOperation {
    /// Operation name, e.g. `BSgate`.
    pub op: String,
    /// Target modes, in order.
    pub modes: Vec<u32>,
    /// Names of the declared arguments, looked up in `gate_parameters`.
    #[serde(default)]
    pub args: Vec<String>,
}

impl LayoutOperation {
    /// Create a layout operation.
    pub fn new(
        op: impl Into<String>,
        modes: impl Into<Vec<u32>>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            op: op.into(),
            modes: modes.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse the operation name.
    pub fn operation(&self) -> HalResult<Operation> {
        Ok(self.op.parse()?)
    }
}

/// Ordered operations of one period.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceLayout {
    /// Operations in program order.
    pub operations: Vec<LayoutOperation>,
}

impl DeviceLayout {
    /// Create a layout.
    pub fn new(operations: Vec<LayoutOperation>) -> Self {
        Self { operations }
    }

    /// Operation names in order.
    pub fn op_names(&self) -> Vec<&str> {
        self.operations.iter().map(|op| op.op.as_str()).collect()
    }
}

/// Temporal mode limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalCapacity {
    /// Maximum number of time bins per period.
    pub max: usize,
}

/// Declared mode capacities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeCapacity {
    /// Concurrent modes (register pool size).
    pub concurrent: u32,
    /// Spatial modes (measurement channels).
    pub spatial: usize,
    /// Temporal mode limit.
    pub temporal: TemporalCapacity,
}

impl ModeCapacity {
    /// Create a capacity descriptor.
    pub fn new(concurrent: u32, spatial: usize, temporal_max: usize) -> Self {
        Self {
            concurrent,
            spatial,
            temporal: TemporalCapacity { max: temporal_max },
        }
    }
}

/// Hardware description of a time-domain device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSpec {
    /// Device target name.
    pub target: String,
    /// Required operation sequence. Devices without a layout only get the
    /// capacity check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<DeviceLayout>,
    /// Allowed values per argument name.
    #[serde(default)]
    pub gate_parameters: BTreeMap<String, ParameterRange>,
    /// Declared capacities.
    pub modes: ModeCapacity,
    /// Compilers the device accepts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compiler: Vec<String>,
}

impl DeviceSpec {
    /// Create a device spec without layout or parameter ranges.
    pub fn new(target: impl Into<String>, modes: ModeCapacity) -> Self {
        Self {
            target: target.into(),
            layout: None,
            gate_parameters: BTreeMap::new(),
            modes,
            compiler: Vec::new(),
        }
    }

    /// Set the layout.
    pub fn with_layout(mut self, layout: DeviceLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Add an allowed range for an argument name.
    pub fn with_parameter(mut self, name: impl Into<String>, range: ParameterRange) -> Self {
        self.gate_parameters.insert(name.into(), range);
        self
    }

    /// Parse and validate a JSON device spec.
    pub fn from_json(json: &str) -> HalResult<Self> {
        let spec: Self = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Parse and validate a YAML device spec.
    pub fn from_yaml(yaml: &str) -> HalResult<Self> {
        let spec: Self = serde_yaml_ng::from_str(yaml)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> HalResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Range for an argument name.
    pub fn range(&self, name: &str) -> Option<&ParameterRange> {
        self.gate_parameters.get(name)
    }

    /// Check the spec is self-consistent.
    ///
    /// Layout operations with a known name must have a valid mode count and
    /// argument count, and every parameter range must admit at least one
    /// value. Unknown operation names are left for the gate-sequence check,
    /// where no program can match them.
    pub fn validate(&self) -> HalResult<()> {
        if self.target.trim().is_empty() {
            return Err(HalError::InvalidDeviceSpec("target name is empty".into()));
        }
        if self.modes.concurrent == 0 || self.modes.spatial == 0 {
            return Err(HalError::InvalidDeviceSpec(format!(
                "device '{}' declares no concurrent or spatial modes",
                self.target
            )));
        }

        if let Some(layout) = &self.layout {
            for (pos, entry) in layout.operations.iter().enumerate() {
                let Ok(op) = entry.operation() else {
                    debug!(position = pos, op = %entry.op, "Layout operation has no program equivalent");
                    continue;
                };
                if !op.arity().accepts(entry.modes.len()) {
                    return Err(IrError::ModeCountMismatch {
                        op_name: op.name().to_string(),
                        expected: op.arity().to_string(),
                        got: entry.modes.len(),
                    }
                    .into());
                }
                if entry.args.len() > op.num_args() {
                    return Err(HalError::InvalidDeviceSpec(format!(
                        "layout position {pos}: '{}' declares {} arguments but takes at most {}",
                        entry.op,
                        entry.args.len(),
                        op.num_args()
                    )));
                }
            }
        }

        for (name, range) in &self.gate_parameters {
            if let Some(reason) = range.defect() {
                return Err(HalError::InvalidRange {
                    name: name.clone(),
                    reason,
                });
            }
        }

        debug!(
            device = %self.target,
            operations = self.layout.as_ref().map_or(0, |l| l.operations.len()),
            parameters = self.gate_parameters.len(),
            "Validated device spec"
        );
        Ok(())
    }
}
