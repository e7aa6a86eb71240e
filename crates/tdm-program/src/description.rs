//! Serialized program descriptions.
//!
//! A description captures everything needed to drive
//! [`TdmProgram::begin`]/[`TdmProgram::end`] from a file:
//!
//! ```yaml
//! name: loop
//! bands: 2
//! parameters:
//!   - [1.0, 2.0]
//!   - [3.0, 4.0]
//! copies: 3
//! shift: default
//! commands:
//!   - { op: Sgate, modes: [1], args: [0.7, 0.0] }
//!   - { op: BSgate, modes: [0, 1], args: [{ param: 0 }] }
//!   - { op: MeasureHomodyne, modes: [0], args: [{ param: 1 }] }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use tdm_ir::{Argument, BandSpec, ModeId, Operation};

use crate::error::ProgramResult;
use crate::program::TdmProgram;
use crate::shift::ShiftPolicy;

/// One command of a description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDescription {
    /// Operation name, e.g. `BSgate`.
    pub op: String,
    /// Target registers.
    pub modes: Vec<u32>,
    /// Positional arguments: numbers or `{ param: i }`.
    #[serde(default)]
    pub args: Vec<Argument>,
}

/// Band spec as written in a file: a single integer or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BandsDescription {
    /// One band with this many concurrent modes.
    Single(u32),
    /// One entry per band.
    List(Vec<u32>),
}

impl BandsDescription {
    /// Validate into a [`BandSpec`].
    pub fn to_band_spec(&self) -> ProgramResult<BandSpec> {
        let spec = match self {
            BandsDescription::Single(n) => BandSpec::single(*n)?,
            BandsDescription::List(sizes) => BandSpec::new(sizes.clone())?,
        };
        Ok(spec)
    }
}

fn default_copies() -> i64 {
    1
}

/// A complete time-domain program description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDescription {
    /// Program name.
    #[serde(default)]
    pub name: Option<String>,
    /// Concurrent modes per spatial band.
    pub bands: BandsDescription,
    /// Parameter sequences bound to `p0, p1, ...`.
    pub parameters: Vec<Vec<f64>>,
    /// Number of period repetitions.
    #[serde(default = "default_copies")]
    pub copies: i64,
    /// Register shift policy.
    #[serde(default)]
    pub shift: ShiftPolicy,
    /// The rolled circuit.
    pub commands: Vec<CommandDescription>,
}

impl ProgramDescription {
    /// Parse a JSON description.
    pub fn from_json(json: &str) -> ProgramResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a YAML description.
    pub fn from_yaml(yaml: &str) -> ProgramResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Build and construct the described program.
    pub fn build(&self) -> ProgramResult<TdmProgram> {
        let bands = self.bands.to_band_spec()?;
        let mut program = TdmProgram::new(bands);
        if let Some(name) = &self.name {
            program = program.with_name(name.clone());
        }

        let mut builder = program.begin(self.parameters.clone(), self.copies, self.shift)?;
        for cmd in &self.commands {
            let op: Operation = cmd.op.parse()?;
            builder.append(
                op,
                cmd.modes.iter().copied().map(ModeId),
                cmd.args.iter().copied(),
            )?;
        }
        program.end(builder)?;

        debug!(program = program.name(), "Built program from description");
        Ok(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProgramError;
    use tdm_ir::IrError;

    const LOOP_YAML: &str = r#"
name: loop
bands: 2
parameters:
  - [1.0, 2.0]
  - [3.0, 4.0]
copies: 3
commands:
  - { op: Sgate, modes: [1], args: [0.7, 0.0] }
  - { op: BSgate, modes: [0, 1], args: [{ param: 0 }] }
  - { op: MeasureHomodyne, modes: [0], args: [{ param: 1 }] }
"#;

    #[test]
    fn test_yaml_build() {
        let desc = ProgramDescription::from_yaml(LOOP_YAML).unwrap();
        assert_eq!(desc.shift, ShiftPolicy::Default);
        let prog = desc.build().unwrap();
        assert_eq!(prog.name(), "loop");
        assert_eq!(prog.time_bins(), 2);
        assert_eq!(prog.total_time_bins(), 6);
        assert_eq!(prog.rolled_circuit().map(|c| c.len()), Some(3));
    }

    #[test]
    fn test_json_band_list_and_shift() {
        let json = r#"{
            "bands": [1, 2],
            "parameters": [[0.5]],
            "shift": 1,
            "commands": [
                {"op": "MeasureHomodyne", "modes": [0], "args": [{"param": 0}]},
                {"op": "MeasureFock", "modes": [1]}
            ]
        }"#;
        let prog = ProgramDescription::from_json(json).unwrap().build().unwrap();
        assert_eq!(prog.spatial_modes(), 2);
        assert_eq!(prog.shift(), Some(ShiftPolicy::By(1)));
        assert_eq!(prog.copies(), 1);
    }

    #[test]
    fn test_unknown_operation() {
        let json = r#"{"bands": 1, "parameters": [[0.5]],
            "commands": [{"op": "Kgate", "modes": [0]}]}"#;
        let err = ProgramDescription::from_json(json).unwrap().build().unwrap_err();
        assert!(matches!(err, ProgramError::Ir(IrError::UnknownOperation(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ProgramDescription::from_json("{"),
            Err(ProgramError::Json(_))
        ));
    }
}
