//! Photonic operation types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IrError;

/// How many modes an operation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArity {
    /// Exactly this many modes.
    Exactly(usize),
    /// At least this many modes.
    AtLeast(usize),
}

impl ModeArity {
    /// Check whether `n` modes satisfy this arity.
    pub fn accepts(self, n: usize) -> bool {
        match self {
            ModeArity::Exactly(k) => n == k,
            ModeArity::AtLeast(k) => n >= k,
        }
    }
}

impl fmt::Display for ModeArity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeArity::Exactly(k) => write!(f, "{k}"),
            ModeArity::AtLeast(k) => write!(f, "at least {k}"),
        }
    }
}

/// Operations that may appear in a time-domain program.
///
/// Names follow the device layout vocabulary, so [`Operation::name`] is what
/// the device compiler compares against a layout's operation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Single-mode squeezing `S(r, phi)`.
    Sgate,
    /// Displacement `D(r, phi)`.
    Dgate,
    /// Phase rotation `R(theta)`.
    Rgate,
    /// Beamsplitter `BS(theta, phi)`.
    BSgate,
    /// Mach-Zehnder interferometer `MZ(phi_in, phi_ex)`.
    MZgate,
    /// Two-mode squeezing `S2(r, phi)`.
    S2gate,
    /// Homodyne measurement at quadrature angle `phi`.
    MeasureHomodyne,
    /// Photon-number-resolving measurement.
    MeasureFock,
    /// Threshold (click / no-click) detection.
    MeasureThreshold,
}

impl Operation {
    /// All supported operations.
    pub const ALL: [Operation; 9] = [
        Operation::Sgate,
        Operation::Dgate,
        Operation::Rgate,
        Operation::BSgate,
        Operation::MZgate,
        Operation::S2gate,
        Operation::MeasureHomodyne,
        Operation::MeasureFock,
        Operation::MeasureThreshold,
    ];

    /// Get the name of this operation.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Operation::Sgate => "Sgate",
            Operation::Dgate => "Dgate",
            Operation::Rgate => "Rgate",
            Operation::BSgate => "BSgate",
            Operation::MZgate => "MZgate",
            Operation::S2gate => "S2gate",
            Operation::MeasureHomodyne => "MeasureHomodyne",
            Operation::MeasureFock => "MeasureFock",
            Operation::MeasureThreshold => "MeasureThreshold",
        }
    }

    /// Get the number of modes this operation acts on.
    pub fn arity(self) -> ModeArity {
        match self {
            Operation::Sgate | Operation::Dgate | Operation::Rgate => ModeArity::Exactly(1),
            Operation::BSgate | Operation::MZgate | Operation::S2gate => ModeArity::Exactly(2),
            Operation::MeasureHomodyne => ModeArity::Exactly(1),
            Operation::MeasureFock | Operation::MeasureThreshold => ModeArity::AtLeast(1),
        }
    }

    /// Number of positional arguments. Omitted trailing arguments default to zero.
    pub fn num_args(self) -> usize {
        match self {
            Operation::Sgate
            | Operation::Dgate
            | Operation::BSgate
            | Operation::MZgate
            | Operation::S2gate => 2,
            Operation::Rgate | Operation::MeasureHomodyne => 1,
            Operation::MeasureFock | Operation::MeasureThreshold => 0,
        }
    }

    /// Check if this operation is a measurement.
    pub fn is_measurement(self) -> bool {
        matches!(
            self,
            Operation::MeasureHomodyne | Operation::MeasureFock | Operation::MeasureThreshold
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| IrError::UnknownOperation(s.to_string()))
    }
}
