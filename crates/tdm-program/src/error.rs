//! Error types for the program crate.

use tdm_ir::{IrError, ModeId, PlaceholderId};
use thiserror::Error;

/// Errors produced while building, unrolling or reshaping a time-domain program.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgramError {
    /// Gate-parameter sequences differ in length.
    #[error("Gate-parameter lists must be of equal length, got lengths {lengths:?}")]
    StructuralMismatch {
        /// Length of every supplied sequence, in argument order.
        lengths: Vec<usize>,
    },

    /// No gate-parameter values were supplied at all.
    #[error("At least one non-empty gate-parameter list is required")]
    EmptyParameters,

    /// Repeat count is not a positive integer.
    #[error("Number of copies must be a positive integer, got {0}")]
    InvalidRepeatCount(i64),

    /// The rolled circuit contains no measurement.
    #[error("Must be at least one measurement")]
    MissingMeasurement,

    /// One measured register per spatial band is required.
    #[error(
        "Number of measurement operators ({measurements}) must match number of spatial modes ({bands})"
    )]
    MeasurementCountMismatch {
        /// Measured registers in the rolled circuit.
        measurements: usize,
        /// Spatial bands of the program.
        bands: usize,
    },

    /// `end` was handed a builder started over a different band spec.
    #[error("Builder was started for bands {builder:?}, but the program has bands {program:?}")]
    BandMismatch {
        /// Band sizes the builder was created with.
        builder: Vec<u32>,
        /// Band sizes of the program being finished.
        program: Vec<u32>,
    },

    /// A command refers to a placeholder with no bound sequence.
    #[error("Placeholder {placeholder} is not bound (program has {bound} parameter sequences)")]
    UnknownPlaceholder {
        /// The unbound placeholder.
        placeholder: PlaceholderId,
        /// Number of bound sequences.
        bound: usize,
    },

    /// `begin` called on a program whose rolled circuit is already frozen.
    #[error("Program '{0}' has already been constructed")]
    AlreadyBuilt(String),

    /// Roll, unroll or reshape requested before construction finished.
    #[error("Program '{0}' has no rolled circuit yet; finish construction first")]
    NotBuilt(String),

    /// Raw samples do not match the measurement schedule.
    #[error(
        "Sample data inconsistent with the measurement schedule: register {mode} asked for outcome #{requested} but only {recorded} were recorded"
    )]
    ReshapeInconsistency {
        /// Physical register whose outcomes ran out.
        mode: ModeId,
        /// 1-based index of the requested outcome.
        requested: usize,
        /// Outcomes recorded for the register.
        recorded: usize,
    },

    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// JSON program description could not be read.
    #[error("Invalid JSON program description: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML program description could not be read.
    #[error("Invalid YAML program description: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type for program operations.
pub type ProgramResult<T> = Result<T, ProgramError>;
