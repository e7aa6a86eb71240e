//! Error types for the IR crate.

use crate::mode::ModeId;
use thiserror::Error;

/// Errors that can occur while building commands and circuits.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum IrError {
    /// Mode index is outside the register pool.
    #[error("Mode {mode} out of range for a pool of {pool_size} modes{}", format_op_context(.op_name))]
    ModeOutOfRange {
        /// The offending mode.
        mode: ModeId,
        /// Size of the register pool.
        pool_size: u32,
        /// Optional operation name for context.
        op_name: Option<String>,
    },

    /// Operation applied to the wrong number of modes.
    #[error("Operation '{op_name}' acts on {expected} mode(s), got {got}")]
    ModeCountMismatch {
        /// Name of the operation.
        op_name: String,
        /// Human readable expectation, e.g. `2` or `at least 1`.
        expected: String,
        /// Actual number of modes provided.
        got: usize,
    },

    /// Operation received more arguments than it accepts.
    #[error("Operation '{op_name}' takes at most {max} argument(s), got {got}")]
    ArgumentCountMismatch {
        /// Name of the operation.
        op_name: String,
        /// Maximum number of positional arguments.
        max: usize,
        /// Actual number of arguments provided.
        got: usize,
    },

    /// The same mode appears twice in one command.
    #[error("Duplicate mode {mode} in operation '{op_name}'")]
    DuplicateMode {
        /// The duplicated mode.
        mode: ModeId,
        /// Name of the operation.
        op_name: String,
    },

    /// Operation name is not recognised.
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    /// Band specification is empty or contains an empty band.
    #[error("Invalid band specification: {0}")]
    InvalidBandSpec(String),
}

#[allow(clippy::ref_option)]
fn format_op_context(op_name: &Option<String>) -> String {
    match op_name {
        Some(name) => format!(" (operation: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
