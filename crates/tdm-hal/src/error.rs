//! Error types for the HAL crate.

use tdm_ir::IrError;
use thiserror::Error;

/// Errors that can occur while loading or validating a device spec.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Device spec is structurally invalid.
    #[error("Invalid device spec: {0}")]
    InvalidDeviceSpec(String),

    /// A parameter range is malformed.
    #[error("Invalid range for parameter '{name}': {reason}")]
    InvalidRange {
        /// Argument name in `gate_parameters`.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Layout refers to an operation or mode count the IR rejects.
    #[error("Invalid layout operation: {0}")]
    Ir(#[from] IrError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
