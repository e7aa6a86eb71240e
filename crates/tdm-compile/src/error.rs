//! Error types for the compilation crate.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Capacity dimension checked against the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capacity {
    /// Time bins per period.
    Temporal,
    /// Register pool size.
    Concurrent,
    /// Measurement channels.
    Spatial,
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capacity::Temporal => "temporal",
            Capacity::Concurrent => "concurrent",
            Capacity::Spatial => "spatial",
        })
    }
}

fn capacity_limit(quantity: Capacity, device: usize) -> String {
    match quantity {
        Capacity::Temporal => format!("only supports up to {device} modes"),
        Capacity::Concurrent | Capacity::Spatial => format!("requires exactly {device}"),
    }
}

/// Errors that can occur during device compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the program crate.
    #[error("Program error: {0}")]
    Program(#[from] tdm_program::ProgramError),

    /// Error from the HAL crate.
    #[error("Device error: {0}")]
    Hal(#[from] tdm_hal::HalError),

    /// No device spec was configured for the pass manager.
    #[error("Missing device spec for compilation")]
    MissingDevice,

    /// A declared mode count does not fit the device.
    #[error(
        "This program contains {program} {quantity} modes, but the device '{target}' {}",
        capacity_limit(*.quantity, *.device)
    )]
    CapacityExceeded {
        /// Offending quantity.
        quantity: Capacity,
        /// Program value.
        program: usize,
        /// Device value.
        device: usize,
        /// Device target name.
        target: String,
    },

    /// Gate sequence differs from the device layout.
    #[error(
        "Program cannot be used with the device '{target}' due to incompatible topology. \
         The gates or the order of gates used in the Program ({program:?}) do not match the layout ({device:?})"
    )]
    TopologyMismatch {
        /// Device target name.
        target: String,
        /// Program operation names.
        program: Vec<String>,
        /// Layout operation names.
        device: Vec<String>,
    },

    /// A command acts on different modes than the layout declares.
    #[error(
        "Program cannot be used with the device '{target}' due to incompatible mode ordering. \
         Operation {position} acts on {program:?}, layout expects {device:?}"
    )]
    ModeOrderingMismatch {
        /// Device target name.
        target: String,
        /// Position in the rolled circuit.
        position: usize,
        /// Program modes.
        program: Vec<u32>,
        /// Layout modes.
        device: Vec<u32>,
    },

    /// A concrete argument or a sequence value lies outside its allowed range.
    #[error(
        "Program cannot be used with the device '{target}' due to incompatible parameter. \
         {op_name} at position {position}: '{argument}' = {value} is outside {range}"
    )]
    ParameterOutOfRange {
        /// Device target name.
        target: String,
        /// Position in the rolled circuit.
        position: usize,
        /// Operation name.
        op_name: String,
        /// Argument name from the layout.
        argument: String,
        /// Offending value.
        value: f64,
        /// Allowed range, rendered.
        range: String,
    },

    /// An argument the layout does not declare is not zero.
    #[error(
        "Program cannot be used with the device '{target}' due to incompatible parameter. \
         {op_name} at position {position}: argument #{index} = {value} is not declared by the layout and must be 0"
    )]
    UndeclaredArgument {
        /// Device target name.
        target: String,
        /// Position in the rolled circuit.
        position: usize,
        /// Operation name.
        op_name: String,
        /// 0-based argument index.
        index: usize,
        /// Offending argument, rendered.
        value: String,
    },

    /// A layout argument name has no entry in `gate_parameters`.
    #[error(
        "Program cannot be used with the device '{target}' due to incompatible parameter. \
         Layout argument '{name}' has no allowed range"
    )]
    UnknownParameter {
        /// Device target name.
        target: String,
        /// Argument name.
        name: String,
    },
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
