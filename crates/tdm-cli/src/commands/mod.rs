//! CLI command implementations.

pub mod check;
pub mod common;
pub mod info;
pub mod reshape;
pub mod unroll;
pub mod version;
