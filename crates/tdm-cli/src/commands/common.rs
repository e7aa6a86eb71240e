//! Shared helpers for CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use tdm_hal::DeviceSpec;
use tdm_program::{ProgramDescription, TdmProgram};

use crate::config::Config;

/// Serialization format of an input file, from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Yaml,
}

fn read_input(path: &str) -> Result<(String, FileFormat)> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    let ext = path_obj.extension().and_then(|e| e.to_str()).unwrap_or("");
    let format = match ext.to_lowercase().as_str() {
        "json" => FileFormat::Json,
        "yaml" | "yml" => FileFormat::Yaml,
        other => anyhow::bail!("Unsupported file extension '{other}' for {path}; use .json, .yaml or .yml"),
    };
    Ok((source, format))
}

/// Load a program description and build it.
pub fn load_program(path: &str) -> Result<TdmProgram> {
    let (source, format) = read_input(path)?;
    let description = match format {
        FileFormat::Json => ProgramDescription::from_json(&source),
        FileFormat::Yaml => ProgramDescription::from_yaml(&source),
    }
    .with_context(|| format!("Invalid program description: {path}"))?;

    description
        .build()
        .with_context(|| format!("Failed to build program from {path}"))
}

/// Load and validate a device spec.
pub fn load_device(path: &str) -> Result<DeviceSpec> {
    let (source, format) = read_input(path)?;
    match format {
        FileFormat::Json => DeviceSpec::from_json(&source),
        FileFormat::Yaml => DeviceSpec::from_yaml(&source),
    }
    .with_context(|| format!("Invalid device spec: {path}"))
}

/// Device spec path from the command line, falling back to the config.
pub fn resolve_device(device: Option<&str>, config: &Config) -> Result<PathBuf> {
    device
        .map(PathBuf::from)
        .or_else(|| config.device.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("No device spec given; pass --device or set TDM_DEVICE")
        })
}

/// Pretty JSON for `value`.
pub fn to_json(value: &impl Serialize) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

/// Write `contents` to `path`.
pub fn write_file(path: &str, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write file: {path}"))
}
