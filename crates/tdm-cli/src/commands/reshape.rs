//! Reshape command implementation.

use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result};
use console::style;

use tdm_ir::ModeId;

use super::common::{load_program, to_json, write_file};
use crate::config::OutputFormat;

/// Load raw outcomes: a JSON object mapping register index to outcomes.
fn load_samples(path: &str) -> Result<BTreeMap<ModeId, Vec<f64>>> {
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    let raw: BTreeMap<u32, Vec<f64>> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid samples file: {path}"))?;
    Ok(raw.into_iter().map(|(k, v)| (ModeId(k), v)).collect())
}

/// Execute the reshape command.
pub fn execute(
    input: &str,
    samples: &str,
    output: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let program = load_program(input)?;
    let raw = load_samples(samples)?;
    let recorded: usize = raw.values().map(Vec::len).sum();

    let reshaped = program.reshape_samples(raw)?;

    if let Some(path) = output {
        write_file(path, &to_json(&reshaped)?)?;
        if format == OutputFormat::Text {
            println!(
                "{} Reshaped {} outcomes into {} channels: {}",
                style("✓").green().bold(),
                reshaped.total(),
                reshaped.num_channels(),
                style(path).green()
            );
        }
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", to_json(&reshaped)?),
        OutputFormat::Text => {
            println!(
                "{} Reshaped {} of {} recorded outcomes",
                style("→").cyan().bold(),
                reshaped.total(),
                recorded
            );
            for (index, channel) in reshaped.iter().enumerate() {
                let values: Vec<String> = channel.values.iter().map(f64::to_string).collect();
                println!(
                    "  channel {index} ({}): [{}]",
                    style(channel.register).yellow(),
                    values.join(", ")
                );
            }
        }
    }
    Ok(())
}
