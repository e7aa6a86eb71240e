//! Check command implementation.

use anyhow::Result;
use console::style;

use tdm_compile::compile_for_device;

use super::common::{load_device, load_program, to_json};
use crate::config::OutputFormat;

/// Execute the check command.
pub fn execute(input: &str, device: &str, format: OutputFormat) -> Result<()> {
    let program = load_program(input)?;
    let device = load_device(device)?;

    if format == OutputFormat::Text {
        println!(
            "{} Checking {} against device {}",
            style("→").cyan().bold(),
            style(program.name()).green(),
            style(&device.target).yellow()
        );
    }

    let report = compile_for_device(&program, &device)?;

    match format {
        OutputFormat::Json => println!("{}", to_json(&report)?),
        OutputFormat::Text => {
            println!("{} Program is compatible", style("✓").green().bold());
            for line in report.to_string().lines() {
                println!("  {line}");
            }
        }
    }
    Ok(())
}
