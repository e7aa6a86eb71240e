//! Unroll command implementation.

use anyhow::Result;
use console::style;

use super::common::{load_program, to_json, write_file};
use crate::config::OutputFormat;

/// Execute the unroll command.
pub fn execute(input: &str, output: Option<&str>, rolled: bool, format: OutputFormat) -> Result<()> {
    let mut program = load_program(input)?;
    if !rolled {
        program.unroll()?;
    }
    let Some(circuit) = program.circuit() else {
        anyhow::bail!("Program '{}' has no circuit", program.name());
    };

    if let Some(path) = output {
        write_file(path, &to_json(circuit)?)?;
        if format == OutputFormat::Text {
            println!(
                "{} Wrote {} commands to {}",
                style("✓").green().bold(),
                circuit.len(),
                style(path).green()
            );
        }
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", to_json(circuit)?),
        OutputFormat::Text => {
            println!(
                "{} {} ({} view, {} commands)",
                style("→").cyan().bold(),
                program,
                if rolled { "rolled" } else { "unrolled" },
                circuit.len()
            );
            print!("{circuit}");
        }
    }
    Ok(())
}
