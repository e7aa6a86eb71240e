//! Info command implementation.

use std::collections::BTreeMap;

use anyhow::Result;
use console::style;
use serde::Serialize;

use tdm_ir::ModeId;
use tdm_program::TdmProgram;

use super::common::{load_program, to_json};
use crate::config::OutputFormat;

#[derive(Serialize)]
struct ProgramInfo<'a> {
    name: &'a str,
    bands: &'a [u32],
    concurrent_modes: u32,
    spatial_modes: usize,
    time_bins: usize,
    copies: usize,
    total_time_bins: usize,
    shift: String,
    measured_modes: &'a [ModeId],
    parameters: BTreeMap<String, Vec<f64>>,
}

impl<'a> ProgramInfo<'a> {
    fn new(program: &'a TdmProgram) -> Self {
        Self {
            name: program.name(),
            bands: program.bands().sizes(),
            concurrent_modes: program.concurrent_modes(),
            spatial_modes: program.spatial_modes(),
            time_bins: program.time_bins(),
            copies: program.copies(),
            total_time_bins: program.total_time_bins(),
            shift: program.shift().map(|s| s.to_string()).unwrap_or_default(),
            measured_modes: program.measured_modes(),
            parameters: program.parameters().map(|p| p.named()).unwrap_or_default(),
        }
    }
}

/// Execute the info command.
pub fn execute(input: &str, format: OutputFormat) -> Result<()> {
    let program = load_program(input)?;
    let info = ProgramInfo::new(&program);

    match format {
        OutputFormat::Json => println!("{}", to_json(&info)?),
        OutputFormat::Text => {
            println!("{}", style(&program).cyan().bold());
            println!("  Name:             {}", info.name);
            println!("  Bands:            {:?}", info.bands);
            println!("  Copies:           {}", info.copies);
            println!("  Total time bins:  {}", info.total_time_bins);
            println!("  Shift:            {}", info.shift);
            let measured: Vec<String> =
                info.measured_modes.iter().map(ToString::to_string).collect();
            println!("  Measured modes:   {}", measured.join(", "));
            println!("  Parameters:");
            for (name, values) in &info.parameters {
                let values: Vec<String> = values.iter().map(f64::to_string).collect();
                println!("    {}: [{}]", style(name).yellow(), values.join(", "));
            }
        }
    }
    Ok(())
}
