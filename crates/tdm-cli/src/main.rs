//! tdm command-line interface
//!
//! Builds time-domain programs from JSON or YAML descriptions, prints their
//! rolled or unrolled circuits, checks them against device specs and
//! reshapes raw per-register samples back into logical channels.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{check, common, info, reshape, unroll, version};
use config::{Config, OutputFormat};

/// tdm - time-domain multiplexed photonic program toolkit
#[derive(Parser)]
#[command(name = "tdm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to ~/.config/tdm/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format, overriding the config file
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a program and print its unrolled circuit
    Unroll {
        /// Program description (JSON or YAML)
        #[arg(short, long)]
        input: String,

        /// Write the circuit as JSON to this file
        #[arg(short, long)]
        output: Option<String>,

        /// Print the rolled circuit instead
        #[arg(long)]
        rolled: bool,
    },

    /// Check a program against a device spec
    Check {
        /// Program description (JSON or YAML)
        #[arg(short, long)]
        input: String,

        /// Device spec (JSON or YAML); defaults to the configured device
        #[arg(short, long)]
        device: Option<String>,
    },

    /// Reshape raw per-register samples into logical channels
    Reshape {
        /// Program description (JSON or YAML)
        #[arg(short, long)]
        input: String,

        /// Raw samples: JSON object mapping register index to outcomes
        #[arg(short, long)]
        samples: String,

        /// Write the reshaped samples as JSON to this file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show a program summary and its parameter table
    Info {
        /// Program description (JSON or YAML)
        #[arg(short, long)]
        input: String,
    },

    /// Show version information
    Version,
}

fn log_filter(verbose: u8, config: &Config) -> String {
    match verbose {
        0 => config.log_level.clone(),
        1 => "info".into(),
        2 => "debug".into(),
        _ => "trace".into(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter(cli.verbose, &config)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = cli.format.unwrap_or(config.format);

    // Execute command
    let result = match cli.command {
        Commands::Unroll {
            input,
            output,
            rolled,
        } => unroll::execute(&input, output.as_deref(), rolled, format),

        Commands::Check { input, device } => {
            common::resolve_device(device.as_deref(), &config).and_then(|path| {
                check::execute(&input, &path.to_string_lossy(), format)
            })
        }

        Commands::Reshape {
            input,
            samples,
            output,
        } => reshape::execute(&input, &samples, output.as_deref(), format),

        Commands::Info { input } => info::execute(&input, format),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
