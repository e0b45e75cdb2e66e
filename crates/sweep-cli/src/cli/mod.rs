//! CLI for the sweep resource sweeper.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sweep_core::config;

use commands::{run_base64, run_json_eq, run_list, run_sweep, run_validate_duration};

/// Top-level CLI for sweep.
#[derive(Debug, Parser)]
#[command(name = "sweep")]
#[command(about = "sweep: delete leftover cloud resources with bounded retries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List registered sweepers and their dependencies.
    List,

    /// Run sweepers against a region inventory file.
    Run {
        /// Inventory TOML describing the resources present per region.
        #[arg(long, value_name = "FILE")]
        inventory: PathBuf,
        /// Region to sweep (repeatable). Defaults to the regions in config.toml.
        #[arg(long = "region", value_name = "REGION")]
        regions: Vec<String>,
        /// Only run these sweepers (plus their dependencies). Repeatable.
        #[arg(long = "sweeper", value_name = "NAME")]
        sweepers: Vec<String>,
    },

    /// Check that a value parses as a non-negative duration (e.g. 10m, 1h30m).
    ValidateDuration {
        value: String,
        /// Setting name used in messages.
        #[arg(long, default_value = "duration")]
        key: String,
    },

    /// Compare two JSON files structurally; exits non-zero if they differ.
    JsonEq { a: PathBuf, b: PathBuf },

    /// Base64-encode a value unless it is already base64.
    Base64 { input: String },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::List => run_list(&cfg)?,
            CliCommand::Run {
                inventory,
                regions,
                sweepers,
            } => run_sweep(&cfg, &inventory, &regions, &sweepers)?,
            CliCommand::ValidateDuration { value, key } => run_validate_duration(&value, &key)?,
            CliCommand::JsonEq { a, b } => run_json_eq(&a, &b)?,
            CliCommand::Base64 { input } => run_base64(&input),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
