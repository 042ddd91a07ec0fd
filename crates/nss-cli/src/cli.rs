//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::commands::{CalibrateArgs, ConfigArgs, EvaluateArgs, PlotArgs};

/// NSS - Nelson-Siegel and Svensson yield curve toolkit
#[derive(Parser)]
#[command(name = "nss")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format [default: json, or the configured format]
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress informational messages on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file [default: <config dir>/nss/config.toml]
    #[arg(long, global = true, env = "NSS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Fit a curve to observed zero rates
    Calibrate(CalibrateArgs),

    /// Evaluate a curve at the given maturities
    Evaluate(EvaluateArgs),

    /// Plot zero curves to an SVG file
    Plot(PlotArgs),

    /// Manage the settings file
    Config(ConfigArgs),
}

/// Output format options
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Compact JSON, suitable for piping
    #[default]
    Json,
    /// Human-readable table
    Table,
    /// CSV with a header row
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["nss"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.format.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "nss", "evaluate", "-c", r#"{"beta0":0.04,"beta1":-0.02,"beta2":0.01,"tau":2.0}"#,
            "-t", "[1]", "--format", "table", "-q",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Table));
        assert!(cli.quiet);
    }
}
