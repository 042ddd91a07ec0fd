//! NSS CLI - calibrate, evaluate and plot Nelson-Siegel yield curves.
//!
//! # Usage
//!
//! ```bash
//! # Fit a Svensson curve to observed zero rates
//! nss calibrate -t "[0.5, 1, 2, 5, 10, 30]" -y "[0.011, 0.013, 0.017, 0.024, 0.031, 0.036]"
//!
//! # Fit a three-factor curve instead
//! nss calibrate --nelson-siegel -t "[1, 2, 5, 10]" -y "[0.01, 0.015, 0.022, 0.028]"
//!
//! # Evaluate a curve
//! nss evaluate -c '{"beta0": 0.04, "beta1": -0.02, "beta2": 0.01, "tau": 2.0}' -t "[1, 5, 10]"
//!
//! # Plot one or more curves
//! nss plot -c '{"beta0": 0.04, "beta1": -0.02, "beta2": 0.01, "tau": 2.0}' -o curves.svg
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config_path = cli.config.as_deref();
    match command {
        Commands::Calibrate(args) => {
            let ctx = Context::load(config_path, cli.format, cli.quiet)?;
            commands::calibrate::execute(args, &ctx)?;
        }
        Commands::Evaluate(args) => {
            let ctx = Context::load(config_path, cli.format, cli.quiet)?;
            commands::evaluate::execute(args, &ctx)?;
        }
        Commands::Plot(args) => {
            let ctx = Context::load(config_path, cli.format, cli.quiet)?;
            commands::plot::execute(args, &ctx)?;
        }
        // Reads (or creates) the settings file itself
        Commands::Config(args) => {
            commands::config::execute(args, config_path, cli.format, cli.quiet)?;
        }
    }

    Ok(())
}

/// Installs the stderr log subscriber. `log` records from the math crate
/// are forwarded through the same filter.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
