//! Config command implementation.
//!
//! Inspects and creates the settings file.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::error::CliError;
use crate::output::{
    print_csv, print_header, print_info, print_json_pretty, print_success, print_table, KeyValue,
};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective settings
    Show,

    /// Show the settings file location
    Path,

    /// Write a settings file with the default values
    Init(InitArgs),
}

/// Arguments for the init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(
    args: ConfigArgs,
    config_path: Option<&Path>,
    format: Option<OutputFormat>,
    quiet: bool,
) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(config_path, format),
        ConfigCommand::Path => execute_path(config_path, quiet),
        ConfigCommand::Init(init_args) => execute_init(init_args, config_path, quiet),
    }
}

/// Show the effective settings.
fn execute_show(config_path: Option<&Path>, format: Option<OutputFormat>) -> Result<()> {
    let settings = Settings::load(config_path)?;

    match format.unwrap_or(settings.output.format) {
        OutputFormat::Json => print_json_pretty(&settings)?,
        OutputFormat::Table => {
            print_header("Current Configuration");
            print_table(&settings_rows(&settings)?);
        }
        OutputFormat::Csv => print_csv(&settings_rows(&settings)?)?,
    }

    Ok(())
}

/// Show the settings file location.
fn execute_path(config_path: Option<&Path>, quiet: bool) -> Result<()> {
    let path = Settings::resolve_path(config_path)?;
    println!("{}", path.display());
    if !quiet {
        if path.exists() {
            print_info("Status: exists");
        } else {
            print_info("Status: not created yet (using defaults)");
        }
    }
    Ok(())
}

/// Write the default settings.
fn execute_init(args: InitArgs, config_path: Option<&Path>, quiet: bool) -> Result<()> {
    let path = Settings::resolve_path(config_path)?;
    if path.exists() && !args.force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ))
        .into());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(CliError::from)?;
    }
    std::fs::write(&path, Settings::default().to_toml()?).map_err(CliError::from)?;

    if !quiet {
        print_success(&format!("Wrote {}", path.display()));
    }
    Ok(())
}

/// Flattens the settings into `table.key` rows.
fn settings_rows(settings: &Settings) -> Result<Vec<KeyValue>, CliError> {
    let mut rows = Vec::new();
    flatten("", &serde_json::to_value(settings)?, &mut rows);
    Ok(rows)
}

fn flatten(prefix: &str, value: &Value, rows: &mut Vec<KeyValue>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                let name = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&name, inner, rows);
            }
        }
        Value::String(s) => rows.push(KeyValue::new(prefix, s.as_str())),
        other => rows.push(KeyValue::new(prefix, other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_rows() {
        let rows = settings_rows(&Settings::default()).unwrap();
        let find = |key: &str| {
            rows.iter()
                .find(|r| r.key == key)
                .map(|r| r.value.clone())
                .unwrap()
        };

        assert_eq!(find("calibration.initial_tau"), "2.0");
        assert_eq!(find("calibration.initial_taus"), "[2.0,5.0]");
        assert_eq!(find("output.format"), "json");
        assert_eq!(find("output.plot_points"), "100");
    }
}
