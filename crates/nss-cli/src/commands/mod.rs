//! CLI command implementations.

pub mod calibrate;
pub mod config;
pub mod evaluate;
pub mod plot;

pub use calibrate::CalibrateArgs;
pub use config::ConfigArgs;
pub use evaluate::EvaluateArgs;
pub use plot::PlotArgs;

use std::path::Path;

use nss_curves::CurveSpec;

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::error::CliResult;
use crate::output::print_info;

/// Settings shared by the commands that produce results.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective output format.
    pub format: OutputFormat,
    /// Whether informational messages are suppressed.
    pub quiet: bool,
    /// Loaded settings file.
    pub settings: Settings,
}

impl Context {
    /// Loads the settings and resolves the output format against them.
    pub fn load(
        config_path: Option<&Path>,
        format: Option<OutputFormat>,
        quiet: bool,
    ) -> CliResult<Self> {
        let settings = Settings::load(config_path)?;
        Ok(Self {
            format: format.unwrap_or(settings.output.format),
            quiet,
            settings,
        })
    }

    /// Prints an info message unless `--quiet` was given.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            print_info(message);
        }
    }
}

/// A JSON array of numbers given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatArray(pub Vec<f64>);

/// Parses a JSON array of numbers, e.g. `[0.5, 1, 2]`.
pub fn parse_float_array(s: &str) -> Result<FloatArray, String> {
    serde_json::from_str::<Vec<f64>>(s)
        .map(FloatArray)
        .map_err(|e| format!("{s} is not a valid array of floats: {e}"))
}

/// Parses a flat JSON curve record.
///
/// A record with a `beta3` key is a Svensson curve; any other is
/// Nelson-Siegel.
pub fn parse_curve(s: &str) -> Result<CurveSpec, String> {
    s.parse::<CurveSpec>()
        .map_err(|e| format!("{s} is not a valid curve: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_array() {
        assert_eq!(
            parse_float_array("[0.5, 1, 2]").unwrap(),
            FloatArray(vec![0.5, 1.0, 2.0])
        );
        assert_eq!(parse_float_array("[]").unwrap(), FloatArray(vec![]));

        let err = parse_float_array("1, 2").unwrap_err();
        assert!(err.starts_with("1, 2 is not a valid array of floats"));
        assert!(parse_float_array(r#"["a"]"#).is_err());
    }

    #[test]
    fn test_parse_curve() {
        let ns = parse_curve(r#"{"beta0": 0.04, "beta1": -0.02, "beta2": 0.01, "tau": 2.0}"#)
            .unwrap();
        assert_eq!(ns.model_name(), "Nelson-Siegel");

        let nss = parse_curve(
            r#"{"beta0": 0.04, "beta1": -0.02, "beta2": 0.01, "beta3": 0.02, "tau1": 2.0, "tau2": 5.0}"#,
        )
        .unwrap();
        assert_eq!(nss.model_name(), "Nelson-Siegel-Svensson");

        let err = parse_curve(r#"{"beta0": 0.04}"#).unwrap_err();
        assert!(err.contains("is not a valid curve"));
    }
}
