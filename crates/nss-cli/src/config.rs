//! Settings file.
//!
//! ```toml
//! [calibration]
//! initial_tau = 2.0
//! initial_taus = [2.0, 5.0]
//! max_iterations = 1000
//!
//! [output]
//! format = "table"
//! plot_points = 200
//! ```
//!
//! Every key is optional. Unknown keys are rejected.

use std::path::{Path, PathBuf};

use nss_curves::config::CalibrationConfig;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Default number of points per plotted curve.
pub const DEFAULT_PLOT_POINTS: usize = 100;

/// Contents of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Calibration defaults.
    #[serde(default)]
    pub calibration: CalibrationConfig,

    /// Output defaults.
    #[serde(default)]
    pub output: OutputSettings,
}

/// The `[output]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    /// Format used when `--format` is not given.
    #[serde(default)]
    pub format: OutputFormat,

    /// Points per curve when `plot --points` is not given.
    #[serde(default = "default_plot_points")]
    pub plot_points: usize,
}

fn default_plot_points() -> usize {
    DEFAULT_PLOT_POINTS
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            plot_points: DEFAULT_PLOT_POINTS,
        }
    }
}

impl Settings {
    /// Platform default location of the settings file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nss").join("config.toml"))
    }

    /// The explicit path if given, else the platform default.
    pub fn resolve_path(explicit: Option<&Path>) -> CliResult<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path()
                .ok_or_else(|| CliError::Config("could not determine config directory".into())),
        }
    }

    /// Loads settings.
    ///
    /// An explicit path must exist. The default path is optional; when it is
    /// absent the built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Reads and validates a settings file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("cannot read {}: {e}", path.display())))?;
        let settings = Self::from_toml(&content)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Parses and validates settings from TOML text.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        let settings: Self =
            toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> CliResult<()> {
        self.calibration.validate()?;
        if self.output.plot_points < 2 {
            return Err(CliError::Config(format!(
                "output.plot_points must be at least 2, got {}",
                self.output.plot_points
            )));
        }
        Ok(())
    }

    /// Renders the settings as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert_eq!(settings.output.plot_points, 100);
    }

    #[test]
    fn test_partial_tables() {
        let settings = Settings::from_toml(
            "[calibration]\ninitial_tau = 1.5\n\n[output]\nformat = \"csv\"\n",
        )
        .unwrap();
        assert_eq!(settings.calibration.initial_tau, 1.5);
        assert_eq!(settings.calibration.initial_taus, [2.0, 5.0]);
        assert_eq!(settings.output.format, OutputFormat::Csv);
        assert_eq!(settings.output.plot_points, 100);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(Settings::from_toml("[plotting]\nwidth = 3\n").is_err());
        assert!(Settings::from_toml("[output]\ncolour = true\n").is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Settings::from_toml("[calibration]\nmin_tau = -1.0\n"),
            Err(CliError::Curve(_))
        ));
        assert!(matches!(
            Settings::from_toml("[output]\nplot_points = 1\n"),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        assert!(text.contains("[calibration]"));
        assert!(text.contains("[output]"));
        assert_eq!(Settings::from_toml(&text).unwrap(), settings);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Settings::load(Some(&missing)),
            Err(CliError::Config(_))
        ));

        let present = dir.path().join("config.toml");
        std::fs::write(&present, "[calibration]\nmax_iterations = 50\n").unwrap();
        let settings = Settings::load(Some(&present)).unwrap();
        assert_eq!(settings.calibration.max_iterations, 50);
    }
}
