//! Calibrate command implementation.
//!
//! Fits a curve to observed zero rates and prints its flat parameter record.

use anyhow::Result;
use clap::Args;

use nss_curves::calibration::{CalibrationStatus, Calibrator};
use nss_curves::{CurveSpec, NelsonSiegel, Svensson};

use super::{parse_float_array, Context, FloatArray};
use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_csv_record, print_header, print_table, print_warning, KeyValue};

/// Arguments for the calibrate command.
#[derive(Args, Debug)]
pub struct CalibrateArgs {
    /// Maturities in years as a JSON array, e.g. "[0.5, 1, 2, 5, 10]"
    #[arg(short, long, value_parser = parse_float_array)]
    pub times: FloatArray,

    /// Observed zero rates as a JSON array, one per maturity
    #[arg(short = 'y', long, value_parser = parse_float_array)]
    pub values: FloatArray,

    /// Fit the three-factor Nelson-Siegel model
    #[arg(long, conflicts_with = "nelson_siegel_svensson")]
    pub nelson_siegel: bool,

    /// Fit the four-factor Nelson-Siegel-Svensson model (default)
    #[arg(long)]
    pub nelson_siegel_svensson: bool,

    /// Starting decay scale (tau, or tau1 for Svensson)
    #[arg(long)]
    pub initial_tau1: Option<f64>,

    /// Starting second decay scale (Svensson only)
    #[arg(long)]
    pub initial_tau2: Option<f64>,
}

/// Execute the calibrate command.
pub fn execute(args: CalibrateArgs, ctx: &Context) -> Result<()> {
    let config = ctx.settings.calibration;
    let calibrator = Calibrator::new(config);
    let t = &args.times.0;
    let y = &args.values.0;

    let (curve, status): (CurveSpec, CalibrationStatus) = if args.nelson_siegel {
        if args.initial_tau2.is_some() {
            print_warning("--initial-tau2 is ignored for the Nelson-Siegel model");
        }
        let tau0 = args.initial_tau1.unwrap_or(config.initial_tau);
        let (curve, status) = calibrator
            .calibrate::<NelsonSiegel>(t, y, tau0)
            .map_err(CliError::from)?;
        (curve.into(), status)
    } else {
        let [default1, default2] = config.initial_taus;
        let tau0 = (
            args.initial_tau1.unwrap_or(default1),
            args.initial_tau2.unwrap_or(default2),
        );
        let (curve, status) = calibrator
            .calibrate::<Svensson>(t, y, tau0)
            .map_err(CliError::from)?;
        (curve.into(), status)
    };

    if !status.success {
        return Err(CliError::NotConverged(status.summary()).into());
    }
    ctx.info(&status.summary());

    match ctx.format {
        OutputFormat::Json => println!("{}", curve.to_json().map_err(CliError::from)?),
        OutputFormat::Table => {
            print_header(curve.model_name());
            print_table(&parameter_rows(&curve, &status));
        }
        OutputFormat::Csv => {
            let record = curve.to_record();
            print_csv_record(
                record.keys().copied(),
                record.values().map(ToString::to_string),
            )?;
        }
    }

    Ok(())
}

/// Parameter and fit-quality rows for table output.
fn parameter_rows(curve: &CurveSpec, status: &CalibrationStatus) -> Vec<KeyValue> {
    let mut rows: Vec<KeyValue> = curve
        .to_record()
        .into_iter()
        .map(|(name, value)| KeyValue::new(name, value.to_string()))
        .collect();
    rows.push(KeyValue::new("iterations", status.iterations.to_string()));
    rows.push(KeyValue::new("sse", format!("{:.3e}", status.objective_value)));
    rows.push(KeyValue::new(
        "rms_bp",
        format!("{:.4}", status.rms_error() * 10_000.0),
    ));
    rows
}
