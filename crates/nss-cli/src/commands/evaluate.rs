//! Evaluate command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use nss_curves::{evaluate_curve, evaluate_forward, CurveSpec};

use super::{parse_curve, parse_float_array, Context, FloatArray};
use crate::cli::OutputFormat;
use crate::output::{format_percent, print_csv, print_json, print_table};

/// Arguments for the evaluate command.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Curve parameters as a JSON object, e.g.
    /// '{"beta0": 0.04, "beta1": -0.02, "beta2": 0.01, "tau": 2.0}'
    #[arg(short, long, value_parser = parse_curve)]
    pub curve: CurveSpec,

    /// Maturities in years as a JSON array
    #[arg(short, long, value_parser = parse_float_array)]
    pub times: FloatArray,

    /// Evaluate instantaneous forward rates instead of zero rates
    #[arg(long)]
    pub forward: bool,
}

/// One evaluated point.
#[derive(Debug, Clone, Serialize, Tabled)]
struct RatePoint {
    #[tabled(rename = "Maturity")]
    maturity: f64,
    #[tabled(rename = "Rate", display_with = "display_percent")]
    rate: f64,
}

fn display_percent(rate: &f64) -> String {
    format_percent(*rate)
}

/// Execute the evaluate command.
pub fn execute(args: EvaluateArgs, ctx: &Context) -> Result<()> {
    let times = &args.times.0;
    let rates = if args.forward {
        evaluate_forward(&args.curve, times)
    } else {
        evaluate_curve(&args.curve, times)
    };

    match ctx.format {
        OutputFormat::Json => print_json(&rates)?,
        OutputFormat::Table => print_table(&points(times, &rates)),
        OutputFormat::Csv => print_csv(&points(times, &rates))?,
    }

    Ok(())
}

fn points(times: &[f64], rates: &[f64]) -> Vec<RatePoint> {
    times
        .iter()
        .zip(rates)
        .map(|(&maturity, &rate)| RatePoint { maturity, rate })
        .collect()
}
