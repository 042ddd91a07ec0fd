//! Plot command implementation.
//!
//! Draws the zero curve of each given curve on a shared chart and writes it
//! as SVG.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use plotters::prelude::*;

use nss_curves::{evaluate_curve, CurveSpec};

use super::{parse_curve, Context};
use crate::error::{CliError, CliResult};

const WIDTH: u32 = 1024;
const HEIGHT: u32 = 640;

/// Arguments for the plot command.
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Curve parameters as a JSON object; repeat to overlay several curves
    #[arg(short = 'c', long = "curves", value_parser = parse_curve, required = true)]
    pub curves: Vec<CurveSpec>,

    /// Output SVG file
    #[arg(short, long)]
    pub output: PathBuf,

    /// First maturity on the horizontal axis
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub from_time: f64,

    /// Last maturity on the horizontal axis
    #[arg(short, long, default_value_t = 30.0)]
    pub to_time: f64,

    /// Points per curve [default: configured plot_points, else 100]
    #[arg(long)]
    pub points: Option<usize>,
}

/// Execute the plot command.
pub fn execute(args: PlotArgs, ctx: &Context) -> Result<()> {
    let points = args.points.unwrap_or(ctx.settings.output.plot_points);
    let grid = time_grid(args.from_time, args.to_time, points)?;

    let series: Vec<(String, Vec<f64>)> = args
        .curves
        .iter()
        .map(|curve| (curve.to_string(), evaluate_curve(curve, &grid)))
        .collect();

    render(&args.output, &grid, &series)?;
    ctx.info(&format!(
        "Wrote {} curve(s) to {}",
        series.len(),
        args.output.display()
    ));
    Ok(())
}

/// `n` equally spaced maturities from `from` to `to` inclusive.
fn time_grid(from: f64, to: f64, n: usize) -> CliResult<Vec<f64>> {
    if !(from.is_finite() && to.is_finite() && from < to) {
        return Err(CliError::InvalidArgument(format!(
            "time range must satisfy from < to, got [{from}, {to}]"
        )));
    }
    if n < 2 {
        return Err(CliError::InvalidArgument(format!(
            "need at least 2 points, got {n}"
        )));
    }

    let step = (to - from) / (n - 1) as f64;
    Ok((0..n).map(|i| from + step * i as f64).collect())
}

/// Vertical axis range covering every series, padded by 5%.
fn rate_range(series: &[(String, Vec<f64>)]) -> (f64, f64) {
    let (lo, hi) = series
        .iter()
        .flat_map(|(_, rates)| rates.iter().copied())
        .filter(|r| r.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r), hi.max(r))
        });

    if lo > hi {
        return (0.0, 1.0);
    }
    let pad = if hi > lo { 0.05 * (hi - lo) } else { 0.01 };
    (lo - pad, hi + pad)
}

fn plot_error(err: impl std::fmt::Display) -> CliError {
    CliError::Plot(err.to_string())
}

fn render(path: &Path, grid: &[f64], series: &[(String, Vec<f64>)]) -> CliResult<()> {
    let (from, to) = (grid[0], grid[grid.len() - 1]);
    let (y_min, y_max) = rate_range(series);

    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Zero rates", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(from..to, y_min..y_max)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("Maturity (years)")
        .y_desc("Rate")
        .y_label_formatter(&|y| format!("{:.2}%", y * 100.0))
        .draw()
        .map_err(plot_error)?;

    for (i, (label, rates)) in series.iter().enumerate() {
        let style = Palette99::pick(i).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                grid.iter().copied().zip(rates.iter().copied()),
                style,
            ))
            .map_err(plot_error)?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}
