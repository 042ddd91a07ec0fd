//! Treasury Curve Fitting Example
//!
//! Fits Nelson-Siegel and Nelson-Siegel-Svensson curves to on-the-run
//! Treasury yields and compares the residuals.
//!
//! Market Data: November 28, 2025
//!
//! | Tenor | Yield   |
//! |-------|---------|
//! | 1M    | 3.936%  |
//! | 3M    | 3.806%  |
//! | 6M    | 3.774%  |
//! | 1Y    | 3.591%  |
//! | 2Y    | 3.502%  |
//! | 3Y    | 3.493%  |
//! | 5Y    | 3.603%  |
//! | 7Y    | 3.788%  |
//! | 10Y   | 4.018%  |
//! | 20Y   | 4.628%  |
//! | 30Y   | 4.667%  |
//!
//! Run with: cargo run --example treasury_curve

use nss_curves::prelude::*;

const MARKET: [(&str, f64, f64); 11] = [
    ("1M", 1.0 / 12.0, 0.03936),
    ("3M", 0.25, 0.03806),
    ("6M", 0.5, 0.03774),
    ("1Y", 1.0, 0.03591),
    ("2Y", 2.0, 0.03502),
    ("3Y", 3.0, 0.03493),
    ("5Y", 5.0, 0.03603),
    ("7Y", 7.0, 0.03788),
    ("10Y", 10.0, 0.04018),
    ("20Y", 20.0, 0.04628),
    ("30Y", 30.0, 0.04667),
];

fn print_fit(name: &str, curve: &dyn FactorModel, status: &CalibrationStatus) {
    println!("--- {name} ---");
    println!("{}", status.summary());
    println!("betas: {:?}", curve.betas());
    println!("taus:  {:?}\n", curve.taus());

    println!("{:>5} {:>10} {:>10} {:>10}", "Tenor", "Market", "Model", "Error(bp)");
    for (tenor, t, y) in MARKET {
        let model = curve.zero(t);
        println!(
            "{:>5} {:>9.3}% {:>9.3}% {:>10.2}",
            tenor,
            y * 100.0,
            model * 100.0,
            (model - y) * 10_000.0
        );
    }
    println!();
}

fn main() {
    println!("===========================================");
    println!("  Treasury Curve Fitting Example");
    println!("  Market Data: November 28, 2025");
    println!("===========================================\n");

    let t: Vec<f64> = MARKET.iter().map(|(_, t, _)| *t).collect();
    let y: Vec<f64> = MARKET.iter().map(|(_, _, y)| *y).collect();

    let factors = empirical_factors(y[1], y[4], y[8]);
    println!(
        "Empirical factors: level={:.3}% slope={:.3}% curvature={:.3}%\n",
        factors.level * 100.0,
        factors.slope * 100.0,
        factors.curvature * 100.0
    );

    let (ns, status) = calibrate_ns(&t, &y, DEFAULT_NS_TAU0).unwrap();
    print_fit("Nelson-Siegel", &ns, &status);

    let (nss, status) = calibrate_nss(&t, &y, DEFAULT_NSS_TAU0).unwrap();
    print_fit("Nelson-Siegel-Svensson", &nss, &status);

    println!("Flat record: {}", CurveSpec::from(nss).to_json().unwrap());

    println!("\nForward curve (NSS):");
    for t in [1.0, 2.0, 5.0, 10.0, 20.0, 30.0] {
        println!("  f({t:>4}) = {:.3}%", nss.forward(t) * 100.0);
    }
}
