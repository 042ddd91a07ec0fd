//! Integration tests: calibrate curves to data generated from known curves.
//!
//! Two reference curves are used throughout:
//!
//! | Model     | β₀    | β₁     | β₂   | β₃  | τ₁  | τ₂  |
//! |-----------|-------|--------|------|-----|-----|-----|
//! | NS        | 0.017 | -0.023 | 0.24 |     | 2.2 |     |
//! | Svensson  | 0.017 | -0.023 | 0.24 | 0.1 | 2.2 | 3.1 |
//!
//! Targets are the exact model zero rates on 50 equally spaced maturities in
//! `[0, 30]`, so a perfect calibration has zero residual.

use approx::assert_abs_diff_eq;
use nss_curves::prelude::*;

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

fn ns_truth() -> NelsonSiegel {
    NelsonSiegel::new(0.017, -0.023, 0.24, 2.2)
}

fn nss_truth() -> Svensson {
    Svensson::new(0.017, -0.023, 0.24, 0.1, 2.2, 3.1)
}

// =============================================================================
// Nelson-Siegel
// =============================================================================

#[test]
fn test_ns_recovery_from_true_tau() {
    let truth = ns_truth();
    let t = linspace(0.0, 30.0, 50);
    let y = truth.zeros(&t);

    let (fitted, status) = calibrate_ns(&t, &y, truth.tau()).unwrap();

    assert!(status.success, "{}", status.summary());
    assert_abs_diff_eq!(fitted.beta0(), truth.beta0(), epsilon = 1e-12);
    assert_abs_diff_eq!(fitted.beta1(), truth.beta1(), epsilon = 1e-12);
    assert_abs_diff_eq!(fitted.beta2(), truth.beta2(), epsilon = 1e-12);
    assert_abs_diff_eq!(fitted.tau(), truth.tau(), epsilon = 1e-12);
}

#[test]
fn test_ns_recovery_from_other_starts() {
    let truth = ns_truth();
    let t = linspace(0.0, 30.0, 50);
    let y = truth.zeros(&t);

    for tau0 in [DEFAULT_NS_TAU0, 0.5, 5.0, 10.0, 20.0] {
        let (fitted, status) = calibrate_ns(&t, &y, tau0).unwrap();

        assert!(status.success, "tau0={tau0}: {}", status.summary());
        assert_abs_diff_eq!(fitted.beta0(), truth.beta0(), epsilon = 5e-4);
        assert_abs_diff_eq!(fitted.beta1(), truth.beta1(), epsilon = 5e-4);
        assert_abs_diff_eq!(fitted.beta2(), truth.beta2(), epsilon = 5e-4);
        assert_abs_diff_eq!(fitted.tau(), truth.tau(), epsilon = 5e-3);
    }
}

#[test]
fn test_ns_bounded_search() {
    let truth = ns_truth();
    let t = linspace(0.0, 30.0, 50);
    let y = truth.zeros(&t);

    let calibrator = Calibrator::new(CalibrationConfig::default().with_min_tau(0.08));
    for tau0 in [0.08, 0.1, 0.2, 0.5, 1.0, 2.0, 3.0, 4.0, 5.0] {
        let (fitted, _) = calibrator.calibrate::<NelsonSiegel>(&t, &y, tau0).unwrap();

        assert!(fitted.tau() >= 0.08);
        assert_abs_diff_eq!(fitted.tau(), truth.tau(), epsilon = 5e-3);
    }
}

#[test]
fn test_ns_objective_minimum() {
    let truth = ns_truth();
    let t = linspace(0.0, 30.0, 50);
    let y = truth.zeros(&t);

    assert!(nelson_siegel_error(truth.tau(), &t, &y).unwrap() < 1e-12);
    assert!(nelson_siegel_error(truth.tau() * 1.1, &t, &y).unwrap() > 0.0);
    assert!(nelson_siegel_error(truth.tau() * 0.9, &t, &y).unwrap() > 0.0);
}

// =============================================================================
// Svensson
// =============================================================================

#[test]
fn test_nss_recovery_from_true_taus() {
    let truth = nss_truth();
    let t = linspace(0.0, 30.0, 50);
    let y = truth.zeros(&t);

    let (fitted, status) = calibrate_nss(&t, &y, (truth.tau1(), truth.tau2())).unwrap();

    assert!(status.success, "{}", status.summary());
    assert_abs_diff_eq!(fitted.beta0(), truth.beta0(), epsilon = 1e-12);
    assert_abs_diff_eq!(fitted.beta1(), truth.beta1(), epsilon = 1e-12);
    assert_abs_diff_eq!(fitted.beta2(), truth.beta2(), epsilon = 1e-12);
    assert_abs_diff_eq!(fitted.beta3(), truth.beta3(), epsilon = 1e-12);
    assert_abs_diff_eq!(fitted.tau1(), truth.tau1(), epsilon = 1e-12);
    assert_abs_diff_eq!(fitted.tau2(), truth.tau2(), epsilon = 1e-12);
}

#[test]
fn test_nss_recovery_from_nearby_start() {
    // A 1% perturbation of the start already costs most of the precision
    let truth = nss_truth();
    let t = linspace(0.0, 30.0, 50);
    let y = truth.zeros(&t);

    let tau0 = (truth.tau1() * 0.99, truth.tau2() * 1.01);
    let (fitted, _) = calibrate_nss(&t, &y, tau0).unwrap();

    assert_abs_diff_eq!(fitted.beta0(), truth.beta0(), epsilon = 5e-3);
    assert_abs_diff_eq!(fitted.beta1(), truth.beta1(), epsilon = 5e-3);
    assert_abs_diff_eq!(fitted.beta2(), truth.beta2(), epsilon = 5e-3);
    assert_abs_diff_eq!(fitted.beta3(), truth.beta3(), epsilon = 5e-3);
    assert_abs_diff_eq!(fitted.tau1(), truth.tau1(), epsilon = 5e-2);
    assert_abs_diff_eq!(fitted.tau2(), truth.tau2(), epsilon = 5e-2);
}

#[test]
fn test_nss_start_ordering_is_preserved() {
    let truth = nss_truth();
    let t = linspace(0.0, 30.0, 50);
    let y = truth.zeros(&t);

    let (forward_order, _) = calibrate_nss(&t, &y, (0.5, 2.0)).unwrap();
    let (reverse_order, _) = calibrate_nss(&t, &y, (2.0, 0.5)).unwrap();

    assert!(forward_order.tau1() < forward_order.tau2());
    assert!(reverse_order.tau1() > reverse_order.tau2());
}

#[test]
fn test_nss_objective_minimum() {
    let truth = nss_truth();
    let t = linspace(0.0, 30.0, 50);
    let y = truth.zeros(&t);

    assert!(svensson_error((truth.tau1(), truth.tau2()), &t, &y).unwrap() < 1e-12);
    let perturbed = svensson_error((truth.tau1() * 1.1, truth.tau2() * 1.1), &t, &y).unwrap();
    assert!(perturbed > 0.0);
}

// =============================================================================
// Curve records
// =============================================================================

#[test]
fn test_calibrated_curve_record_roundtrip() {
    let truth = nss_truth();
    let t = linspace(0.0, 30.0, 50);
    let y = truth.zeros(&t);

    let (fitted, _) = calibrate_nss(&t, &y, (truth.tau1(), truth.tau2())).unwrap();
    let json = CurveSpec::from(fitted).to_json().unwrap();
    assert!(json.contains("\"beta3\""));

    let parsed: CurveSpec = json.parse().unwrap();
    assert_eq!(parsed, CurveSpec::Svensson(fitted));
    assert_eq!(evaluate_curve(&parsed, &t), fitted.zeros(&t));
}

#[test]
fn test_calibration_rejects_mismatched_sample() {
    let t = linspace(0.0, 30.0, 50);
    let y = ns_truth().zeros(&t[..49]);

    let err = calibrate_ns(&t, &y, DEFAULT_NS_TAU0).unwrap_err();
    assert_eq!(err, CurveError::ShapeMismatch { times: 50, values: 49 });
}

// =============================================================================
// Forward rates
// =============================================================================

/// Compares the zero curve with the running average of the forward curve.
fn assert_forward_integrates_to_zero<M: FactorModel>(model: &M) {
    let t = linspace(0.001, 25.0, 500);
    let dt = t[1] - t[0];
    let forwards = model.forwards(&t);
    let zeros = model.zeros(&t);

    let mut cumulative = 0.0;
    for (i, (ti, f)) in t.iter().zip(&forwards).enumerate() {
        cumulative += f;
        if i >= 100 {
            assert_abs_diff_eq!(cumulative * dt / ti, zeros[i], epsilon = 1e-3);
        }
    }
}

#[test]
fn test_forward_against_zero_curve() {
    assert_forward_integrates_to_zero(&ns_truth());
    assert_forward_integrates_to_zero(&nss_truth());
}

#[test]
fn test_mithril_parameters() {
    let nss = Svensson::new(0.038, -0.032, -0.019, -0.02, 2.1, 1.04);
    let expected = [0.0038, 0.0063, 0.0165, 0.0258, 0.0332];
    let actual = nss.zeros(&[1.0, 2.0, 5.0, 10.0, 25.0]);
    for (y, e) in actual.iter().zip(expected) {
        assert_abs_diff_eq!(*y, e, epsilon = 5e-4);
    }
}

// =============================================================================
// Property tests
// =============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn batch_matches_scalar_ns(
            beta0 in -0.1..0.1f64,
            beta1 in -0.1..0.1f64,
            beta2 in -0.3..0.3f64,
            tau in 0.05..20.0f64,
            t in prop::collection::vec(-1.0..40.0f64, 1..30),
        ) {
            let ns = NelsonSiegel::new(beta0, beta1, beta2, tau);
            let batch = ns.zeros(&t);
            for (ti, yi) in t.iter().zip(&batch) {
                prop_assert_eq!(*yi, ns.zero(*ti));
            }
        }

        #[test]
        fn batch_matches_scalar_nss(
            beta0 in -0.1..0.1f64,
            beta1 in -0.1..0.1f64,
            beta2 in -0.3..0.3f64,
            beta3 in -0.3..0.3f64,
            tau1 in 0.05..20.0f64,
            tau2 in 0.05..20.0f64,
            t in prop::collection::vec(-1.0..40.0f64, 1..30),
        ) {
            let nss = Svensson::new(beta0, beta1, beta2, beta3, tau1, tau2);
            let batch = nss.zeros(&t);
            let m = nss.factor_matrix(&t);
            prop_assert_eq!(m.shape(), (t.len(), 4));
            for (i, ti) in t.iter().enumerate() {
                prop_assert_eq!(batch[i], nss.zero(*ti));
            }
        }

        #[test]
        fn time_zero_is_short_rate(
            beta0 in -0.1..0.1f64,
            beta1 in -0.1..0.1f64,
            beta2 in -0.3..0.3f64,
            tau in 0.05..20.0f64,
        ) {
            let spec = CurveSpec::from(NelsonSiegel::new(beta0, beta1, beta2, tau));
            prop_assert_eq!(spec.zero(0.0), beta0 + beta1);
            prop_assert_eq!(evaluate_curve(&spec, &[0.0])[0], beta0 + beta1);
        }
    }
}
