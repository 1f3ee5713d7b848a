use super::*;

const KINDS: [CurveKind; 3] = [
    CurveKind::Linear,
    CurveKind::Polynomial,
    CurveKind::PolynomialInverse,
];

#[test]
fn endpoints_are_exact_for_every_kind() {
    for kind in KINDS {
        let c = InterpolationCurve::new(kind, (2.0, 0.3), (11.0, 0.7), DEFAULT_STEEPNESS).unwrap();
        assert_eq!(c.evaluate_many(&[2, 11]), vec![0.3, 0.7], "{kind}");
    }
}

#[test]
fn outside_bounds_clamps_to_boundary_values() {
    let c = InterpolationCurve::new(CurveKind::Polynomial, (0.0, 0.0), (10.0, 45.0), 3.0).unwrap();
    assert_eq!(c.evaluate_many(&[-5, 15]), vec![0.0, 45.0]);

    for kind in KINDS {
        let c = InterpolationCurve::new(kind, (1.0, 5.0), (4.0, -5.0), 2.0).unwrap();
        assert_eq!(c.evaluate(-100.0), 5.0);
        assert_eq!(c.evaluate(100.0), -5.0);
    }
}

#[test]
fn linear_midpoint_is_average() {
    let c = InterpolationCurve::over_frames(CurveKind::Linear, 1.0, 2.0, 11).unwrap();
    assert!((c.evaluate(5.0) - 1.5).abs() < 1e-12);
}

#[test]
fn polynomial_eases_in_and_inverse_eases_out() {
    let p = InterpolationCurve::over_frames(CurveKind::Polynomial, 0.0, 1.0, 11).unwrap();
    let q = InterpolationCurve::over_frames(CurveKind::PolynomialInverse, 0.0, 1.0, 11).unwrap();
    assert!((p.evaluate(5.0) - 0.125).abs() < 1e-12);
    assert!((q.evaluate(5.0) - 0.5f64.powf(1.0 / 3.0)).abs() < 1e-12);
    assert!(p.evaluate(5.0) < 0.5 && q.evaluate(5.0) > 0.5);
}

#[test]
fn sampled_values_are_monotonic() {
    for kind in KINDS {
        let values = InterpolationCurve::over_frames(kind, 0.0, 45.0, 10)
            .unwrap()
            .sample(10);
        assert_eq!(values.len(), 10);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[9], 45.0);
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "{kind}: {values:?}");
    }
}

#[test]
fn invalid_bounds_are_rejected() {
    assert!(InterpolationCurve::new(CurveKind::Linear, (-1.0, 0.0), (3.0, 1.0), 3.0).is_err());
    assert!(InterpolationCurve::new(CurveKind::Linear, (3.0, 0.0), (3.0, 1.0), 3.0).is_err());
    assert!(InterpolationCurve::new(CurveKind::Linear, (4.0, 0.0), (3.0, 1.0), 3.0).is_err());
    assert!(InterpolationCurve::over_frames(CurveKind::Polynomial, 0.0, 1.0, 1).is_err());
}

#[test]
fn non_positive_steepness_is_rejected() {
    for s in [0.0, -2.0, f64::NAN] {
        let err = InterpolationCurve::new(CurveKind::Polynomial, (0.0, 0.0), (3.0, 1.0), s);
        assert!(matches!(err, Err(TransitionError::Validation(_))));
    }
}

#[test]
fn mirrored_kind_swaps_polynomials() {
    assert_eq!(CurveKind::Linear.mirrored(), CurveKind::Linear);
    assert_eq!(CurveKind::Polynomial.mirrored(), CurveKind::PolynomialInverse);
    assert_eq!(CurveKind::PolynomialInverse.mirrored(), CurveKind::Polynomial);
}
