use crate::root::{bisect, locate_root, newton, RootError};

#[test]
fn test_bisect_finds_square_root() {
    let root = bisect(|x| x * x, 2.0, 0.0, 2.0).unwrap();
    assert!((root - 2f64.sqrt()).abs() < 1e-11);
}

#[test]
fn test_bisect_accepts_reversed_bracket() {
    let root = bisect(|x| x.cos(), 0.0, 3.0, 0.0).unwrap();
    assert!((root - std::f64::consts::FRAC_PI_2).abs() < 1e-11);
}

#[test]
fn test_bisect_decreasing_function() {
    let root = bisect(|x| 10.0 - x, 4.0, 0.0, 100.0).unwrap();
    assert!((root - 6.0).abs() < 1e-10);
}

#[test]
fn test_bisect_returns_exact_endpoint() {
    assert_eq!(bisect(|x| x - 1.0, 0.0, 1.0, 3.0), Ok(1.0));
    assert_eq!(bisect(|x| x - 3.0, 0.0, 1.0, 3.0), Ok(3.0));
}

#[test]
fn test_bisect_reports_missing_sign_change() {
    let result = bisect(|x| x, 5.0, 0.0, 1.0);
    assert_eq!(
        result,
        Err(RootError::NotBracketed {
            lower: 0.0,
            upper: 1.0,
            lower_residual: -5.0,
            upper_residual: -4.0,
        })
    );
}

#[test]
fn test_bisect_rejects_nan_residuals() {
    assert!(bisect(|_| f64::NAN, 0.0, 0.0, 1.0).is_err());
}

#[test]
fn test_bisect_large_bracket_meets_absolute_tolerance() {
    // radius-like scale
    let target = 3_389_500.123_456;
    let root = bisect(|r| r, target, 0.0, 7.0e6).unwrap();
    assert!((root - target).abs() < 1e-8);
}

#[test]
fn test_locate_root_falls_back_to_closer_endpoint() {
    assert_eq!(locate_root(|x| x, 5.0, 0.0, 1.0), 1.0);
    assert_eq!(locate_root(|x| x, -5.0, 0.0, 1.0), 0.0);
}

#[test]
fn test_locate_root_agrees_with_bisect_when_bracketed() {
    let located = locate_root(|x| x * x * x, 8.0, 0.0, 5.0);
    assert!((located - 2.0).abs() < 1e-11);
}

#[test]
fn test_newton_cube_root() {
    let root = newton(|x| x * x * x, |x| 3.0 * x * x, 27.0, 1.0, 1e-12, 100).unwrap();
    assert!((root - 3.0).abs() < 1e-10);
}

#[test]
fn test_newton_zero_derivative() {
    let result = newton(|x| x * x, |x| 2.0 * x, 1.0, 0.0, 1e-12, 100);
    assert_eq!(result, Err(RootError::ZeroDerivative { x: 0.0 }));
}

#[test]
fn test_newton_iteration_cap() {
    let result = newton(|x| x * x, |x| 2.0 * x, 4.0, 1.0, 1e-12, 0);
    assert!(matches!(
        result,
        Err(RootError::NoConvergence { iterations: 0, .. })
    ));
}
