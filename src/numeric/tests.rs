use super::*;

fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn test_stats_basics() {
    let values = [3.0, 1.0, 4.0, 1.0, 5.0];
    assert_eq!(stats::mean(&values), Some(2.8));
    assert_eq!(stats::min_max(&values), Some((1.0, 5.0)));
    assert_eq!(stats::spread(&values), Some(4.0));
    assert_eq!(stats::argmax(&values), Some(4));
    assert_eq!(stats::argmax(&[2.0, 7.0, 7.0]), Some(1));
    assert_eq!(stats::mean(&[]), None);
    assert!(approx(stats::std_dev(&[2.0, 4.0]).unwrap_or(0.0), 1.0, 1e-12));
}

#[test]
fn test_relative_extrema_excludes_endpoints_and_plateaus() {
    let values = [5.0, 1.0, 3.0, 3.0, 2.0, 4.0, 0.0];
    assert_eq!(stats::relative_extrema(&values, true), vec![5]);
    assert_eq!(stats::relative_extrema(&values, false), vec![1, 4]);
}

#[test]
fn test_bisect() {
    let sorted = [1.0, 2.0, 2.0, 3.0];
    assert_eq!(stats::bisect_left(&sorted, 2.0), 1);
    assert_eq!(stats::bisect_right(&sorted, 2.0), 3);
    assert_eq!(stats::bisect_left(&sorted, 0.0), 0);
    assert_eq!(stats::bisect_right(&sorted, 9.0), 4);
}

#[test]
fn test_linspace_pins_end() {
    let grid = stats::linspace(0.0, 1.0, 11);
    assert_eq!(grid.len(), 11);
    assert_eq!(grid[10], 1.0);
    assert!(approx(grid[3], 0.3, 1e-12));
}

#[test]
fn test_monotonicity_probe() {
    assert!(stats::is_non_decreasing(|x| 2.0 * x + 1.0, 0.0, 10.0, 1000));
    assert!(stats::is_non_decreasing(|_| 4.0, 0.0, 10.0, 1000));
    assert!(!stats::is_non_decreasing(|x| (x - 5.0).powi(2), 0.0, 10.0, 1000));
    assert!(!stats::is_non_decreasing(|x| x.ln(), -1.0, 10.0, 1000));

    assert!(stats::is_increasing(|x| 2.0 * x + 1.0, 0.0, 10.0, 1000));
    assert!(!stats::is_increasing(|_| 4.0, 0.0, 10.0, 1000));
    assert!(!stats::is_increasing(|x: f64| x.min(5.0), 0.0, 10.0, 1000));
}

#[test]
fn test_gaussian_shape() {
    let g = Gaussian::new(10.0, 2.0, -0.5);
    assert_eq!(g.sigma, 0.5);
    assert!(approx(g.evaluate(2.0), 10.0, 1e-12));
    assert!(approx(g.evaluate(2.0 + g.hwhm()), 5.0, 1e-9));
    assert!(approx(g.fwhm(), 0.5 * FWHM_PER_SIGMA, 1e-12));
}

#[test]
fn test_gaussian_fit_recovers_parameters() {
    let truth = Gaussian::new(120.0, 14.2, 0.35);
    let x: Vec<f64> = (0..81).map(|i| 13.0 + i as f64 * 0.03).collect();
    let y: Vec<f64> = x.iter().map(|&t| truth.evaluate(t)).collect();

    let fitted = Gaussian::fit(&x, &y, Gaussian::new(100.0, 14.0, 0.5)).unwrap();
    assert!(approx(fitted.amplitude, 120.0, 1e-4));
    assert!(approx(fitted.center, 14.2, 1e-6));
    assert!(approx(fitted.sigma, 0.35, 1e-6));
}

#[test]
fn test_gaussian_fit_rejects_too_few_points() {
    let err = Gaussian::fit(&[1.0, 2.0], &[1.0, 2.0], Gaussian::new(1.0, 1.5, 1.0)).unwrap_err();
    assert_eq!(
        err,
        FitError::InsufficientData {
            required: 3,
            available: 2
        }
    );
}

struct Exponential;

impl Model for Exponential {
    fn parameter_count(&self) -> usize {
        2
    }

    fn evaluate(&self, x: f64, p: &[f64]) -> f64 {
        p[0] * (p[1] * x).exp()
    }
}

#[test]
fn test_levenberg_marquardt_numeric_gradient() {
    let x: Vec<f64> = (0..20).map(|i| i as f64 * 0.1).collect();
    let y: Vec<f64> = x.iter().map(|&t| 3.0 * (0.7 * t).exp()).collect();

    let report = LevenbergMarquardt::default()
        .fit(&Exponential, &x, &y, &[1.0, 0.1])
        .unwrap();
    assert!(approx(report.parameters[0], 3.0, 1e-5));
    assert!(approx(report.parameters[1], 0.7, 1e-6));
    assert!(report.residual_sum_squares < 1e-10);
}

#[test]
fn test_polynomial_evaluate_and_derivative() {
    let p = Polynomial::new(vec![1.0, -2.0, 3.0]);
    assert_eq!(p.degree(), 2);
    assert_eq!(p.evaluate(2.0), 3.0);
    assert_eq!(p.derivative().coefficients(), &[2.0, -2.0]);
    assert_eq!(Polynomial::new(vec![]).evaluate(5.0), 0.0);
}

#[test]
fn test_polynomial_fit_exact_line() {
    let x = [10.0, 20.0, 30.0, 40.0];
    let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
    let p = Polynomial::fit(&x, &y, 1).unwrap();
    assert!(approx(p.coefficients()[0], 2.0, 1e-10));
    assert!(approx(p.coefficients()[1], 1.0, 1e-8));
}

#[test]
fn test_polynomial_fit_quadratic_at_retention_scale() {
    let x: Vec<f64> = (0..12).map(|i| 5.0 + 4.5 * i as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| 0.01 * v * v + 0.9 * v - 0.3).collect();
    let p = Polynomial::fit(&x, &y, 2).unwrap();
    assert!(approx(p.coefficients()[0], 0.01, 1e-10));
    assert!(approx(p.coefficients()[1], 0.9, 1e-8));
    assert!(approx(p.coefficients()[2], -0.3, 1e-6));
}

#[test]
fn test_polynomial_fit_errors() {
    assert!(matches!(
        Polynomial::fit(&[1.0, 2.0], &[1.0, 2.0], 2),
        Err(FitError::InsufficientData { .. })
    ));
    assert!(matches!(
        Polynomial::fit(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0], 1),
        Err(FitError::RankDeficient { .. })
    ));
}

#[test]
fn test_polynomial_describe() {
    let p = Polynomial::new(vec![2.0, 1.0]);
    assert_eq!(p.describe(), "2.00e+00x^1 + 1.00e+00x^0");
    assert_eq!(format_scientific(-0.00153, 2), "-1.53e-03");
    assert_eq!(format_scientific(123456.0, 2), "1.23e+05");
}

#[test]
fn test_format_float() {
    assert_eq!(format_float(2.0), "2.0");
    assert_eq!(format_float(-0.0), "-0.0");
    assert_eq!(format_float(0.1), "0.1");
    assert_eq!(format_float(12.345), "12.345");
    assert_eq!(format_float(0.00001), "1e-05");
    assert_eq!(format_float(1.5e16), "1.5e+16");
    assert_eq!(format_float(f64::NAN), "nan");
}

#[test]
fn test_cubic_spline_interpolates_knots() {
    let x = [0.0, 1.0, 2.5, 3.0, 4.0];
    let y = [1.0, 3.0, 2.0, 0.5, 4.0];
    let spline = CubicSpline::new(&x, &y).unwrap();
    for (xi, yi) in x.iter().zip(&y) {
        assert!(approx(spline.evaluate(*xi), *yi, 1e-12));
    }
}

#[test]
fn test_cubic_spline_linear_data_is_exact() {
    let x: Vec<f64> = (0..10).map(|i| i as f64 * 0.5).collect();
    let y: Vec<f64> = x.iter().map(|v| 3.0 * v - 2.0).collect();
    let spline = CubicSpline::new(&x, &y).unwrap();
    assert!(approx(spline.evaluate(1.3), 1.9, 1e-12));
    for d in spline.knot_derivatives() {
        assert!(approx(d, 3.0, 1e-12));
    }
}

#[test]
fn test_cubic_spline_rejects_unsorted_knots() {
    assert_eq!(
        CubicSpline::new(&[0.0, 2.0, 1.0], &[0.0, 1.0, 2.0]).unwrap_err(),
        FitError::NotIncreasing { index: 2 }
    );
}

#[test]
fn test_pchip_preserves_monotone_data() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0];
    let y = [0.0, 0.1, 3.0, 3.1, 8.0];
    let pchip = HermiteInterpolant::pchip(&x, &y).unwrap();
    for (xi, yi) in x.iter().zip(&y) {
        assert!(approx(pchip.evaluate(*xi), *yi, 1e-12));
    }
    assert!(stats::is_non_decreasing(|t| pchip.evaluate(t), 0.0, 4.0, 2000));
}

#[test]
fn test_pchip_flat_segment_stays_flat() {
    let pchip = HermiteInterpolant::pchip(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 1.0, 2.0]).unwrap();
    assert!(approx(pchip.evaluate(1.5), 1.0, 1e-12));
}

#[test]
fn test_akima_reproduces_line_and_knots() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let line: Vec<f64> = x.iter().map(|v| 0.5 * v + 2.0).collect();
    let akima = HermiteInterpolant::akima(&x, &line).unwrap();
    assert!(approx(akima.evaluate(2.7), 3.35, 1e-12));
    assert!(approx(akima.evaluate(6.0), 5.0, 1e-12));

    let y = [0.0, 2.0, 1.0, 4.0, 3.0, 6.0];
    let akima = HermiteInterpolant::akima(&x, &y).unwrap();
    for (xi, yi) in x.iter().zip(&y) {
        assert!(approx(akima.evaluate(*xi), *yi, 1e-12));
    }
}

#[test]
fn test_interpolant_labels() {
    assert_eq!(
        InterpolantKind::Pchip.label(),
        "Monotonic Piecewise Cubic Hermite Interpolating Polynomial"
    );
    assert_eq!(InterpolantKind::Akima.label(), "Akima 1D Interpolation");
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pchip_is_monotone_on_sorted_data(
            steps in prop::collection::vec(0.0f64..10.0, 3..12),
            gaps in prop::collection::vec(0.1f64..5.0, 12),
        ) {
            let mut x = vec![0.0];
            let mut y = vec![0.0];
            for (i, step) in steps.iter().enumerate() {
                x.push(x[i] + gaps[i]);
                y.push(y[i] + step);
            }
            let pchip = HermiteInterpolant::pchip(&x, &y).unwrap();
            let last = x[x.len() - 1];
            prop_assert!(stats::is_non_decreasing(|t| pchip.evaluate(t) + 1e-9 * t, 0.0, last, 500));
        }
    }
}
