use super::*;
use crate::config::AnalysisWindow;
use crate::noise::BackgroundConfig;
use crate::numeric::{Gaussian, InterpolantKind, Polynomial};
use crate::trace::Trace;
use std::io::Cursor;

fn pairs(points: &[(f64, f64)]) -> Vec<TimePair> {
    points
        .iter()
        .map(|&(observed_time, expected_time)| TimePair {
            expected_time,
            observed_time,
        })
        .collect()
}

#[test]
fn test_read_reference_list_skips_malformed_rows() {
    let data = "Peak\tRT\tWindow\nGlc1\t10.5\t0.5\nbroken\t12\nGlc2\t 20.25 \t0.4\n\nGlc3\tabc\t0.5\n";
    let peaks = read_reference_from(Cursor::new(data)).unwrap();
    assert_eq!(
        peaks,
        vec![
            ReferencePeak::new("Glc1", 10.5, 0.5),
            ReferencePeak::new("Glc2", 20.25, 0.4),
        ]
    );
}

#[test]
fn test_read_reference_list_skips_invalid_utf8_rows() {
    let data: &[u8] = b"Glc1\t10.5\t0.5\nbad\xff\xfe\t11.0\t0.5\nGlc2\t20.25\t0.4\n";
    let peaks = read_reference_from(Cursor::new(data)).unwrap();
    assert_eq!(
        peaks,
        vec![
            ReferencePeak::new("Glc1", 10.5, 0.5),
            ReferencePeak::new("Glc2", 20.25, 0.4),
        ]
    );
}

#[test]
fn test_reference_file_from_annotation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("annotation.ref");
    std::fs::write(&path, "Peak\tRT\tWindow\n12.40\t12.41\t0.35\n").unwrap();
    let peaks = read_reference_list(&path).unwrap();
    assert_eq!(peaks, vec![ReferencePeak::new("12.40", 12.41, 0.35)]);
}

#[test]
fn test_describe_functions() {
    let line = CalibrationFunction::Polynomial(Polynomial::new(vec![2.0, 1.0]));
    assert_eq!(line.describe(), "2.00e+00x^1 + 1.00e+00x^0");
    assert_eq!(line.evaluate(3.0), 7.0);

    let power = CalibrationFunction::PowerLaw {
        a: 2.0,
        b: 0.5,
        c: 1.0,
    };
    assert_eq!(power.describe(), "2.0*X^0.5+1.0");
    assert_eq!(power.evaluate(16.0), 9.0);
}

#[test]
fn test_monotonicity_check() {
    let rising = CalibrationFunction::Polynomial(Polynomial::new(vec![1.0, 0.0]));
    let valley = CalibrationFunction::Polynomial(Polynomial::new(vec![1.0, -20.0, 0.0]));
    assert!(rising.is_monotone(0.0, 60.0));
    assert!(!valley.is_monotone(0.0, 60.0));
    assert!(valley.is_monotone(10.0, 60.0));
}

#[test]
fn test_selector_rejects_interpolant_with_plateau() {
    let config = CalibrationConfig {
        use_interpolation: true,
        ..Default::default()
    };
    // two calibrants share an expected time
    let data = pairs(&[(10.0, 10.0), (20.0, 20.0), (30.0, 20.0), (40.0, 30.0), (50.0, 40.0)]);
    let selection = CalibrationModelSelector::new(&config)
        .select(&data, 10.0, 50.0)
        .unwrap()
        .unwrap();

    let pchip = selection
        .candidates
        .iter()
        .find(|c| c.model == CandidateModel::Interpolant(InterpolantKind::Pchip))
        .unwrap();
    assert_eq!(pchip.outcome, CandidateOutcome::NonMonotone);
    assert!(!matches!(
        selection.function,
        CalibrationFunction::MonotoneCubicInterpolant(_)
    ));
    assert!(selection.function.is_strictly_increasing(10.0, 50.0));

    let trace = Trace::new(vec![10.0, 20.0, 30.0, 40.0, 50.0], vec![1.0; 5]).unwrap();
    let remapped = trace.map_time(|t| selection.function.evaluate(t)).unwrap();
    assert!(remapped.time().windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_selector_exact_line_prefers_degree_one() {
    let config = CalibrationConfig::default();
    let data = pairs(&[(10.0, 21.0), (20.0, 41.0), (30.0, 61.0), (40.0, 81.0), (50.0, 101.0)]);
    let selection = CalibrationModelSelector::new(&config)
        .select(&data, 0.0, 60.0)
        .unwrap()
        .unwrap();

    assert_eq!(selection.rms, 0.0);
    match &selection.function {
        CalibrationFunction::Polynomial(p) => {
            assert_eq!(p.degree(), 1);
            assert!((p.coefficients()[0] - 2.0).abs() < 1e-9);
            assert!((p.coefficients()[1] - 1.0).abs() < 1e-7);
        }
        other => panic!("unexpected model {:?}", other),
    }
    assert_eq!(selection.candidates[0].outcome, CandidateOutcome::Accepted);
    assert!(selection.candidates[1..]
        .iter()
        .all(|c| c.outcome != CandidateOutcome::Accepted));
}

#[test]
fn test_selector_rejects_non_monotone_quadratic() {
    let config = CalibrationConfig::default();
    let data = pairs(&[(10.0, 10.0), (20.0, 25.0), (30.0, 32.0), (40.0, 34.0), (50.0, 33.0)]);
    let selection = CalibrationModelSelector::new(&config)
        .select(&data, 0.0, 60.0)
        .unwrap()
        .unwrap();

    assert_eq!(
        selection.candidates[1].model,
        CandidateModel::Polynomial { degree: 2 }
    );
    assert_eq!(selection.candidates[1].outcome, CandidateOutcome::NonMonotone);
    assert!(!selection
        .candidates
        .iter()
        .any(|c| c.model == CandidateModel::Polynomial { degree: 3 }));
    match &selection.function {
        CalibrationFunction::Polynomial(p) => assert_eq!(p.degree(), 1),
        CalibrationFunction::PowerLaw { .. } => {}
        other => panic!("unexpected model {:?}", other),
    }
    assert!(selection.function.is_monotone(0.0, 60.0));
}

#[test]
fn test_selector_interpolation_needs_improvement() {
    let data = pairs(&[(10.0, 10.0), (20.0, 20.0), (30.0, 35.0), (40.0, 40.0), (50.0, 50.0)]);

    let mut config = CalibrationConfig::default();
    let without = CalibrationModelSelector::new(&config)
        .select(&data, 10.0, 50.0)
        .unwrap()
        .unwrap();
    assert!(without.rms > 0.0);
    assert!(!matches!(
        without.function,
        CalibrationFunction::MonotoneCubicInterpolant(_)
    ));

    config.use_interpolation = true;
    let with = CalibrationModelSelector::new(&config)
        .select(&data, 10.0, 50.0)
        .unwrap()
        .unwrap();
    assert_eq!(with.rms, 0.0);
    match &with.function {
        CalibrationFunction::MonotoneCubicInterpolant(h) => {
            assert_eq!(h.kind(), InterpolantKind::Pchip)
        }
        other => panic!("unexpected model {:?}", other),
    }
    assert_eq!(
        with.function.describe(),
        "Monotonic Piecewise Cubic Hermite Interpolating Polynomial"
    );
}

#[test]
fn test_selector_pair_count_contract() {
    let config = CalibrationConfig::default();
    let selector = CalibrationModelSelector::new(&config);
    assert!(selector.select(&[], 0.0, 60.0).unwrap().is_none());
    assert!(matches!(
        selector.select(&pairs(&[(10.0, 11.0)]), 0.0, 60.0),
        Err(CalibrationError::InsufficientData {
            required: 2,
            available: 1
        })
    ));

    let two = selector
        .select(&pairs(&[(10.0, 11.0), (20.0, 21.0)]), 0.0, 60.0)
        .unwrap()
        .unwrap();
    assert!((two.function.evaluate(30.0) - 31.0).abs() < 1e-9);
}

fn shifted_trace() -> Trace {
    let time: Vec<f64> = (0..1400).map(|i| i as f64 * 0.05).collect();
    let intensity = time
        .iter()
        .map(|&t| {
            10.0 + [15.0, 25.0, 35.0, 45.0]
                .iter()
                .map(|&c| Gaussian::new(1000.0, c, 0.2).evaluate(t))
                .sum::<f64>()
        })
        .collect();
    Trace::new(time, intensity).unwrap()
}

#[test]
fn test_determine_time_pairs() {
    let trace = shifted_trace();
    let references = vec![
        ReferencePeak::new("a", 15.5, 1.0),
        ReferencePeak::new("b", 25.5, 1.0),
        ReferencePeak::new("gone", 80.0, 1.0),
    ];
    let window = AnalysisWindow::new(10.0, 60.0);
    let time_pairs =
        determine_time_pairs(&trace, &references, &window, &BackgroundConfig::default(), 27.0).unwrap();

    assert_eq!(time_pairs.len(), 2);
    assert_eq!(time_pairs[0].expected_time, 15.5);
    assert!((time_pairs[0].observed_time - 15.0).abs() < 1e-9);
    assert!((time_pairs[1].observed_time - 25.0).abs() < 1e-9);
}

#[test]
fn test_calibrate_trace_shifts_time_axis() {
    let trace = shifted_trace();
    let references: Vec<ReferencePeak> = [15.5, 25.5, 35.5, 45.5]
        .iter()
        .enumerate()
        .map(|(i, &t)| ReferencePeak::new(format!("p{}", i), t, 1.0))
        .collect();
    let window = AnalysisWindow::new(10.0, 60.0);

    let calibration = calibrate_trace(
        &trace,
        &references,
        &window,
        &BackgroundConfig::default(),
        &CalibrationConfig::default(),
    )
    .unwrap();

    assert_eq!(calibration.pairs.len(), 4);
    assert!(calibration.selection.rms < 1e-6);
    assert!((calibration.trace.time()[0] - 0.5).abs() < 1e-6);
    assert!((calibration.trace.time()[300] - 15.5).abs() < 1e-6);
    assert_eq!(calibration.trace.intensity(), trace.intensity());
}

#[test]
fn test_calibrate_trace_requires_min_peaks() {
    let trace = shifted_trace();
    let references = vec![ReferencePeak::new("a", 15.5, 1.0)];
    let err = calibrate_trace(
        &trace,
        &references,
        &AnalysisWindow::new(10.0, 60.0),
        &BackgroundConfig::default(),
        &CalibrationConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CalibrationError::InsufficientData {
            required: 4,
            available: 1
        }
    ));
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn selected_model_is_monotone(
            steps in prop::collection::vec((0.5f64..10.0, 0.0f64..12.0), 2..8),
            interpolate in any::<bool>(),
        ) {
            let mut observed = 5.0;
            let mut expected = 5.0;
            let mut data = Vec::new();
            for (dx, dy) in steps {
                observed += dx;
                expected += dy;
                data.push(TimePair { expected_time: expected, observed_time: observed });
            }
            let config = CalibrationConfig { use_interpolation: interpolate, ..Default::default() };
            let min = 0.0;
            let max = observed + 5.0;
            match CalibrationModelSelector::new(&config).select(&data, min, max) {
                Ok(Some(selection)) => prop_assert!(selection.function.is_strictly_increasing(min, max)),
                Ok(None) => prop_assert!(false, "pairs were supplied"),
                Err(CalibrationError::NoAcceptableModel) => {}
                Err(e) => prop_assert!(false, "unexpected error {}", e),
            }
        }
    }
}
