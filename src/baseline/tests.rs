use super::*;

fn drifting_trace() -> Trace {
    // linear drift with a peak in the middle
    let time: Vec<f64> = (0..1000).map(|i| i as f64 * 0.1).collect();
    let intensity: Vec<f64> = time
        .iter()
        .map(|&t| 50.0 + 2.0 * t + 400.0 * (-(t - 50.0).powi(2) / 2.0).exp())
        .collect();
    Trace::new(time, intensity).unwrap()
}

#[test]
fn test_detect_linear_baseline() {
    let trace = drifting_trace();
    let window = AnalysisWindow::new(5.0, 95.0);
    let config = BaselineConfig {
        points: 50,
        order: 1,
        ..Default::default()
    };
    let model = detect_baseline(&trace, &window, &config).unwrap();

    // chunks starting at 5.0 or ending at 95.0 and beyond are excluded
    assert_eq!(model.anchors().len(), 17);
    // each chunk minimum is its first sample, except around the peak
    assert_eq!(model.anchors()[0], trace.iter().nth(100).unwrap());
    assert!((model.evaluate(20.0) - 90.0).abs() < 1.0);
    assert!((model.polynomial().coefficients()[0] - 2.0).abs() < 0.05);
}

#[test]
fn test_correct_baseline_is_non_negative_in_window() {
    let trace = drifting_trace();
    let window = AnalysisWindow::new(5.0, 95.0);
    let config = BaselineConfig {
        points: 50,
        order: 1,
        ..Default::default()
    };
    let corrected = correct_baseline(&trace, &window, &config).unwrap();
    let range = corrected.index_range(window.start, window.end);
    let lowest = corrected.intensity()[range]
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    assert!(lowest >= -1e-9);
    assert_eq!(corrected.time(), trace.time());
}

#[test]
fn test_uplift_applies_to_whole_trace() {
    let trace = Trace::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, -2.0, 1.0, -9.0]).unwrap();
    let model = BaselineModel {
        polynomial: Polynomial::new(vec![0.0]),
        anchors: Vec::new(),
    };
    let corrected = subtract_baseline(&trace, &AnalysisWindow::new(0.5, 2.5), &model).unwrap();
    assert_eq!(corrected.intensity(), &[2.0, 0.0, 3.0, -7.0]);
}

#[test]
fn test_insufficient_anchors() {
    let trace = drifting_trace();
    let window = AnalysisWindow::new(40.0, 52.0);
    let config = BaselineConfig {
        points: 50,
        order: 2,
        ..Default::default()
    };
    let err = detect_baseline(&trace, &window, &config).unwrap_err();
    assert!(matches!(
        err,
        BaselineError::InsufficientData {
            required: 3,
            available: 1,
            order: 2
        }
    ));
}

#[test]
fn test_order_exceeding_chunks_is_contradiction() {
    let trace = drifting_trace();
    let window = AnalysisWindow::new(0.0, 100.0);
    let config = BaselineConfig {
        points: 400,
        order: 3,
        ..Default::default()
    };
    assert!(matches!(
        detect_baseline(&trace, &window, &config),
        Err(BaselineError::ConfigContradiction(_))
    ));

    let zero = BaselineConfig {
        points: 0,
        ..Default::default()
    };
    assert!(matches!(
        detect_baseline(&trace, &window, &zero),
        Err(BaselineError::ConfigContradiction(_))
    ));
}
