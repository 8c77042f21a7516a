//! Baseline correction followed by peak detection on synthetic chromatograms.

mod common;

use chromapeak::prelude::*;
use common::{chromatogram, STEP};

const COMPONENTS: [(f64, f64, f64); 3] = [(1000.0, 22.0, 0.3), (600.0, 32.0, 0.25), (800.0, 47.0, 0.4)];

#[test]
fn test_baseline_correction_then_detection() {
    // drift: 20 + 0.3 t
    let trace = chromatogram(&COMPONENTS, &[20.0, 0.3]);
    let config = AnalysisConfig::default();

    let corrected = correct_baseline(&trace, &config.window, &config.baseline).unwrap();
    let range = corrected.index_range(config.window.start, config.window.end);
    let lowest = corrected.intensity()[range]
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    assert!(lowest >= -1e-9, "lowest corrected value {}", lowest);

    let detection = PeakDetector::new(&config.window, &config.background, &config.peaks)
        .detect(&corrected)
        .unwrap();

    assert_eq!(detection.peaks.len(), COMPONENTS.len());
    for (peak, &(_, center, sigma)) in detection.peaks.iter().zip(&COMPONENTS) {
        assert!(
            (peak.apex_time - center).abs() <= STEP,
            "apex {} expected {}",
            peak.apex_time,
            center
        );
        let expected_fwhm = 2.0 * sigma * (2.0 * 2f64.ln()).sqrt();
        assert!(
            (peak.fwhm - expected_fwhm).abs() < 1e-2 * expected_fwhm,
            "fwhm {} expected {}",
            peak.fwhm,
            expected_fwhm
        );
    }
}

#[test]
fn test_detected_peaks_do_not_overlap() {
    // two partially merged peaks
    let trace = chromatogram(&[(900.0, 30.0, 0.5), (500.0, 31.6, 0.5)], &[5.0]);
    let config = AnalysisConfig::default();
    let detection = PeakDetector::new(&config.window, &config.background, &config.peaks)
        .detect(&trace)
        .unwrap();

    assert!(detection.peaks.len() >= 2);
    for pair in detection.peaks.windows(2) {
        assert!(pair[0].apex_time <= pair[1].apex_time);
        assert!(pair[0].end_time().unwrap() < pair[1].start_time().unwrap());
    }

    let mut again = detection.peaks.clone();
    assert_eq!(resolve_overlaps(&mut again), 0);
    assert_eq!(again, detection.peaks);
}

#[test]
fn test_detection_honours_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chromapeak.toml");
    std::fs::write(
        &path,
        "[window]\nstart = 25.0\nend = 60.0\n\n[background]\nmethod = \"noban\"\nnoise = \"mm\"\n",
    )
    .unwrap();
    let config = AnalysisConfig::from_file(&path).unwrap();

    let trace = chromatogram(&COMPONENTS, &[5.0]);
    let detection = PeakDetector::new(&config.window, &config.background, &config.peaks)
        .detect(&trace)
        .unwrap();

    // the peak at 22 lies outside the window
    assert_eq!(detection.peaks.len(), 2);
    assert!((detection.background.background - 5.0).abs() < 1e-6);
}
