//! Annotate a reference run, calibrate a shifted run against it and check
//! the calibrated peaks land on the reference times.

mod common;

use chromapeak::peaks::{select_calibrants, write_annotation_file};
use chromapeak::prelude::*;
use common::calibrant_run;

#[test]
fn test_annotation_drives_calibration() {
    let dir = tempfile::tempdir().unwrap();
    let config = AnalysisConfig::default();
    let detector = PeakDetector::new(&config.window, &config.background, &config.peaks);

    // reference run: annotate four calibrants
    let reference = calibrant_run(0.0);
    let detection = detector.detect(&reference).unwrap();
    let calibrants = select_calibrants(&detection.peaks, config.peaks.min_peaks);
    assert_eq!(calibrants.len(), 4);
    let annotation = dir.path().join("calibrants.ref");
    write_annotation_file(&calibrants, &annotation).unwrap();

    let references = read_reference_list(&annotation).unwrap();
    assert_eq!(references.len(), 4);
    assert_eq!(references[0].label, "15.00");

    // shifted run, round-tripped through the TSV format
    let run_path = dir.path().join("run02.txt");
    write_tsv(&calibrant_run(0.3), &run_path, config.output.decimals).unwrap();
    let run = read_tsv(&run_path).unwrap();

    let calibration = calibrate_trace(
        &run,
        &references,
        &config.window,
        &config.background,
        &config.calibration,
    )
    .unwrap();
    assert_eq!(calibration.pairs.len(), 4);
    let (min, max) = run.time_bounds().unwrap();
    assert!(calibration.selection.function.is_monotone(min, max));

    let calibrated_path = dir.path().join("calibrated_run02.txt");
    write_tsv(&calibration.trace, &calibrated_path, config.output.decimals).unwrap();
    let calibrated = read_tsv(&calibrated_path).unwrap();

    let recalibrated = detector.detect(&calibrated).unwrap();
    assert_eq!(recalibrated.peaks.len(), 4);
    for (peak, expected) in recalibrated.peaks.iter().zip([15.0, 25.0, 35.0, 45.0]) {
        assert!(
            (peak.apex_time - expected).abs() < 0.06,
            "apex {} expected {}",
            peak.apex_time,
            expected
        );
    }
}

#[test]
fn test_too_few_calibrants_is_an_error() {
    let config = AnalysisConfig::default();
    let references = vec![
        ReferencePeak::new("a", 15.0, 0.5),
        ReferencePeak::new("b", 25.0, 0.5),
        // nothing elutes here
        ReferencePeak::new("c", 55.0, 0.5),
    ];
    let err = calibrate_trace(
        &calibrant_run(0.0),
        &references,
        &config.window,
        &config.background,
        &config.calibration,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CalibrationError::InsufficientData {
            required: 4,
            available: 2
        }
    ));
}
