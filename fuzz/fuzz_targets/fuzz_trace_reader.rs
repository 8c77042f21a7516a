#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use chromapeak::prelude::*;

fuzz_target!(|data: &[u8]| {
    // Any byte soup must parse or fail with an error, never panic
    let Ok(trace) = chromapeak::trace::read_tsv_from(Cursor::new(data)) else {
        return;
    };

    // A parsed trace is strictly increasing in time, so detection must not panic either
    let config = AnalysisConfig::default();
    let _ = PeakDetector::new(&config.window, &config.background, &config.peaks).detect(&trace);
});
