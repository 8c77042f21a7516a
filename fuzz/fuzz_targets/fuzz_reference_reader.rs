#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Malformed rows are skipped; whatever survives must be usable
    if let Ok(references) = chromapeak::calibration::read_reference_from(Cursor::new(data)) {
        for reference in &references {
            assert!(reference.expected_time.is_finite());
            assert!(reference.window.is_finite());
        }
    }
});
