//! Reference peak lists: `label\texpected_time\twindow` rows.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use super::CalibrationError;

/// A peak the calibration or quantitation looks for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePeak {
    /// Opaque user label
    pub label: String,
    /// Expected retention time
    pub expected_time: f64,
    /// Half-width of the search window around the expected time
    pub window: f64,
}

impl ReferencePeak {
    /// Reference peak from its three fields
    pub fn new(label: impl Into<String>, expected_time: f64, window: f64) -> Self {
        Self {
            label: label.into(),
            expected_time,
            window,
        }
    }
}

/// Read a reference list file
pub fn read_reference_list<P: AsRef<Path>>(path: P) -> Result<Vec<ReferencePeak>, CalibrationError> {
    let file = File::open(path)?;
    read_reference_from(BufReader::new(file))
}

/// Read a reference list, skipping rows that do not parse
///
/// Skipped rows (headers, comments, truncated lines, invalid UTF-8) are
/// logged at warn level. Only I/O failures abort the read.
pub fn read_reference_from<R: Read>(reader: R) -> Result<Vec<ReferencePeak>, CalibrationError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut peaks = Vec::new();
    for record in csv_reader.byte_records() {
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("Ignoring reference row: {}", e);
                continue;
            }
        };
        match decode_record(record).and_then(|record| parse_reference(&record)) {
            Ok(peak) => peaks.push(peak),
            Err(e) => warn!("Ignoring reference row: {}", e),
        }
    }
    Ok(peaks)
}

fn decode_record(record: csv::ByteRecord) -> Result<csv::StringRecord, CalibrationError> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    csv::StringRecord::from_byte_record(record).map_err(|e| {
        CalibrationError::MalformedReferenceLine {
            line,
            message: e.utf8_error().to_string(),
        }
    })
}

/// Parse one reference row
pub fn parse_reference(record: &csv::StringRecord) -> Result<ReferencePeak, CalibrationError> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let malformed = |message: String| CalibrationError::MalformedReferenceLine { line, message };

    if record.len() < 3 {
        return Err(malformed(format!("expected 3 fields, found {}", record.len())));
    }
    let number = |idx: usize, name: &str| -> Result<f64, CalibrationError> {
        let raw = record[idx].trim();
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(v) => Err(malformed(format!("{} is not finite: {}", name, v))),
            Err(e) => Err(malformed(format!("invalid {} '{}': {}", name, raw, e))),
        }
    };

    Ok(ReferencePeak {
        label: record[0].trim().to_string(),
        expected_time: number(1, "expected time")?,
        window: number(2, "window")?,
    })
}
