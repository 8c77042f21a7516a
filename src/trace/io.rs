//! Tab-separated `time\tintensity` import and export.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use super::{Trace, TraceError};

/// Read a trace from a tab-separated file
pub fn read_tsv<P: AsRef<Path>>(path: P) -> Result<Trace, TraceError> {
    let file = File::open(path)?;
    read_tsv_from(BufReader::new(file))
}

/// Read a trace from any reader of `time\tintensity` lines
///
/// Leading lines that do not parse as two numbers (column headers, run
/// descriptions) are skipped. Once the first data line has been seen, any
/// unparsable line is an error. Extra columns are ignored.
pub fn read_tsv_from<R: Read>(reader: R) -> Result<Trace, TraceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut time = Vec::new();
    let mut intensity = Vec::new();
    let mut skipped = 0usize;

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        match parse_pair(&record) {
            Ok((t, i)) => {
                time.push(t);
                intensity.push(i);
            }
            Err(_) if time.is_empty() => skipped += 1,
            Err(message) => return Err(TraceError::ParseError { line, message }),
        }
    }

    if skipped > 0 {
        debug!("Skipped {} header line(s)", skipped);
    }
    Trace::new(time, intensity)
}

fn parse_pair(record: &csv::StringRecord) -> Result<(f64, f64), String> {
    let field = |idx: usize, name: &str| -> Result<f64, String> {
        let raw = record
            .get(idx)
            .ok_or_else(|| format!("missing {} column", name))?;
        raw.parse::<f64>()
            .map_err(|e| format!("invalid {} '{}': {}", name, raw, e))
    };
    Ok((field(0, "time")?, field(1, "intensity")?))
}

/// Write a trace as `time\tintensity` lines with `decimals` places
pub fn write_tsv<P: AsRef<Path>>(trace: &Trace, path: P, decimals: usize) -> Result<(), TraceError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_tsv_to(trace, &mut writer, decimals)?;
    writer.flush()?;
    Ok(())
}

/// Write a trace to any writer as `time\tintensity` lines
pub fn write_tsv_to<W: Write>(trace: &Trace, writer: W, decimals: usize) -> Result<(), TraceError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);

    for (t, i) in trace.iter() {
        csv_writer.write_record([
            format!("{:.*}", decimals, t),
            format!("{:.*}", decimals, i),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}
