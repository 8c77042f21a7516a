use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{QuantitationError, QuantitationResult};
use crate::numeric::format_float;

/// Header row of the per-file results table
pub const RESULTS_HEADER: &str = "Name\tTime\tPeak Area\tS/N\tBackground\tNoise\tGaussian Residual RMS\tPeak Noise\tBackground Area\tPeak Time\tFWHM";

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "NAN".to_string(), format_float)
}

/// Write quantitation results as a tab-separated table
pub fn write_results<W: Write>(
    results: &[QuantitationResult],
    mut writer: W,
) -> Result<(), QuantitationError> {
    writeln!(writer, "{}", RESULTS_HEADER)?;
    for r in results {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            r.label,
            format_float(r.expected_time),
            format_float(r.area),
            format_float(r.signal_to_noise),
            format_float(r.background),
            format_float(r.noise),
            optional(r.gaussian_residual),
            format_float(r.peak_noise),
            format_float(r.background_area),
            optional(r.peak_time),
            optional(r.fwhm),
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write quantitation results to `path`
pub fn write_results_file<P: AsRef<Path>>(
    results: &[QuantitationResult],
    path: P,
) -> Result<(), QuantitationError> {
    let file = File::create(path)?;
    write_results(results, BufWriter::new(file))
}
