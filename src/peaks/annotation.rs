//! Export of detected peaks as a reference list (`Peak\tRT\tWindow`).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::Peak;

/// Header line of an annotation file
pub const ANNOTATION_HEADER: &str = "Peak\tRT\tWindow";

/// Write `peaks` as a reference list
///
/// The label is the apex time, the expected time is the midpoint of the
/// trimmed samples and the window is half their span, all with two decimals.
pub fn write_annotation<W: Write>(peaks: &[Peak], mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "{}", ANNOTATION_HEADER)?;
    for peak in peaks {
        let (Some(start), Some(end)) = (peak.start_time(), peak.end_time()) else {
            continue;
        };
        let window = 0.5 * (end - start);
        let center = start + window;
        writeln!(writer, "{:.2}\t{:.2}\t{:.2}", peak.apex_time, center, window)?;
    }
    writer.flush()
}

/// Write `peaks` as a reference list file
pub fn write_annotation_file<P: AsRef<Path>>(peaks: &[Peak], path: P) -> std::io::Result<()> {
    let file = File::create(path)?;
    write_annotation(peaks, BufWriter::new(file))
}
