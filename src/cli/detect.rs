use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use chromapeak::peaks::{select_calibrants, write_annotation_file, PeakDetector};
use chromapeak::trace::read_tsv;

use super::config;

/// Detect peaks and optionally write them (or the calibrant subset) as a reference list
pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    calibrants: bool,
    json: bool,
) -> Result<()> {
    let config = config::load(config_path.as_deref())?;
    let trace = read_tsv(&input)
        .with_context(|| format!("Failed to read trace: {}", input.display()))?;

    info!("Detecting peaks in {}", input.display());
    let detection = PeakDetector::new(&config.window, &config.background, &config.peaks)
        .detect(&trace)
        .with_context(|| format!("Peak detection failed for {}", input.display()))?;

    let peaks = if calibrants {
        select_calibrants(&detection.peaks, config.peaks.min_peaks)
    } else {
        detection.peaks.clone()
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&peaks).context("Failed to serialize peaks")?
        );
    } else {
        println!(
            "Background {:.4}, noise {:.4}, {} iterations ({:?})",
            detection.background.background,
            detection.background.noise,
            detection.iterations,
            detection.state
        );
        println!("Apex\tCenter\tFWHM\tHeight");
        for peak in &peaks {
            println!(
                "{:.4}\t{:.4}\t{:.4}\t{:.2}",
                peak.apex_time,
                peak.center,
                peak.fwhm,
                peak.max_intensity()
            );
        }
    }

    if let Some(output) = output {
        write_annotation(&peaks, &output)?;
    }
    Ok(())
}

fn write_annotation(peaks: &[chromapeak::peaks::Peak], output: &Path) -> Result<()> {
    write_annotation_file(peaks, output)
        .with_context(|| format!("Failed to write annotation: {}", output.display()))?;
    info!("Wrote {} peaks to {}", peaks.len(), output.display());
    Ok(())
}
