use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use chromapeak::calibration::{calibrate_trace, read_reference_list, CandidateOutcome};
use chromapeak::trace::{read_tsv, write_tsv};

use super::config;

/// `calibrated_<file name>` next to the input
fn default_output(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trace.txt".to_string());
    input.with_file_name(format!("calibrated_{}", name))
}

/// Calibrate the time axis of a trace against a reference list
pub fn run(
    input: PathBuf,
    references: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    interpolate: bool,
    json: bool,
) -> Result<()> {
    let mut config = config::load(config_path.as_deref())?;
    if interpolate {
        config.calibration.use_interpolation = true;
    }

    let trace = read_tsv(&input)
        .with_context(|| format!("Failed to read trace: {}", input.display()))?;
    let references = read_reference_list(&references)
        .with_context(|| format!("Failed to read reference list: {}", references.display()))?;

    let calibration = calibrate_trace(
        &trace,
        &references,
        &config.window,
        &config.background,
        &config.calibration,
    )
    .with_context(|| format!("Calibration failed for {}", input.display()))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&calibration.selection.candidates)
                .context("Failed to serialize candidate log")?
        );
    } else {
        println!("Time pairs: {}", calibration.pairs.len());
        for candidate in &calibration.selection.candidates {
            let rms = candidate
                .rms
                .map_or_else(|| "-".to_string(), |r| format!("{:.6}", r));
            let outcome = match &candidate.outcome {
                CandidateOutcome::Accepted => "accepted".to_string(),
                CandidateOutcome::NotImproved => "not improved".to_string(),
                CandidateOutcome::NonMonotone => "not monotone".to_string(),
                CandidateOutcome::FitFailed(msg) => format!("fit failed: {}", msg),
            };
            println!("  {:<60} RMS {:<12} {}", candidate.model.to_string(), rms, outcome);
        }
        println!("Calibration: {}", calibration.selection.function.describe());
    }

    let output = output.unwrap_or_else(|| default_output(&input));
    write_tsv(&calibration.trace, &output, config.output.decimals)
        .with_context(|| format!("Failed to write trace: {}", output.display()))?;
    info!("Wrote calibrated trace to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_name() {
        assert_eq!(
            default_output(Path::new("data/run01.txt")),
            PathBuf::from("data/calibrated_run01.txt")
        );
    }
}
