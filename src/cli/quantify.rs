use anyhow::{Context, Result};
use log::info;
use std::io;
use std::path::PathBuf;

use chromapeak::calibration::read_reference_list;
use chromapeak::quantitation::{write_results, write_results_file, Quantifier};
use chromapeak::trace::read_tsv;

use super::config;

/// Quantify the analytes of a list in a (calibrated) trace
pub fn run(
    input: PathBuf,
    analytes: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = config::load(config_path.as_deref())?;
    let trace = read_tsv(&input)
        .with_context(|| format!("Failed to read trace: {}", input.display()))?;
    let analytes = read_reference_list(&analytes)
        .with_context(|| format!("Failed to read analyte list: {}", analytes.display()))?;

    let results = Quantifier::new(&config.window, &config.background, &config.peaks)
        .quantify(&trace, &analytes)
        .with_context(|| format!("Quantitation failed for {}", input.display()))?;

    match output {
        Some(output) => {
            write_results_file(&results, &output)
                .with_context(|| format!("Failed to write results: {}", output.display()))?;
            info!("Wrote {} rows to {}", results.len(), output.display());
        }
        None => write_results(&results, io::stdout().lock()).context("Failed to write results")?,
    }
    Ok(())
}
