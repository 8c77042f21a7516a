use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use chromapeak::baseline::correct_baseline;
use chromapeak::trace::{read_tsv, write_tsv};

use super::config;

/// Baseline-correct a trace
pub fn run(
    input: PathBuf,
    output: PathBuf,
    config_path: Option<PathBuf>,
    order: Option<usize>,
    points: Option<usize>,
) -> Result<()> {
    let mut config = config::load(config_path.as_deref())?;
    if let Some(order) = order {
        config.baseline.order = order;
    }
    if let Some(points) = points {
        config.baseline.points = points;
    }
    let config = config::checked(config)?;

    let trace = read_tsv(&input)
        .with_context(|| format!("Failed to read trace: {}", input.display()))?;
    let corrected = correct_baseline(&trace, &config.window, &config.baseline)
        .with_context(|| format!("Baseline correction failed for {}", input.display()))?;
    write_tsv(&corrected, &output, config.output.decimals)
        .with_context(|| format!("Failed to write trace: {}", output.display()))?;

    info!("Wrote baseline-corrected trace to {}", output.display());
    Ok(())
}
