use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use chromapeak::trace::{read_tsv, write_tsv};

use super::config;

/// Savitzky-Golay smooth a trace
pub fn run(
    input: PathBuf,
    output: PathBuf,
    config_path: Option<PathBuf>,
    window_length: Option<usize>,
    order: Option<usize>,
) -> Result<()> {
    let mut config = config::load(config_path.as_deref())?;
    if let Some(window_length) = window_length {
        config.smoothing.window_length = window_length;
    }
    if let Some(order) = order {
        config.smoothing.order = order;
    }
    let config = config::checked(config)?;

    let trace = read_tsv(&input)
        .with_context(|| format!("Failed to read trace: {}", input.display()))?;
    let smoothed = trace
        .smooth(config.smoothing.window_length, config.smoothing.order)
        .context("Smoothing failed")?;
    write_tsv(&smoothed, &output, config.output.decimals)
        .with_context(|| format!("Failed to write trace: {}", output.display()))?;

    info!("Wrote smoothed trace to {}", output.display());
    Ok(())
}
