use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use std::path::PathBuf;

use chromapeak::batch::{run_batch, write_summary_file, BatchJob, BatchReport};
use chromapeak::calibration::read_reference_list;

use super::config;

/// Run the per-file pipeline over many traces
pub fn run(
    files: Vec<PathBuf>,
    references: Option<PathBuf>,
    analytes: Option<PathBuf>,
    output_dir: PathBuf,
    config_path: Option<PathBuf>,
    workers: Option<usize>,
    no_baseline: bool,
) -> Result<()> {
    let mut config = config::load(config_path.as_deref())?;
    if let Some(workers) = workers {
        config.batch.workers = workers;
    }
    if no_baseline {
        config.baseline.enabled = false;
    }

    let read_list = |path: Option<PathBuf>| -> Result<_> {
        path.map(|p| {
            read_reference_list(&p)
                .with_context(|| format!("Failed to read peak list: {}", p.display()))
        })
        .transpose()
    };
    let job = BatchJob {
        references: read_list(references)?,
        analytes: read_list(analytes)?,
        output_dir: Some(output_dir.clone()),
    };

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;
    let start = Utc::now();
    let outcomes = run_batch(&files, &config, &job).context("Batch processing failed")?;

    let report = BatchReport::from_outcomes(&outcomes, &job);
    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }
    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    if job.analytes.is_some() {
        let analyses: Vec<_> = outcomes.iter().filter_map(|o| o.result.as_ref().ok()).collect();
        let path = write_summary_file(&output_dir, &analyses, &config, &start)
            .context("Failed to write summary")?;
        println!("Summary written to {}", path.display());
    }

    let elapsed = Utc::now() - start;
    info!(
        "Batch finished in {:.1} s",
        elapsed.num_milliseconds() as f64 / 1000.0
    );

    // Exit with error code if any file failed
    if report.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
