use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::prelude::*;

use super::PipelineError;
use crate::baseline::correct_baseline;
use crate::calibration::{calibrate_trace, ModelSelection, ReferencePeak, TimePair};
use crate::config::AnalysisConfig;
use crate::quantitation::{write_results_file, QuantitationResult, Quantifier};
use crate::trace::{read_tsv, write_tsv, Trace};

/// Inputs shared by every file of a batch
#[derive(Debug, Clone, Default)]
pub struct BatchJob {
    /// Calibrant list; calibration is skipped when absent
    pub references: Option<Vec<ReferencePeak>>,
    /// Analyte list; quantitation is skipped when absent
    pub analytes: Option<Vec<ReferencePeak>>,
    /// Directory for per-file outputs; nothing is written when absent
    pub output_dir: Option<PathBuf>,
}

/// Calibration applied to a file
#[derive(Debug, Clone)]
pub struct AppliedCalibration {
    /// Time pairs the model was fitted to
    pub pairs: Vec<TimePair>,
    /// Selected model
    pub selection: ModelSelection,
}

/// Everything the pipeline produced for one chromatogram
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    /// File stem, used as row label in summaries
    pub name: String,
    /// Final trace after the enabled steps
    pub trace: Trace,
    /// Whether the baseline was corrected
    pub baseline_corrected: bool,
    /// Calibration, if a calibrant list was given
    pub calibration: Option<AppliedCalibration>,
    /// Quantitation rows, empty without an analyte list
    pub results: Vec<QuantitationResult>,
}

/// Result of one file of a batch
#[derive(Debug)]
pub struct FileOutcome {
    /// Input path
    pub path: PathBuf,
    /// Analysis or the error that stopped it
    pub result: Result<FileAnalysis, PipelineError>,
}

/// Run the enabled steps on an in-memory trace
///
/// Baseline correction (if enabled) runs first, then calibration against
/// `references`, then quantitation of `analytes` on the calibrated trace.
pub fn analyze_trace(
    name: impl Into<String>,
    trace: &Trace,
    config: &AnalysisConfig,
    references: Option<&[ReferencePeak]>,
    analytes: Option<&[ReferencePeak]>,
) -> Result<FileAnalysis, PipelineError> {
    let name = name.into();
    let mut current = if config.baseline.enabled {
        correct_baseline(trace, &config.window, &config.baseline)?
    } else {
        trace.clone()
    };

    let calibration = match references {
        Some(references) => {
            let calibration = calibrate_trace(
                &current,
                references,
                &config.window,
                &config.background,
                &config.calibration,
            )?;
            current = calibration.trace;
            Some(AppliedCalibration {
                pairs: calibration.pairs,
                selection: calibration.selection,
            })
        }
        None => None,
    };

    let results = match analytes {
        Some(analytes) => Quantifier::new(&config.window, &config.background, &config.peaks)
            .quantify(&current, analytes)?,
        None => Vec::new(),
    };

    Ok(FileAnalysis {
        name,
        trace: current,
        baseline_corrected: config.baseline.enabled,
        calibration,
        results,
    })
}

/// Read, analyse and (optionally) write the outputs of one file
///
/// Outputs are `calibrated_<stem>.txt` (when calibrated), `<stem>.raw`
/// (quantitation rows) and `<stem>.cal` (calibration description).
pub fn analyze_file(
    path: &Path,
    config: &AnalysisConfig,
    job: &BatchJob,
) -> Result<FileAnalysis, PipelineError> {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let trace = read_tsv(path)?;
    let analysis = analyze_trace(
        name,
        &trace,
        config,
        job.references.as_deref(),
        job.analytes.as_deref(),
    )?;

    if let Some(dir) = &job.output_dir {
        write_outputs(dir, &analysis, config, job.analytes.is_some())?;
    }
    Ok(analysis)
}

fn write_outputs(
    dir: &Path,
    analysis: &FileAnalysis,
    config: &AnalysisConfig,
    quantified: bool,
) -> Result<(), PipelineError> {
    if let Some(calibration) = &analysis.calibration {
        write_tsv(
            &analysis.trace,
            dir.join(format!("calibrated_{}.txt", analysis.name)),
            config.output.decimals,
        )?;
        let mut cal = BufWriter::new(File::create(dir.join(format!("{}.cal", analysis.name)))?);
        writeln!(cal, "{}", calibration.selection.function.describe())?;
        cal.flush()?;
    }
    if quantified {
        write_results_file(&analysis.results, dir.join(format!("{}.raw", analysis.name)))?;
    }
    Ok(())
}

/// Analyse `paths` on a pool of `config.batch.workers` threads
///
/// Every file gets its own [`FileOutcome`] in input order; a failing file
/// never stops the others. Only a pool that cannot be built is an error.
pub fn run_batch(
    paths: &[PathBuf],
    config: &AnalysisConfig,
    job: &BatchJob,
) -> Result<Vec<FileOutcome>, PipelineError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.batch.workers)
        .build()?;
    info!(
        "Processing {} files on {} workers",
        paths.len(),
        pool.current_num_threads()
    );

    let outcomes: Vec<FileOutcome> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let result = analyze_file(path, config, job);
                if let Err(e) = &result {
                    warn!("{}: {}", path.display(), e);
                }
                FileOutcome {
                    path: path.clone(),
                    result,
                }
            })
            .collect()
    });

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!("Batch finished: {} succeeded, {} failed", outcomes.len() - failed, failed);
    Ok(outcomes)
}
