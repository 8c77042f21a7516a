//! # Batch Processing
//!
//! Runs the per-file pipeline (baseline correction, calibration,
//! quantitation) over many chromatograms on a fixed-size rayon pool. Files
//! share nothing mutable; each one yields its own [`FileOutcome`], so a
//! failure is reported next to its siblings instead of aborting them.
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use chromapeak::batch::{run_batch, BatchJob, BatchReport};
//! use chromapeak::calibration::read_reference_list;
//! use chromapeak::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::default();
//! let job = BatchJob {
//!     references: Some(read_reference_list("calibrants.ref")?),
//!     analytes: None,
//!     output_dir: Some(PathBuf::from("out")),
//! };
//! let files = vec![PathBuf::from("run01.txt"), PathBuf::from("run02.txt")];
//! let outcomes = run_batch(&files, &config, &job)?;
//! println!("{}", BatchReport::from_outcomes(&outcomes, &job));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod pipeline;
mod report;
mod summary;


pub use config::BatchConfig;
pub use error::PipelineError;
pub use pipeline::{
    analyze_file, analyze_trace, run_batch, AppliedCalibration, BatchJob, FileAnalysis,
    FileOutcome,
};
pub use report::{BatchReport, FileStatus, ReportEntry};
pub use summary::{summary_file_name, write_summary, write_summary_file};
