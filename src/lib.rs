//! # chromapeak - Chromatogram Trace Analysis
//!
//! `chromapeak` analyses chromatography traces (ordered time/intensity
//! samples): it estimates background and noise, corrects baseline drift,
//! deconvolves peaks into Gaussians and calibrates retention times against
//! a list of reference peaks.
//!
//! ## Key Features
//!
//! - **Background and noise**: NOBAN (iterative percentile convergence) and
//!   MT (minimum-mean sliding window) estimators.
//!
//! - **Peak detection**: iterative fit/subtract Gaussian deconvolution driven
//!   by an explicit state machine, with proportional overlap resolution.
//!
//! - **Baseline correction**: low-order polynomial through chunk minima.
//!
//! - **Retention-time calibration**: automatic selection between
//!   polynomials, a power law and monotone interpolants, always monotone over
//!   the trace.
//!
//! - **Quantitation and batches**: per-analyte areas, S/N and Gaussian peak
//!   quality, processed in parallel over many files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chromapeak::prelude::*;
//!
//! let config = AnalysisConfig::default();
//! let trace = read_tsv("run01.txt")?;
//! let trace = correct_baseline(&trace, &config.window, &config.baseline)?;
//!
//! let detection = PeakDetector::new(&config.window, &config.background, &config.peaks)
//!     .detect(&trace)?;
//! println!("{} peaks", detection.peaks.len());
//!
//! let references = read_reference_list("calibrants.ref")?;
//! let calibration = calibrate_trace(
//!     &trace,
//!     &references,
//!     &config.window,
//!     &config.background,
//!     &config.calibration,
//! )?;
//! write_tsv(&calibration.trace, "calibrated_run01.txt", config.output.decimals)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`trace`]: the immutable [`Trace`](trace::Trace), TSV I/O and smoothing
//! - [`numeric`]: Gaussian, polynomial, spline and interpolant models and solvers
//! - [`noise`]: background and noise estimation
//! - [`baseline`]: baseline detection and correction
//! - [`peaks`]: peak detection, overlap resolution, calibrant selection
//! - [`calibration`]: reference lists, time pairs and model selection
//! - [`quantitation`]: per-analyte measurements and their export
//! - [`batch`]: parallel per-file pipeline, reports and summaries
//! - [`config`]: the TOML analysis configuration

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod baseline;
pub mod batch;
pub mod calibration;
pub mod config;
pub mod noise;
pub mod numeric;
pub mod peaks;
pub mod quantitation;
pub mod trace;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::baseline::{
        correct_baseline, detect_baseline, BaselineConfig, BaselineError, BaselineModel,
    };
    pub use crate::batch::{run_batch, BatchJob, BatchReport, FileOutcome, PipelineError};
    pub use crate::calibration::{
        calibrate_trace, read_reference_list, CalibrationConfig, CalibrationError,
        CalibrationFunction, CalibrationModelSelector, ReferencePeak, TimePair,
    };
    pub use crate::config::{AnalysisConfig, AnalysisWindow, ConfigError};
    pub use crate::noise::{BackgroundConfig, BackgroundMethod, NobanResult, NoiseMode};
    pub use crate::peaks::{
        resolve_overlaps, select_calibrants, Detection, DetectionState, Peak, PeakConfig,
        PeakDetector, PeakError,
    };
    pub use crate::quantitation::{QuantitationResult, Quantifier};
    pub use crate::trace::{read_tsv, write_tsv, Trace, TraceError};
}
