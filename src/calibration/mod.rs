//! # Retention-Time Calibration
//!
//! Reference peaks (`label`, expected time, search window) are located in a
//! trace to form [`TimePair`]s. The [`CalibrationModelSelector`] then fits a
//! series of monotone candidate transforms and keeps the simplest one that
//! fits well enough; the trace time axis is remapped through it.
//!
//! ```rust,no_run
//! use chromapeak::calibration::{calibrate_trace, read_reference_list};
//! use chromapeak::config::AnalysisConfig;
//! use chromapeak::trace::read_tsv;
//!
//! let config = AnalysisConfig::default();
//! let trace = read_tsv("run01.txt")?;
//! let references = read_reference_list("calibrants.ref")?;
//! let calibration = calibrate_trace(
//!     &trace,
//!     &references,
//!     &config.window,
//!     &config.background,
//!     &config.calibration,
//! )?;
//! println!("{}", calibration.selection.function.describe());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod function;
mod pairs;
mod reference;
mod selector;

#[cfg(test)]
mod tests;

use log::info;

use crate::config::AnalysisWindow;
use crate::noise::BackgroundConfig;
use crate::trace::Trace;

pub use config::CalibrationConfig;
pub use error::CalibrationError;
pub use function::{CalibrationFunction, MONOTONICITY_SAMPLES};
pub use pairs::{determine_time_pairs, TimePair};
pub use reference::{parse_reference, read_reference_from, read_reference_list, ReferencePeak};
pub use selector::{
    CalibrationModelSelector, CandidateModel, CandidateOutcome, CandidateReport, ModelSelection,
};

/// A calibrated trace with the evidence behind it
#[derive(Debug, Clone)]
pub struct Calibration {
    /// Trace with remapped time axis
    pub trace: Trace,
    /// Time pairs the model was fitted to
    pub pairs: Vec<TimePair>,
    /// Selected model
    pub selection: ModelSelection,
}

/// Calibrate the time axis of `trace` against `references`
///
/// Fails with `InsufficientData` when fewer than `calibration.min_peaks`
/// reference peaks pass the signal-to-noise filter.
pub fn calibrate_trace(
    trace: &Trace,
    references: &[ReferencePeak],
    window: &AnalysisWindow,
    background: &BackgroundConfig,
    calibration: &CalibrationConfig,
) -> Result<Calibration, CalibrationError> {
    let pairs = determine_time_pairs(trace, references, window, background, calibration.min_peak_sn)?;
    let required = calibration.min_peaks.max(2);
    if pairs.len() < required {
        return Err(CalibrationError::InsufficientData {
            required,
            available: pairs.len(),
        });
    }

    let (min, max) = trace.time_bounds().ok_or(CalibrationError::InsufficientData {
        required,
        available: 0,
    })?;
    let selection = CalibrationModelSelector::new(calibration)
        .select(&pairs, min, max)?
        .ok_or(CalibrationError::InsufficientData {
            required,
            available: 0,
        })?;

    let calibrated = trace.map_time(|t| selection.function.evaluate(t))?;
    info!(
        "Calibrated with {} time pairs: {}",
        pairs.len(),
        selection.function.describe()
    );

    Ok(Calibration {
        trace: calibrated,
        pairs,
        selection,
    })
}
