//! # Baseline Correction
//!
//! The trace is cut into contiguous chunks of `points` samples. Every chunk
//! lying strictly inside the analysis window contributes its lowest sample as
//! an anchor, and a least-squares polynomial through the anchors models the
//! slow drift. Correction subtracts that polynomial and lifts the result so
//! the window holds no negative intensities.

mod config;
mod error;

#[cfg(test)]
mod tests;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::AnalysisWindow;
use crate::numeric::{stats, Polynomial};
use crate::trace::Trace;

pub use config::BaselineConfig;
pub use error::BaselineError;

/// Fitted baseline and the anchors it was fitted through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineModel {
    polynomial: Polynomial,
    anchors: Vec<(f64, f64)>,
}

impl BaselineModel {
    /// Baseline value at time `t`
    pub fn evaluate(&self, t: f64) -> f64 {
        self.polynomial.evaluate(t)
    }

    /// The fitted polynomial
    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    /// `(time, intensity)` of each chunk minimum used in the fit
    pub fn anchors(&self) -> &[(f64, f64)] {
        &self.anchors
    }
}

/// Fit the baseline polynomial of `trace`
pub fn detect_baseline(
    trace: &Trace,
    window: &AnalysisWindow,
    config: &BaselineConfig,
) -> Result<BaselineModel, BaselineError> {
    if config.points == 0 {
        return Err(BaselineError::ConfigContradiction(
            "baseline chunk size must be at least one sample".to_string(),
        ));
    }
    let chunk_count = (trace.len() + config.points - 1) / config.points;
    if chunk_count <= config.order {
        return Err(BaselineError::ConfigContradiction(format!(
            "baseline order {} needs more than {} chunks of {} samples",
            config.order, chunk_count, config.points
        )));
    }

    let anchors: Vec<(f64, f64)> = trace
        .time()
        .chunks(config.points)
        .zip(trace.intensity().chunks(config.points))
        .filter_map(|(time, intensity)| {
            let first = *time.first()?;
            let last = *time.last()?;
            if first > window.start && last < window.end {
                let lowest = stats::argmin(intensity)?;
                Some((time[lowest], intensity[lowest]))
            } else {
                None
            }
        })
        .collect();

    let required = config.order + 1;
    if anchors.len() < required {
        return Err(BaselineError::InsufficientData {
            required,
            available: anchors.len(),
            order: config.order,
        });
    }

    let (x, y): (Vec<f64>, Vec<f64>) = anchors.iter().copied().unzip();
    let polynomial = Polynomial::fit(&x, &y, config.order)?;
    debug!(
        "Baseline through {} anchors: {}",
        anchors.len(),
        polynomial.describe()
    );

    Ok(BaselineModel {
        polynomial,
        anchors,
    })
}

/// Subtract the detected baseline from `trace` and lift the window to non-negative values
pub fn correct_baseline(
    trace: &Trace,
    window: &AnalysisWindow,
    config: &BaselineConfig,
) -> Result<Trace, BaselineError> {
    let model = detect_baseline(trace, window, config)?;
    let corrected = subtract_baseline(trace, window, &model)?;
    info!(
        "Baseline corrected with order {} polynomial over {} anchors",
        config.order,
        model.anchors().len()
    );
    Ok(corrected)
}

/// Subtract an already fitted baseline and apply the window uplift
pub fn subtract_baseline(
    trace: &Trace,
    window: &AnalysisWindow,
    model: &BaselineModel,
) -> Result<Trace, BaselineError> {
    let mut intensity: Vec<f64> = trace
        .iter()
        .map(|(t, i)| i - model.evaluate(t))
        .collect();

    let range = trace.index_range(window.start, window.end);
    let lowest = intensity[range]
        .iter()
        .copied()
        .fold(0.0_f64, f64::min);
    let offset = lowest.abs();
    if offset > 0.0 {
        intensity.iter_mut().for_each(|v| *v += offset);
    }

    Ok(trace.with_intensity(intensity)?)
}
