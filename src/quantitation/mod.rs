//! # Quantitation
//!
//! Integrates every peak of an analyte list in a (usually calibrated) trace.
//! For each [`ReferencePeak`] the samples within `expected ± window` are
//! integrated against the local background of `expected ± background.window`
//! (clipped to the analysis window), and a Gaussian is fitted to the dominant
//! segment of the region to judge peak shape.
//!
//! Areas use the spacing to the previous sample of the whole trace, so the
//! first sample of a trace contributes nothing.

mod error;
mod export;


use std::ops::Range;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::calibration::ReferencePeak;
use crate::config::AnalysisWindow;
use crate::noise::{self, BackgroundConfig};
use crate::numeric::{stats, FitError, Gaussian};
use crate::peaks::{segment, PeakConfig};
use crate::trace::Trace;

pub use error::QuantitationError;
pub use export::{write_results, write_results_file, RESULTS_HEADER};

/// Fewest samples a Gaussian is fitted to
const MIN_FIT_SAMPLES: usize = 3;

/// Measurements of one reference peak
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitationResult {
    /// Label from the analyte list
    pub label: String,
    /// Expected retention time from the analyte list
    pub expected_time: f64,
    /// Background-subtracted area, `Σ max(y - background, 0)·Δt`
    pub area: f64,
    /// Area of the raw intensities, `Σ max(y, 0)·Δt`
    pub raw_area: f64,
    /// Area under the background level, `Σ max(background, 0)·Δt`
    pub background_area: f64,
    /// Signal-to-noise of the highest sample
    pub signal_to_noise: f64,
    /// Local background
    pub background: f64,
    /// Local noise
    pub noise: f64,
    /// Population standard deviation of the integration window
    pub peak_noise: f64,
    /// Gaussian area over background-subtracted area, capped at 1
    pub gaussian_residual: Option<f64>,
    /// Centre of the fitted Gaussian
    pub peak_time: Option<f64>,
    /// FWHM of the fitted Gaussian
    pub fwhm: Option<f64>,
}

/// Integrates analyte peaks in one trace
#[derive(Debug, Clone, Copy)]
pub struct Quantifier<'a> {
    window: &'a AnalysisWindow,
    background: &'a BackgroundConfig,
    peaks: &'a PeakConfig,
}

impl<'a> Quantifier<'a> {
    /// Quantifier using the analysis window, background settings and the
    /// detection grid density of `peaks`
    pub fn new(
        window: &'a AnalysisWindow,
        background: &'a BackgroundConfig,
        peaks: &'a PeakConfig,
    ) -> Self {
        Self {
            window,
            background,
            peaks,
        }
    }

    /// Quantify every analyte of `references` in `trace`
    ///
    /// Analytes whose integration window or background region holds no
    /// samples are skipped with a warning.
    pub fn quantify(
        &self,
        trace: &Trace,
        references: &[ReferencePeak],
    ) -> Result<Vec<QuantitationResult>, QuantitationError> {
        let mut results = Vec::with_capacity(references.len());
        for reference in references {
            if let Some(result) = self.quantify_peak(trace, reference)? {
                results.push(result);
            }
        }
        info!("Quantified {} of {} analytes", results.len(), references.len());
        Ok(results)
    }

    /// Quantify a single analyte; `None` when it cannot be located
    pub fn quantify_peak(
        &self,
        trace: &Trace,
        reference: &ReferencePeak,
    ) -> Result<Option<QuantitationResult>, QuantitationError> {
        let time = trace.time();
        let intensity = trace.intensity();

        let peak = trace.index_range(
            reference.expected_time - reference.window,
            reference.expected_time + reference.window,
        );
        let Some(apex) = stats::max_value(&intensity[peak.clone()]) else {
            warn!(
                "No samples around {} ({:.2}), skipping",
                reference.label, reference.expected_time
            );
            return Ok(None);
        };

        let region = self.window.clip(
            reference.expected_time - self.background.window,
            reference.expected_time + self.background.window,
        );
        let region = trace.index_range(region.start, region.end);
        if region.is_empty() {
            warn!(
                "No background samples for {} inside the analysis window, skipping",
                reference.label
            );
            return Ok(None);
        }
        let estimate = noise::estimate(&intensity[region], self.background)?;
        let bg = estimate.background;

        let step = |i: usize| if i == 0 { 0.0 } else { time[i] - time[i - 1] };
        let integrate = |f: &dyn Fn(usize) -> f64| -> f64 {
            peak.clone().map(|i| f(i).max(0.0) * step(i)).sum()
        };
        let raw_area = integrate(&|i| intensity[i]);
        let background_area = integrate(&|_| bg);
        let area = integrate(&|i| intensity[i] - bg);

        let gaussian = match self.fit(trace, peak.clone(), bg) {
            Ok(g) => Some(g),
            Err(e) => {
                debug!("No Gaussian for {}: {}", reference.label, e);
                None
            }
        };
        let gaussian_residual = gaussian.and_then(|g| {
            let gaussian_area = integrate(&|i| g.evaluate(time[i]));
            if gaussian_area != 0.0 && area != 0.0 {
                Some((gaussian_area / area).min(1.0))
            } else {
                None
            }
        });

        Ok(Some(QuantitationResult {
            label: reference.label.clone(),
            expected_time: reference.expected_time,
            area,
            raw_area,
            background_area,
            signal_to_noise: estimate.signal_to_noise(apex),
            background: bg,
            noise: estimate.noise,
            peak_noise: stats::std_dev(&intensity[peak]).unwrap_or(0.0),
            gaussian_residual,
            peak_time: gaussian.map(|g| g.center),
            fwhm: gaussian.map(|g| g.fwhm()),
        }))
    }

    /// Gaussian fitted to the dominant segment of the resampled window
    fn fit(&self, trace: &Trace, range: Range<usize>, background: f64) -> Result<Gaussian, FitError> {
        let x = &trace.time()[range.clone()];
        let y = &trace.intensity()[range];
        if x.len() < MIN_FIT_SAMPLES {
            return Err(FitError::InsufficientData {
                required: MIN_FIT_SAMPLES,
                available: x.len(),
            });
        }

        let grid = stats::linspace(
            x[0],
            x[x.len() - 1],
            (x.len() - 1) * self.peaks.oversampling.max(1) + 1,
        );
        let (values, derivative) = segment::resample(x, y, &grid)?;
        let segments = segment::segments(values.len(), &segment::breakpoints(&derivative));
        let dominant = segment::dominant_segment(&values, &segments).ok_or(
            FitError::InsufficientData {
                required: MIN_FIT_SAMPLES,
                available: 0,
            },
        )?;

        let target: Vec<f64> = values[dominant.clone()]
            .iter()
            .map(|v| v - background)
            .collect();
        segment::fit_peak(&grid[dominant], &target)
    }
}
