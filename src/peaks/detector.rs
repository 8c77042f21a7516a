use log::{debug, info};

use super::overlap::resolve_overlaps;
use super::segment::{
    breakpoints, dominant_segment, first_pass_maximum, fit_peak, resample, segments,
};
use super::state::{DetectionState, StagnationReason, StoppingRule};
use super::{EdgePolicy, Peak, PeakConfig, PeakError};
use crate::config::AnalysisWindow;
use crate::noise::{self, BackgroundConfig, NobanResult};
use crate::numeric::{stats, Gaussian};
use crate::trace::Trace;

/// Fewest window samples the detector accepts
const MIN_SAMPLES: usize = 3;

/// Outcome of one detection run
#[derive(Debug, Clone)]
pub struct Detection {
    /// Detected peaks, ordered by apex time, overlaps resolved
    pub peaks: Vec<Peak>,
    /// Background and noise of the analysis window
    pub background: NobanResult,
    /// Height above background below which detection stops
    pub cutoff: f64,
    /// Fit/subtract iterations performed
    pub iterations: usize,
    /// Final state of the loop
    pub state: DetectionState,
    /// Fitted peaks dropped because trimming left no samples
    pub dropped: usize,
    /// Adjacent pairs truncated by overlap resolution
    pub overlaps_resolved: usize,
}

/// Iterative Gaussian deconvolution over the analysis window of a trace
///
/// Each iteration interpolates the working intensities on a uniform grid,
/// splits the grid at the extrema of the first derivative, fits a Gaussian to
/// the segment holding the highest point, records the trimmed curve and
/// subtracts the Gaussian from the working intensities.
#[derive(Debug, Clone, Copy)]
pub struct PeakDetector<'a> {
    window: &'a AnalysisWindow,
    background: &'a BackgroundConfig,
    config: &'a PeakConfig,
}

impl<'a> PeakDetector<'a> {
    /// Detector for one analysis window
    pub fn new(
        window: &'a AnalysisWindow,
        background: &'a BackgroundConfig,
        config: &'a PeakConfig,
    ) -> Self {
        Self {
            window,
            background,
            config,
        }
    }

    /// Detect peaks in `trace`
    pub fn detect(&self, trace: &Trace) -> Result<Detection, PeakError> {
        let windowed = trace.window(self.window.start, self.window.end);
        if windowed.len() < MIN_SAMPLES {
            return Err(PeakError::InsufficientData {
                required: MIN_SAMPLES,
                available: windowed.len(),
            });
        }

        let background = noise::estimate(windowed.intensity(), self.background)?;
        let x = windowed.time();
        let mut working = windowed.intensity().to_vec();
        let grid = stats::linspace(
            x[0],
            x[x.len() - 1],
            (x.len() - 1) * self.config.oversampling.max(1) + 1,
        );

        let first = resample(x, &working, &grid)?;
        let first_max = first_pass_maximum(&first.0, &breakpoints(&first.1));
        let cutoff =
            self.config.detection_min * (first_max - background.background.max(0.0));
        let rule = StoppingRule {
            background: background.background,
            cutoff,
            max_iterations: self.config.max_peaks,
        };
        debug!(
            "Detection window {}..{}: background {:.4}, noise {:.4}, cutoff {:.4}",
            self.window.start, self.window.end, background.background, background.noise, cutoff
        );

        let mut state = rule.initial(working_max(&working));
        let mut cached = Some(first);
        let mut peaks = Vec::new();
        let mut iterations = 0;
        let mut dropped = 0;

        while state == DetectionState::Searching {
            iterations += 1;
            let (values, derivative) = match cached.take() {
                Some(resampled) => resampled,
                None => resample(x, &working, &grid)?,
            };

            let segs = segments(values.len(), &breakpoints(&derivative));
            let Some(range) = dominant_segment(&values, &segs) else {
                state = DetectionState::Stagnated(StagnationReason::NoImprovement);
                break;
            };
            let seg_x = &grid[range.clone()];
            let seg_y: Vec<f64> = values[range]
                .iter()
                .map(|v| v - background.background)
                .collect();

            let gaussian = match fit_peak(seg_x, &seg_y) {
                Ok(gaussian) => gaussian,
                Err(e) => {
                    debug!("Iteration {}: Gaussian fit failed: {}", iterations, e);
                    state = DetectionState::Failed(e);
                    break;
                }
            };

            match self.trim(&grid, &gaussian) {
                Ok(peak) => {
                    debug!(
                        "Iteration {}: peak at {:.4} (FWHM {:.4})",
                        iterations, peak.apex_time, peak.fwhm
                    );
                    peaks.push(peak);
                }
                Err(e) => {
                    debug!("Iteration {}: dropped: {}", iterations, e);
                    dropped += 1;
                }
            }

            let previous_max = working_max(&working);
            for (w, &t) in working.iter_mut().zip(x) {
                *w -= gaussian.evaluate(t);
            }
            state = rule.after_subtraction(iterations, previous_max, working_max(&working));
        }

        peaks.sort_by(|a, b| a.apex_time.total_cmp(&b.apex_time));
        let overlaps_resolved = resolve_overlaps(&mut peaks);

        info!(
            "Detected {} peaks in {} iterations ({:?})",
            peaks.len(),
            iterations,
            state
        );

        Ok(Detection {
            peaks,
            background,
            cutoff,
            iterations,
            state,
            dropped,
            overlaps_resolved,
        })
    }

    /// Render `gaussian` on the grid points kept by the edge policy
    fn trim(&self, grid: &[f64], gaussian: &Gaussian) -> Result<Peak, PeakError> {
        let half = match self.config.edge {
            EdgePolicy::Fwhm => gaussian.fwhm(),
            EdgePolicy::Sigma => self.config.edge_value * gaussian.sigma,
        };
        let lo = stats::bisect_left(grid, gaussian.center - half);
        let hi = stats::bisect_right(grid, gaussian.center + half);
        if lo >= hi {
            return Err(PeakError::EmptyTrimmedPeak {
                center: gaussian.center,
            });
        }

        let samples: Vec<(f64, f64)> = grid[lo..hi]
            .iter()
            .map(|&t| (t, gaussian.evaluate(t)))
            .collect();
        Ok(Peak::from_gaussian(samples, *gaussian))
    }
}

fn working_max(values: &[f64]) -> f64 {
    stats::max_value(values).unwrap_or(f64::NEG_INFINITY)
}
