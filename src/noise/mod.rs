//! # Background and Noise Estimation
//!
//! Two interchangeable strategies estimate a `(background, noise)` pair from
//! a region of intensities:
//!
//! - **NOBAN**: sorts the region and grows (or, before any growth, shrinks)
//!   a low-intensity background set until the next samples would exceed
//!   `background + 3 * noise`.
//! - **MT**: slides a fixed-length window over the region and keeps the
//!   window with the lowest mean.
//!
//! Both report a noise of `1.0` instead of zero so that signal-to-noise
//! ratios stay finite.

mod config;
mod error;


use log::debug;
use serde::{Deserialize, Serialize};

use crate::numeric::stats;

pub use config::{BackgroundConfig, BackgroundMethod, NoiseMode};
pub use error::NoiseError;

/// Fractions of the remaining samples tried as step sizes, before single steps
const NOBAN_STEPS: [f64; 2] = [0.10, 0.05];

/// Estimated background level and noise amplitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NobanResult {
    /// Mean intensity of the background set
    pub background: f64,
    /// Noise of the background set, never zero
    pub noise: f64,
}

impl NobanResult {
    /// Signal-to-noise ratio of an intensity above this background
    pub fn signal_to_noise(&self, intensity: f64) -> f64 {
        (intensity - self.background) / self.noise
    }

    fn guarded(background: f64, noise: f64) -> Self {
        let noise = if noise == 0.0 { 1.0 } else { noise };
        Self { background, noise }
    }
}

/// Estimate background and noise with the configured strategy
pub fn estimate(region: &[f64], config: &BackgroundConfig) -> Result<NobanResult, NoiseError> {
    match config.method {
        BackgroundMethod::Noban => noban(region, config.noban_start, config.noise),
        BackgroundMethod::Mt => minimum_window(region, config.slice_points, config.noise),
    }
}

fn noise_of(set: &[f64], mode: NoiseMode) -> f64 {
    match mode {
        NoiseMode::Mm => stats::spread(set).unwrap_or(0.0),
        NoiseMode::Rms => stats::std_dev(set).unwrap_or(0.0),
    }
}

/// NOBAN estimate over `region`, starting from the lowest `fraction` of samples
///
/// Growth is tried with steps of 10 % and 5 % of the samples outside the set,
/// then single samples; a step is taken when the last sample it adds stays
/// below `background + 3 * noise`. Shrinking with the same step sizes is only
/// attempted while no growth has happened yet.
pub fn noban(region: &[f64], fraction: f64, mode: NoiseMode) -> Result<NobanResult, NoiseError> {
    if region.is_empty() {
        return Err(NoiseError::EmptyRegion);
    }
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(NoiseError::InvalidParameter(format!(
            "NOBAN start fraction {} outside (0, 1]",
            fraction
        )));
    }

    let mut sorted = region.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();

    let mut size = ((fraction * n as f64).floor() as usize).clamp(1, n);
    let mut background = stats::mean(&sorted[..size]).unwrap_or(0.0);
    let mut noise = noise_of(&sorted[..size], mode);
    let mut grown = false;

    loop {
        let threshold = background + 3.0 * noise;
        let remainder = n - size;
        let steps = step_sizes(remainder);

        let growth = steps
            .iter()
            .copied()
            .find(|&inc| inc >= 1 && size + inc <= n && sorted[size + inc - 1] < threshold);

        let next = match growth {
            Some(inc) => {
                grown = true;
                size + inc
            }
            None if !grown => {
                let shrink = steps
                    .iter()
                    .copied()
                    .find(|&dec| dec >= 1 && size > dec && sorted[size - dec] > threshold);
                match shrink {
                    Some(dec) => size - dec,
                    None => break,
                }
            }
            None => break,
        };

        size = next;
        background = stats::mean(&sorted[..size]).unwrap_or(0.0);
        noise = noise_of(&sorted[..size], mode);
    }

    debug!(
        "NOBAN converged on {}/{} samples: background {:.4}, noise {:.4}",
        size, n, background, noise
    );
    Ok(NobanResult::guarded(background, noise))
}

fn step_sizes(remainder: usize) -> [usize; 3] {
    let scaled = |fraction: f64| (fraction * remainder as f64).ceil() as usize;
    [scaled(NOBAN_STEPS[0]), scaled(NOBAN_STEPS[1]), 1]
}

/// MT estimate: the `slice_points` long window with the lowest mean
///
/// Every window position is considered; the first of equal means wins. A
/// region shorter than the window is treated as a single window.
pub fn minimum_window(
    region: &[f64],
    slice_points: usize,
    mode: NoiseMode,
) -> Result<NobanResult, NoiseError> {
    if region.is_empty() {
        return Err(NoiseError::EmptyRegion);
    }
    if slice_points == 0 {
        return Err(NoiseError::InvalidParameter(
            "MT window length must be at least one sample".to_string(),
        ));
    }

    let width = slice_points.min(region.len());
    let mut best: Option<(f64, &[f64])> = None;
    for window in region.windows(width) {
        let mean = stats::mean(window).unwrap_or(f64::INFINITY);
        match best {
            Some((lowest, _)) if mean >= lowest => {}
            _ => best = Some((mean, window)),
        }
    }

    let (background, window) = best.ok_or(NoiseError::EmptyRegion)?;
    Ok(NobanResult::guarded(background, noise_of(window, mode)))
}
