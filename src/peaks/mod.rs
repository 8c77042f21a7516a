//! # Peak Detection
//!
//! Iterative Gaussian deconvolution of the analysis window of a trace:
//!
//! 1. **Breakpoints**: a cubic spline through the working intensities is
//!    differentiated on a uniform grid; every extremum of the derivative
//!    splits the grid into candidate single-peak segments.
//! 2. **Dominant segment**: the segment holding the highest point is
//!    background-subtracted and becomes the fit target.
//! 3. **Gaussian fit**: seeded from the samples above `exp(-0.5)` of the
//!    segment maximum and refined by Levenberg–Marquardt.
//! 4. **Edge trimming**: the fitted curve is kept within ± one FWHM or
//!    ± a multiple of sigma around its centre.
//! 5. **Subtraction**: the Gaussian is removed from the working intensities
//!    and the loop repeats until the [`DetectionState`] becomes terminal.
//!
//! Detected peaks are ordered by apex time and neighbouring overlaps are
//! removed with [`resolve_overlaps`].
//!
//! ```rust,no_run
//! use chromapeak::config::AnalysisConfig;
//! use chromapeak::peaks::PeakDetector;
//! use chromapeak::trace::read_tsv;
//!
//! let config = AnalysisConfig::default();
//! let trace = read_tsv("run01.txt")?;
//! let detection = PeakDetector::new(&config.window, &config.background, &config.peaks)
//!     .detect(&trace)?;
//! for peak in &detection.peaks {
//!     println!("{:.2}\t{:.4}", peak.apex_time, peak.fwhm);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod annotation;
mod calibrants;
mod config;
mod detector;
mod error;
mod overlap;
pub mod segment;
mod state;


use serde::{Deserialize, Serialize};

use crate::numeric::{stats, Gaussian};

pub use annotation::{write_annotation, write_annotation_file, ANNOTATION_HEADER};
pub use calibrants::select_calibrants;
pub use config::{EdgePolicy, PeakConfig};
pub use detector::{Detection, PeakDetector};
pub use error::PeakError;
pub use overlap::resolve_overlaps;
pub use state::{DetectionState, StagnationReason, StoppingRule};

/// A detected peak: the trimmed, background-subtracted Gaussian curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Time of the most intense sample
    pub apex_time: f64,
    /// `(time, intensity)` samples, ascending in time
    pub samples: Vec<(f64, f64)>,
    /// Full width at half maximum of the fitted Gaussian
    pub fwhm: f64,
    /// Half width at half maximum
    pub half_width: f64,
    /// Centre of the fitted Gaussian
    pub center: f64,
    /// The fitted Gaussian itself
    pub gaussian: Gaussian,
}

impl Peak {
    /// Peak from rendered samples of `gaussian`
    pub fn from_gaussian(samples: Vec<(f64, f64)>, gaussian: Gaussian) -> Self {
        let intensities: Vec<f64> = samples.iter().map(|&(_, i)| i).collect();
        let apex_time = stats::argmax(&intensities)
            .map(|i| samples[i].0)
            .unwrap_or(gaussian.center);
        Self {
            apex_time,
            samples,
            fwhm: gaussian.fwhm(),
            half_width: gaussian.hwhm(),
            center: gaussian.center,
            gaussian,
        }
    }

    /// Time of the first sample
    pub fn start_time(&self) -> Option<f64> {
        self.samples.first().map(|&(t, _)| t)
    }

    /// Time of the last sample
    pub fn end_time(&self) -> Option<f64> {
        self.samples.last().map(|&(t, _)| t)
    }

    /// Highest sample intensity, zero for an empty peak
    pub fn max_intensity(&self) -> f64 {
        self.samples
            .iter()
            .map(|&(_, i)| i)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
            .unwrap_or(0.0)
    }

    /// Whether overlap resolution removed every sample
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
