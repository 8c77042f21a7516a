use crate::noise::NoiseError;
use crate::numeric::FitError;

/// Errors raised by peak detection
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PeakError {
    /// The analysis window holds too few samples to fit a peak
    #[error("Insufficient data: {available} samples in the analysis window, {required} required")]
    InsufficientData {
        /// Samples needed
        required: usize,
        /// Samples inside the window
        available: usize,
    },

    /// Edge trimming left no samples for a fitted peak
    #[error("Trimmed peak at {center:.4} holds no samples")]
    EmptyTrimmedPeak {
        /// Centre of the fitted Gaussian
        center: f64,
    },

    /// Background estimation failed
    #[error("Background estimation failed: {0}")]
    NoiseError(#[from] NoiseError),

    /// Interpolating the working trace failed
    #[error("Interpolation failed: {0}")]
    FitError(#[from] FitError),
}
