use crate::noise::NoiseError;
use crate::numeric::FitError;
use crate::trace::TraceError;

/// Errors raised by retention-time calibration
#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    /// Too few time pairs to calibrate
    #[error("Insufficient data: {available} time pairs, {required} required")]
    InsufficientData {
        /// Pairs needed
        required: usize,
        /// Pairs available
        available: usize,
    },

    /// A candidate function decreases somewhere on the time range
    #[error("{model} is not monotone on {min}..{max}")]
    NonMonotoneModel {
        /// Candidate description
        model: String,
        /// Start of the checked range
        min: f64,
        /// End of the checked range
        max: f64,
    },

    /// No candidate model was both monotone and fittable
    #[error("No monotone calibration model could be fitted")]
    NoAcceptableModel,

    /// A reference-list row could not be parsed
    #[error("Malformed reference line {line}: {message}")]
    MalformedReferenceLine {
        /// 1-based line number
        line: u64,
        /// What went wrong
        message: String,
    },

    /// A candidate fit failed
    #[error("Calibration fit failed: {0}")]
    FitError(#[from] FitError),

    /// Background estimation for a reference peak failed
    #[error("Background estimation failed: {0}")]
    NoiseError(#[from] NoiseError),

    /// The remapped trace is invalid
    #[error("Trace error: {0}")]
    TraceError(#[from] TraceError),

    /// I/O error while reading a reference list
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the TSV reader
    #[error("TSV error: {0}")]
    CsvError(#[from] csv::Error),
}
