use crate::baseline::BaselineError;
use crate::calibration::CalibrationError;
use crate::quantitation::QuantitationError;
use crate::trace::TraceError;

/// Errors that end the pipeline of one chromatogram
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Reading or writing a trace failed
    #[error("Trace error: {0}")]
    TraceError(#[from] TraceError),

    /// Baseline correction failed
    #[error("Baseline error: {0}")]
    BaselineError(#[from] BaselineError),

    /// Calibration failed
    #[error("Calibration error: {0}")]
    CalibrationError(#[from] CalibrationError),

    /// Quantitation failed
    #[error("Quantitation error: {0}")]
    QuantitationError(#[from] QuantitationError),

    /// The worker pool could not be created
    #[error("Failed to build worker pool: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),

    /// Writing an output file failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
