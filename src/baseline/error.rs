use crate::numeric::FitError;
use crate::trace::TraceError;

/// Errors raised while detecting or correcting a baseline
#[derive(Debug, thiserror::Error)]
pub enum BaselineError {
    /// Too few anchor points inside the analysis window for the polynomial order
    #[error("Insufficient data: {available} baseline anchors inside the window, order {order} needs {required}")]
    InsufficientData {
        /// Anchors needed (`order + 1`)
        required: usize,
        /// Anchors found
        available: usize,
        /// Requested polynomial order
        order: usize,
    },

    /// Settings that can never produce a baseline for this trace
    #[error("Configuration contradiction: {0}")]
    ConfigContradiction(String),

    /// Least-squares fit through the anchors failed
    #[error("Baseline fit failed: {0}")]
    FitError(#[from] FitError),

    /// The corrected trace could not be built
    #[error("Trace error: {0}")]
    TraceError(#[from] TraceError),
}
