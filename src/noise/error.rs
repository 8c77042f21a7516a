/// Errors raised by the background and noise estimators
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NoiseError {
    /// The region of interest holds no samples
    #[error("Empty region: no intensities to estimate background from")]
    EmptyRegion,

    /// An estimator parameter is out of range
    #[error("Invalid estimator parameter: {0}")]
    InvalidParameter(String),
}
