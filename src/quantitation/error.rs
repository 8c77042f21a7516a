/// Errors raised while quantifying reference peaks
#[derive(Debug, thiserror::Error)]
pub enum QuantitationError {
    /// Background estimation failed
    #[error("Background estimation failed: {0}")]
    NoiseError(#[from] crate::noise::NoiseError),

    /// Writing the results failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
