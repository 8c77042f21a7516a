/// Errors raised by the numerical fitting routines
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// Fewer samples than the fit has free parameters
    #[error("Insufficient data: {required} points required, {available} available")]
    InsufficientData {
        /// Minimum number of points the fit needs
        required: usize,
        /// Number of points that were supplied
        available: usize,
    },

    /// The x and y inputs have different lengths
    #[error("Length mismatch: {x_len} x values, {y_len} y values")]
    LengthMismatch {
        /// Number of x values
        x_len: usize,
        /// Number of y values
        y_len: usize,
    },

    /// The nonlinear optimizer failed to reach a minimum
    #[error("Fit did not converge after {iterations} iterations")]
    DidNotConverge {
        /// Iterations spent before giving up
        iterations: usize,
    },

    /// The normal equations are rank deficient for the requested model
    #[error("Rank deficient system: rank {rank}, {parameters} parameters")]
    RankDeficient {
        /// Numerical rank of the design matrix
        rank: usize,
        /// Number of parameters requested
        parameters: usize,
    },

    /// Abscissae must be strictly increasing for interpolation
    #[error("Abscissae are not strictly increasing at index {index}")]
    NotIncreasing {
        /// First offending index
        index: usize,
    },

    /// The fit converged to a model without physical meaning
    #[error("Degenerate fit: {0}")]
    Degenerate(String),
}
