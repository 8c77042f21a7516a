//! # Numerical Building Blocks
//!
//! Curve models and solvers shared by the analysis modules:
//!
//! - [`Gaussian`]: three-parameter peak model with a Levenberg–Marquardt fit
//! - [`Polynomial`]: descending-power polynomial with an SVD least-squares fit
//! - [`CubicSpline`]: natural cubic spline used to resample and differentiate traces
//! - [`HermiteInterpolant`]: PCHIP and Akima interpolants for calibration
//! - [`stats`]: descriptive statistics, grids and a monotonicity probe

mod error;
mod format;
mod gaussian;
mod hermite;
mod levenberg_marquardt;
mod polynomial;
mod spline;
pub mod stats;

#[cfg(test)]
mod tests;

pub use error::FitError;
pub use gaussian::{Gaussian, FWHM_PER_SIGMA};
pub use hermite::{HermiteInterpolant, InterpolantKind};
pub use levenberg_marquardt::{FitReport, LevenbergMarquardt, Model};
pub use format::{format_float, format_scientific};
pub use polynomial::Polynomial;
pub use spline::CubicSpline;
