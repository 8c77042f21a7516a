use serde::{Deserialize, Serialize};

use super::levenberg_marquardt::{LevenbergMarquardt, Model};
use super::FitError;

/// `2 * sqrt(2 * ln 2)`, the FWHM of a unit-sigma Gaussian
pub const FWHM_PER_SIGMA: f64 = 2.354_820_045_030_95;

/// Three-parameter Gaussian `amplitude * exp(-(x - center)^2 / (2 sigma^2))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    /// Peak height
    pub amplitude: f64,
    /// Position of the maximum
    pub center: f64,
    /// Standard deviation, always stored positive
    pub sigma: f64,
}

impl Gaussian {
    /// Create a Gaussian, normalising the sign of `sigma`
    pub fn new(amplitude: f64, center: f64, sigma: f64) -> Self {
        Self {
            amplitude,
            center,
            sigma: sigma.abs(),
        }
    }

    /// Value at `x`
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        let d = x - self.center;
        self.amplitude * (-(d * d) / (2.0 * self.sigma * self.sigma)).exp()
    }

    /// Full width at half maximum
    pub fn fwhm(&self) -> f64 {
        (FWHM_PER_SIGMA * self.sigma).abs()
    }

    /// Half width at half maximum
    pub fn hwhm(&self) -> f64 {
        0.5 * self.fwhm()
    }

    /// Least-squares fit to `(x, y)` starting from `initial`
    ///
    /// Fits whose amplitude or sigma end up non-positive or non-finite are
    /// reported as [`FitError::Degenerate`].
    pub fn fit(x: &[f64], y: &[f64], initial: Gaussian) -> Result<Gaussian, FitError> {
        let solver = LevenbergMarquardt::default();
        let report = solver.fit(
            &GaussianModel,
            x,
            y,
            &[initial.amplitude, initial.center, initial.sigma],
        )?;
        let fitted = Gaussian::new(report.parameters[0], report.parameters[1], report.parameters[2]);

        if !fitted.amplitude.is_finite() || !fitted.center.is_finite() || !fitted.sigma.is_finite() {
            return Err(FitError::Degenerate("non-finite parameters".to_string()));
        }
        if fitted.amplitude <= 0.0 {
            return Err(FitError::Degenerate(format!(
                "non-positive amplitude {}",
                fitted.amplitude
            )));
        }
        if fitted.sigma == 0.0 {
            return Err(FitError::Degenerate("zero width".to_string()));
        }
        Ok(fitted)
    }
}

struct GaussianModel;

impl Model for GaussianModel {
    fn parameter_count(&self) -> usize {
        3
    }

    fn evaluate(&self, x: f64, p: &[f64]) -> f64 {
        let d = x - p[1];
        p[0] * (-(d * d) / (2.0 * p[2] * p[2])).exp()
    }

    fn gradient(&self, x: f64, p: &[f64], out: &mut [f64]) {
        let (a, mu, sigma) = (p[0], p[1], p[2]);
        let d = x - mu;
        let s2 = sigma * sigma;
        let e = (-(d * d) / (2.0 * s2)).exp();
        out[0] = e;
        out[1] = a * e * d / s2;
        out[2] = a * e * d * d / (s2 * sigma);
    }
}
