use serde::{Deserialize, Serialize};

use crate::numeric::{format_float, stats, HermiteInterpolant, Polynomial};

/// Grid size of the monotonicity probe
pub const MONOTONICITY_SAMPLES: usize = 10_000;

/// A fitted time transform mapping observed onto expected retention times
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CalibrationFunction {
    /// Least-squares polynomial
    Polynomial(Polynomial),
    /// `a * x^b + c`
    PowerLaw {
        /// Scale
        a: f64,
        /// Exponent
        b: f64,
        /// Offset
        c: f64,
    },
    /// Piecewise cubic through every calibration point
    MonotoneCubicInterpolant(HermiteInterpolant),
}

impl CalibrationFunction {
    /// Calibrated time for an observed time
    pub fn evaluate(&self, time: f64) -> f64 {
        match self {
            CalibrationFunction::Polynomial(p) => p.evaluate(time),
            CalibrationFunction::PowerLaw { a, b, c } => a * time.powf(*b) + c,
            CalibrationFunction::MonotoneCubicInterpolant(h) => h.evaluate(time),
        }
    }

    /// Human readable description for reports
    pub fn describe(&self) -> String {
        match self {
            CalibrationFunction::Polynomial(p) => p.describe(),
            CalibrationFunction::PowerLaw { a, b, c } => {
                format!("{}*X^{}+{}", format_float(*a), format_float(*b), format_float(*c))
            }
            CalibrationFunction::MonotoneCubicInterpolant(h) => h.kind().label().to_string(),
        }
    }

    /// Whether the function never decreases on `[min, max]`
    pub fn is_monotone(&self, min: f64, max: f64) -> bool {
        stats::is_non_decreasing(|t| self.evaluate(t), min, max, MONOTONICITY_SAMPLES)
    }

    /// Whether the function rises between every pair of probe points on `[min, max]`
    ///
    /// A remapped time axis must stay strictly increasing, so flat stretches
    /// disqualify a calibration candidate.
    pub fn is_strictly_increasing(&self, min: f64, max: f64) -> bool {
        stats::is_increasing(|t| self.evaluate(t), min, max, MONOTONICITY_SAMPLES)
    }
}
