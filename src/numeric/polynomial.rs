use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use super::{format_scientific, FitError};

/// Polynomial stored with coefficients in descending powers
///
/// `[2.0, 1.0]` is `2x + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Build from descending-power coefficients; an empty list is the zero polynomial
    pub fn new(coefficients: Vec<f64>) -> Self {
        if coefficients.is_empty() {
            return Self {
                coefficients: vec![0.0],
            };
        }
        Self { coefficients }
    }

    /// Coefficients, highest power first
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Degree implied by the coefficient count
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Value at `x` (Horner scheme)
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    /// First derivative
    pub fn derivative(&self) -> Polynomial {
        let degree = self.degree();
        if degree == 0 {
            return Polynomial::new(vec![0.0]);
        }
        let coefficients = self.coefficients[..degree]
            .iter()
            .enumerate()
            .map(|(i, &c)| c * (degree - i) as f64)
            .collect();
        Polynomial::new(coefficients)
    }

    /// Least-squares polynomial of `degree` through `(x, y)`
    ///
    /// The Vandermonde columns are scaled to unit norm before the SVD solve,
    /// which keeps higher degrees conditioned on retention-time sized inputs.
    pub fn fit(x: &[f64], y: &[f64], degree: usize) -> Result<Polynomial, FitError> {
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        let parameters = degree + 1;
        if x.len() < parameters {
            return Err(FitError::InsufficientData {
                required: parameters,
                available: x.len(),
            });
        }

        let mut design = DMatrix::<f64>::from_fn(x.len(), parameters, |i, j| {
            x[i].powi((degree - j) as i32)
        });
        let mut scale = vec![1.0; parameters];
        for (j, s) in scale.iter_mut().enumerate() {
            let norm = design.column(j).norm();
            if norm > 0.0 {
                *s = norm;
                design.column_mut(j).unscale_mut(norm);
            }
        }

        let rhs = DVector::from_column_slice(y);
        let svd = design.svd(true, true);
        let tolerance = x.len() as f64 * f64::EPSILON * svd.singular_values.max();
        let rank = svd.rank(tolerance);
        if rank < parameters {
            return Err(FitError::RankDeficient { rank, parameters });
        }
        let solution = svd
            .solve(&rhs, tolerance)
            .map_err(|e| FitError::Degenerate(e.to_string()))?;

        let coefficients = solution
            .iter()
            .zip(&scale)
            .map(|(c, s)| c / s)
            .collect();
        Ok(Polynomial::new(coefficients))
    }

    /// Human readable form in descending powers, e.g. `2.00e+00x^1 + 1.00e+00x^0`
    pub fn describe(&self) -> String {
        let degree = self.degree();
        self.coefficients
            .iter()
            .enumerate()
            .map(|(i, &c)| format!("{}x^{}", format_scientific(c, 2), degree - i))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}
