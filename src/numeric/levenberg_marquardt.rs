//! Damped least-squares (Levenberg–Marquardt) solver for small parametric models.
//!
//! The solver minimises `sum (y_i - f(x_i; p))^2` using the Marquardt scaling
//! `(JᵀJ + λ·diag(JᵀJ)) δ = Jᵀr`. Models supply their value and, optionally,
//! an analytic gradient; the default gradient is a forward difference.

use nalgebra::{DMatrix, DVector};

use super::FitError;

const LAMBDA_INITIAL: f64 = 1e-3;
const LAMBDA_MIN: f64 = 1e-12;
const LAMBDA_MAX: f64 = 1e12;
const DIAGONAL_FLOOR: f64 = 1e-12;

/// A model `f(x; p)` with a fixed number of parameters
pub trait Model {
    /// Number of free parameters
    fn parameter_count(&self) -> usize;

    /// Model value at `x`
    fn evaluate(&self, x: f64, params: &[f64]) -> f64;

    /// Partial derivatives with respect to every parameter at `x`
    fn gradient(&self, x: f64, params: &[f64], out: &mut [f64]) {
        let base = self.evaluate(x, params);
        let mut shifted = params.to_vec();
        for j in 0..params.len() {
            let step = f64::EPSILON.sqrt() * params[j].abs().max(1.0);
            shifted[j] = params[j] + step;
            out[j] = (self.evaluate(x, &shifted) - base) / step;
            shifted[j] = params[j];
        }
    }
}

/// Result of a converged fit
#[derive(Debug, Clone)]
pub struct FitReport {
    /// Optimised parameters
    pub parameters: Vec<f64>,
    /// Residual sum of squares at the optimum
    pub residual_sum_squares: f64,
    /// Outer iterations used
    pub iterations: usize,
}

/// Solver settings
#[derive(Debug, Clone)]
pub struct LevenbergMarquardt {
    /// Maximum number of outer iterations
    pub max_iterations: usize,
    /// Relative reduction of the cost below which the fit is converged
    pub ftol: f64,
    /// Relative parameter step below which the fit is converged
    pub xtol: f64,
    /// Gradient norm below which the fit is converged
    pub gtol: f64,
}

impl Default for LevenbergMarquardt {
    fn default() -> Self {
        Self {
            max_iterations: 400,
            ftol: 1.49e-8,
            xtol: 1.49e-8,
            gtol: 1e-14,
        }
    }
}

impl LevenbergMarquardt {
    /// Fit `model` to the observations starting from `initial`
    pub fn fit<M: Model>(
        &self,
        model: &M,
        x: &[f64],
        y: &[f64],
        initial: &[f64],
    ) -> Result<FitReport, FitError> {
        let m = model.parameter_count();
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < m {
            return Err(FitError::InsufficientData {
                required: m,
                available: x.len(),
            });
        }
        if initial.len() != m || initial.iter().any(|p| !p.is_finite()) {
            return Err(FitError::Degenerate(format!(
                "initial guess must hold {} finite parameters",
                m
            )));
        }

        let mut params = DVector::from_column_slice(initial);
        let mut residuals = residual_vector(model, x, y, params.as_slice());
        let mut cost = residuals.norm_squared();
        if !cost.is_finite() {
            return Err(FitError::DidNotConverge { iterations: 0 });
        }

        let mut lambda = LAMBDA_INITIAL;
        let mut jacobian = DMatrix::<f64>::zeros(x.len(), m);
        let mut row = vec![0.0; m];

        for iteration in 1..=self.max_iterations {
            if cost == 0.0 {
                return Ok(report(params, cost, iteration));
            }

            for (i, &xi) in x.iter().enumerate() {
                model.gradient(xi, params.as_slice(), &mut row);
                for (j, value) in row.iter().enumerate() {
                    jacobian[(i, j)] = *value;
                }
            }
            let jt = jacobian.transpose();
            let normal = &jt * &jacobian;
            let gradient = &jt * &residuals;

            if gradient.amax() <= self.gtol {
                return Ok(report(params, cost, iteration));
            }

            let mut accepted = false;
            while lambda <= LAMBDA_MAX {
                let mut damped = normal.clone();
                for j in 0..m {
                    damped[(j, j)] += lambda * normal[(j, j)].max(DIAGONAL_FLOOR);
                }

                let Some(step) = damped.cholesky().map(|c| c.solve(&gradient)) else {
                    lambda *= 10.0;
                    continue;
                };

                let candidate = &params + &step;
                let candidate_residuals = residual_vector(model, x, y, candidate.as_slice());
                let candidate_cost = candidate_residuals.norm_squared();

                if candidate_cost.is_finite() && candidate_cost < cost {
                    let reduction = cost - candidate_cost;
                    let step_small =
                        step.norm() <= self.xtol * (params.norm() + self.xtol);

                    params = candidate;
                    residuals = candidate_residuals;
                    let previous_cost = cost;
                    cost = candidate_cost;
                    lambda = (lambda / 10.0).max(LAMBDA_MIN);
                    accepted = true;

                    if reduction <= self.ftol * previous_cost || step_small {
                        return Ok(report(params, cost, iteration));
                    }
                    break;
                }
                lambda *= 10.0;
            }

            if !accepted {
                // no damping level reduces the cost: we sit in a minimum
                return Ok(report(params, cost, iteration));
            }
        }

        Err(FitError::DidNotConverge {
            iterations: self.max_iterations,
        })
    }
}

fn residual_vector<M: Model>(model: &M, x: &[f64], y: &[f64], params: &[f64]) -> DVector<f64> {
    DVector::from_iterator(
        x.len(),
        x.iter()
            .zip(y)
            .map(|(&xi, &yi)| yi - model.evaluate(xi, params)),
    )
}

fn report(params: DVector<f64>, cost: f64, iterations: usize) -> FitReport {
    FitReport {
        parameters: params.iter().copied().collect(),
        residual_sum_squares: cost,
        iterations,
    }
}
