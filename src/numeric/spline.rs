use super::FitError;

/// Natural cubic spline through strictly increasing knots
///
/// Second derivatives vanish at both ends. Two knots degrade to a straight
/// line. Evaluation outside the knot range extends the end polynomials.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Second derivative at each knot
    curvature: Vec<f64>,
}

impl CubicSpline {
    /// Interpolate `(x, y)`; `x` must be strictly increasing
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, FitError> {
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(FitError::InsufficientData {
                required: 2,
                available: x.len(),
            });
        }
        if let Some(index) = x
            .windows(2)
            .position(|w| w[1] <= w[0] || w[0].is_nan() || w[1].is_nan())
        {
            return Err(FitError::NotIncreasing { index: index + 1 });
        }

        let n = x.len();
        let mut curvature = vec![0.0; n];
        if n > 2 {
            // Thomas algorithm on the interior knots
            let m = n - 2;
            let mut diag = vec![0.0; m];
            let mut upper = vec![0.0; m];
            let mut rhs = vec![0.0; m];
            for k in 0..m {
                let i = k + 1;
                let h0 = x[i] - x[i - 1];
                let h1 = x[i + 1] - x[i];
                diag[k] = 2.0 * (h0 + h1);
                upper[k] = h1;
                rhs[k] = 6.0 * ((y[i + 1] - y[i]) / h1 - (y[i] - y[i - 1]) / h0);
            }
            for k in 1..m {
                let lower = x[k + 1] - x[k];
                let factor = lower / diag[k - 1];
                diag[k] -= factor * upper[k - 1];
                rhs[k] -= factor * rhs[k - 1];
            }
            curvature[m] = rhs[m - 1] / diag[m - 1];
            for k in (0..m - 1).rev() {
                curvature[k + 1] = (rhs[k] - upper[k] * curvature[k + 2]) / diag[k];
            }
        }

        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            curvature,
        })
    }

    /// Knot positions
    pub fn knots(&self) -> &[f64] {
        &self.x
    }

    fn interval(&self, t: f64) -> usize {
        let upper = self.x.partition_point(|&k| k <= t);
        upper.saturating_sub(1).min(self.x.len() - 2)
    }

    /// Value at `t`
    pub fn evaluate(&self, t: f64) -> f64 {
        let i = self.interval(t);
        let h = self.x[i + 1] - self.x[i];
        let a = (self.x[i + 1] - t) / h;
        let b = (t - self.x[i]) / h;
        a * self.y[i]
            + b * self.y[i + 1]
            + ((a * a * a - a) * self.curvature[i] + (b * b * b - b) * self.curvature[i + 1])
                * h
                * h
                / 6.0
    }

    /// First derivative at `t`
    pub fn derivative(&self, t: f64) -> f64 {
        let i = self.interval(t);
        let h = self.x[i + 1] - self.x[i];
        let a = (self.x[i + 1] - t) / h;
        let b = (t - self.x[i]) / h;
        (self.y[i + 1] - self.y[i]) / h
            - (3.0 * a * a - 1.0) / 6.0 * h * self.curvature[i]
            + (3.0 * b * b - 1.0) / 6.0 * h * self.curvature[i + 1]
    }

    /// First derivative at every knot
    pub fn knot_derivatives(&self) -> Vec<f64> {
        self.x.iter().map(|&t| self.derivative(t)).collect()
    }
}
