use serde::{Deserialize, Serialize};

use super::FitError;

/// Slope rule of a piecewise cubic Hermite interpolant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpolantKind {
    /// Fritsch–Carlson style slopes, shape preserving
    Pchip,
    /// Akima slopes, robust to isolated outliers
    Akima,
}

impl InterpolantKind {
    /// Fixed label used when describing a calibration
    pub fn label(&self) -> &'static str {
        match self {
            InterpolantKind::Pchip => "Monotonic Piecewise Cubic Hermite Interpolating Polynomial",
            InterpolantKind::Akima => "Akima 1D Interpolation",
        }
    }
}

/// Piecewise cubic Hermite interpolant through every control point
///
/// Outside the control points the first and last cubic pieces are extended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HermiteInterpolant {
    kind: InterpolantKind,
    x: Vec<f64>,
    y: Vec<f64>,
    slopes: Vec<f64>,
}

impl HermiteInterpolant {
    /// Shape-preserving (PCHIP) interpolant
    pub fn pchip(x: &[f64], y: &[f64]) -> Result<Self, FitError> {
        Self::build(InterpolantKind::Pchip, x, y)
    }

    /// Akima interpolant
    pub fn akima(x: &[f64], y: &[f64]) -> Result<Self, FitError> {
        Self::build(InterpolantKind::Akima, x, y)
    }

    /// Interpolant of the given kind
    pub fn build(kind: InterpolantKind, x: &[f64], y: &[f64]) -> Result<Self, FitError> {
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

        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let secants: Vec<f64> = y
            .windows(2)
            .zip(&h)
            .map(|(w, &step)| (w[1] - w[0]) / step)
            .collect();

        let slopes = if x.len() == 2 {
            vec![secants[0]; 2]
        } else {
            match kind {
                InterpolantKind::Pchip => pchip_slopes(&h, &secants),
                InterpolantKind::Akima => akima_slopes(&secants),
            }
        };

        Ok(Self {
            kind,
            x: x.to_vec(),
            y: y.to_vec(),
            slopes,
        })
    }

    /// Slope rule used to build this interpolant
    pub fn kind(&self) -> InterpolantKind {
        self.kind
    }

    /// Control point abscissae
    pub fn knots(&self) -> &[f64] {
        &self.x
    }

    /// Value at `t`
    pub fn evaluate(&self, t: f64) -> f64 {
        let upper = self.x.partition_point(|&k| k <= t);
        let i = upper.saturating_sub(1).min(self.x.len() - 2);
        let h = self.x[i + 1] - self.x[i];
        let s = (t - self.x[i]) / h;
        let s2 = s * s;
        let s3 = s2 * s;
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;
        h00 * self.y[i]
            + h10 * h * self.slopes[i]
            + h01 * self.y[i + 1]
            + h11 * h * self.slopes[i + 1]
    }
}

fn pchip_slopes(h: &[f64], secants: &[f64]) -> Vec<f64> {
    let n = secants.len() + 1;
    let mut slopes = vec![0.0; n];

    for k in 1..n - 1 {
        let (m0, m1) = (secants[k - 1], secants[k]);
        if m0 == 0.0 || m1 == 0.0 || m0.signum() != m1.signum() {
            continue;
        }
        let w1 = 2.0 * h[k] + h[k - 1];
        let w2 = h[k] + 2.0 * h[k - 1];
        slopes[k] = (w1 + w2) / (w1 / m0 + w2 / m1);
    }

    slopes[0] = pchip_end_slope(h[0], h[1], secants[0], secants[1]);
    slopes[n - 1] = pchip_end_slope(h[n - 2], h[n - 3], secants[n - 2], secants[n - 3]);
    slopes
}

/// One-sided three-point slope, clipped to keep the end piece shape preserving
fn pchip_end_slope(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if sign(d) != sign(m0) {
        0.0
    } else if sign(m0) != sign(m1) && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}

fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

fn akima_slopes(secants: &[f64]) -> Vec<f64> {
    let n = secants.len() + 1;
    // secants padded with two linearly extrapolated values on each side
    let mut m = vec![0.0; n + 3];
    m[2..n + 1].copy_from_slice(secants);
    m[1] = 2.0 * m[2] - m[3];
    m[0] = 2.0 * m[1] - m[2];
    m[n + 1] = 2.0 * m[n] - m[n - 1];
    m[n + 2] = 2.0 * m[n + 1] - m[n];

    let dm: Vec<f64> = m.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    let f1 = &dm[2..];
    let f2 = &dm[..n];
    let f12: Vec<f64> = f1.iter().zip(f2).map(|(a, b)| a + b).collect();
    let threshold = 1e-9 * f12.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    (0..n)
        .map(|i| {
            if f12[i] > threshold {
                (f1[i] * m[i + 1] + f2[i] * m[i + 2]) / f12[i]
            } else {
                0.5 * (m[i + 3] + m[i])
            }
        })
        .collect()
}
