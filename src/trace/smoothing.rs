use nalgebra::DMatrix;

use super::TraceError;
use crate::numeric::Polynomial;

/// Savitzky–Golay filter over uniformly indexed samples
///
/// Interior points use the convolution coefficients of a least-squares
/// polynomial of `order` over `window_length` samples. The first and last
/// half-windows are replaced by that polynomial fitted to the edge windows.
pub(crate) fn savitzky_golay(
    values: &[f64],
    window_length: usize,
    order: usize,
) -> Result<Vec<f64>, TraceError> {
    if window_length % 2 == 0 {
        return Err(TraceError::InvalidSmoothing(format!(
            "window length {} must be odd",
            window_length
        )));
    }
    if order >= window_length {
        return Err(TraceError::InvalidSmoothing(format!(
            "polynomial order {} must be less than window length {}",
            order, window_length
        )));
    }
    if window_length > values.len() {
        return Err(TraceError::InvalidSmoothing(format!(
            "window length {} exceeds trace length {}",
            window_length,
            values.len()
        )));
    }

    let half = window_length / 2;
    let offsets: Vec<f64> = (0..window_length)
        .map(|k| k as f64 - half as f64)
        .collect();
    let design = DMatrix::<f64>::from_fn(window_length, order + 1, |i, j| {
        offsets[i].powi(j as i32)
    });
    let pinv = design
        .pseudo_inverse(1e-12)
        .map_err(|e| TraceError::InvalidSmoothing(e.to_string()))?;
    // row 0 maps a window onto the fitted value at offset zero
    let coefficients: Vec<f64> = pinv.row(0).iter().copied().collect();

    let n = values.len();
    let mut smoothed = values.to_vec();
    for center in half..n - half {
        smoothed[center] = values[center - half..=center + half]
            .iter()
            .zip(&coefficients)
            .map(|(v, c)| v * c)
            .sum();
    }

    let local: Vec<f64> = (0..window_length).map(|k| k as f64).collect();
    let head = Polynomial::fit(&local, &values[..window_length], order)
        .map_err(|e| TraceError::InvalidSmoothing(e.to_string()))?;
    let tail = Polynomial::fit(&local, &values[n - window_length..], order)
        .map_err(|e| TraceError::InvalidSmoothing(e.to_string()))?;
    for k in 0..half {
        smoothed[k] = head.evaluate(k as f64);
        smoothed[n - half + k] = tail.evaluate((window_length - half + k) as f64);
    }

    Ok(smoothed)
}
