//! Splitting a curve into single-peak segments and seeding Gaussian fits.

use std::ops::Range;

use crate::numeric::{stats, CubicSpline, FitError, Gaussian};

/// Spline values and first derivatives of `(x, y)` on `grid`
pub fn resample(x: &[f64], y: &[f64], grid: &[f64]) -> Result<(Vec<f64>, Vec<f64>), FitError> {
    let spline = CubicSpline::new(x, y)?;
    let values = grid.iter().map(|&t| spline.evaluate(t)).collect();
    let derivative = grid.iter().map(|&t| spline.derivative(t)).collect();
    Ok((values, derivative))
}

/// Indices where the derivative has a strict local maximum or minimum, ascending
pub fn breakpoints(derivative: &[f64]) -> Vec<usize> {
    let mut breaks = stats::relative_extrema(derivative, true);
    breaks.extend(stats::relative_extrema(derivative, false));
    breaks.sort_unstable();
    breaks
}

/// Non-empty ranges cut at every breakpoint, including both boundary segments
pub fn segments(len: usize, breaks: &[usize]) -> Vec<Range<usize>> {
    let mut bounds = Vec::with_capacity(breaks.len() + 2);
    bounds.push(0);
    bounds.extend(breaks.iter().copied().filter(|&b| b < len));
    bounds.push(len);
    bounds
        .windows(2)
        .filter(|w| w[1] > w[0])
        .map(|w| w[0]..w[1])
        .collect()
}

/// Segment holding the highest value
pub fn dominant_segment(values: &[f64], segments: &[Range<usize>]) -> Option<Range<usize>> {
    let apex = stats::argmax(values)?;
    segments.iter().find(|s| s.contains(&apex)).cloned()
}

/// Largest value over the segments between consecutive breakpoints, leaving
/// out both boundary segments and the last inner one
///
/// Falls back to the overall maximum when fewer than three breakpoints exist.
pub fn first_pass_maximum(values: &[f64], breaks: &[usize]) -> f64 {
    let inner = breaks
        .windows(2)
        .take(breaks.len().saturating_sub(2))
        .filter_map(|w| stats::max_value(&values[w[0]..w[1]]))
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));
    inner
        .or_else(|| stats::max_value(values))
        .unwrap_or(0.0)
}

/// Starting point for a Gaussian fit of `(x, y)`
///
/// Sigma is half the time span of the samples above `exp(-0.5)` of the
/// maximum, falling back to the sample spacing for single-point cores.
pub fn initial_guess(x: &[f64], y: &[f64]) -> Option<Gaussian> {
    let apex = stats::argmax(y)?;
    let amplitude = y[apex];
    let threshold = (-0.5f64).exp() * amplitude;
    let core = x
        .iter()
        .zip(y)
        .filter(|(_, &v)| v > threshold)
        .map(|(&t, _)| t);
    let (lo, hi) = core.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
        (lo.min(t), hi.max(t))
    });

    let mut sigma = if hi >= lo { 0.5 * (hi - lo) } else { 0.0 };
    if sigma <= 0.0 {
        sigma = if x.len() > 1 {
            (x[x.len() - 1] - x[0]) / (x.len() - 1) as f64
        } else {
            1.0
        };
    }
    Some(Gaussian::new(amplitude, x[apex], sigma))
}

/// Fit a Gaussian to a background-subtracted segment
pub fn fit_peak(x: &[f64], y: &[f64]) -> Result<Gaussian, FitError> {
    let guess = initial_guess(x, y).ok_or(FitError::InsufficientData {
        required: 3,
        available: 0,
    })?;
    if !(guess.amplitude > 0.0) {
        return Err(FitError::Degenerate(
            "segment holds no signal above background".to_string(),
        ));
    }
    Gaussian::fit(x, y, guess)
}
