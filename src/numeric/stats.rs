//! Small descriptive-statistics and grid helpers shared by the analysis modules.

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divisor `n`), `None` for an empty slice
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let mu = mean(values)?;
    let variance = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Difference between the largest and smallest value, `None` for an empty slice
pub fn spread(values: &[f64]) -> Option<f64> {
    let (min, max) = min_max(values)?;
    Some(max - min)
}

/// Smallest and largest value of a slice
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Index of the first maximum
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the first minimum
pub fn argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v >= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Largest value of a slice
pub fn max_value(values: &[f64]) -> Option<f64> {
    min_max(values).map(|(_, hi)| hi)
}

/// `count` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut grid: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            // pin the last point so the grid ends exactly on `end`
            grid[count - 1] = end;
            grid
        }
    }
}

/// Indices of strict local maxima (`greater = true`) or minima, endpoints excluded
pub fn relative_extrema(values: &[f64], greater: bool) -> Vec<usize> {
    if values.len() < 3 {
        return Vec::new();
    }
    (1..values.len() - 1)
        .filter(|&i| {
            let (prev, cur, next) = (values[i - 1], values[i], values[i + 1]);
            if greater {
                cur > prev && cur > next
            } else {
                cur < prev && cur < next
            }
        })
        .collect()
}

/// First index whose value is `>= target` in an ascending slice
pub fn bisect_left(sorted: &[f64], target: f64) -> usize {
    sorted.partition_point(|&v| v < target)
}

/// First index whose value is `> target` in an ascending slice
pub fn bisect_right(sorted: &[f64], target: f64) -> usize {
    sorted.partition_point(|&v| v <= target)
}

/// Root mean square of the residuals between a model and observations
pub fn rms_error(predicted: impl Iterator<Item = f64>, observed: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for (p, o) in predicted.zip(observed) {
        sum += (p - o).powi(2);
        n += 1;
    }
    if n == 0 {
        return 0.0;
    }
    (sum / n as f64).sqrt()
}

/// Whether `f` is non-decreasing on `samples` evenly spaced points of `[min, max]`
///
/// Any non-finite difference counts as a violation.
pub fn is_non_decreasing<F: Fn(f64) -> f64>(f: F, min: f64, max: f64, samples: usize) -> bool {
    sampled_steps_satisfy(f, min, max, samples, |diff| diff >= 0.0)
}

/// Whether `f` strictly increases between `samples` evenly spaced points of `[min, max]`
pub fn is_increasing<F: Fn(f64) -> f64>(f: F, min: f64, max: f64, samples: usize) -> bool {
    sampled_steps_satisfy(f, min, max, samples, |diff| diff > 0.0)
}

fn sampled_steps_satisfy<F, P>(f: F, min: f64, max: f64, samples: usize, accept: P) -> bool
where
    F: Fn(f64) -> f64,
    P: Fn(f64) -> bool,
{
    let grid = linspace(min, max, samples.max(2));
    let mut previous = f(grid[0]);
    if !previous.is_finite() {
        return false;
    }
    for &x in &grid[1..] {
        let current = f(x);
        if !current.is_finite() || !accept(current - previous) {
            return false;
        }
        previous = current;
    }
    true
}
