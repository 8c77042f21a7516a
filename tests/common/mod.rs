//! Synthetic chromatograms shared by the integration tests.

#![allow(dead_code)]

use chromapeak::numeric::Gaussian;
use chromapeak::trace::Trace;

/// Sample spacing of every synthetic trace
pub const STEP: f64 = 0.05;

/// `(amplitude, center, sigma)` Gaussians on a polynomial drift, sampled on `0..70`
pub fn chromatogram(components: &[(f64, f64, f64)], drift: &[f64]) -> Trace {
    let time: Vec<f64> = (0..1400).map(|i| i as f64 * STEP).collect();
    let intensity = time
        .iter()
        .map(|&t| {
            let baseline = drift.iter().rev().fold(0.0, |acc, &c| acc * t + c);
            baseline
                + components
                    .iter()
                    .map(|&(a, c, s)| Gaussian::new(a, c, s).evaluate(t))
                    .sum::<f64>()
        })
        .collect();
    Trace::new(time, intensity).expect("synthetic trace is valid")
}

/// Four calibrant peaks shifted by `shift` on a flat background of 10
pub fn calibrant_run(shift: f64) -> Trace {
    let components: Vec<(f64, f64, f64)> = [15.0, 25.0, 35.0, 45.0]
        .iter()
        .map(|&c| (1000.0, c + shift, 0.2))
        .collect();
    chromatogram(&components, &[10.0])
}
