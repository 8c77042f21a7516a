//! # Chromatography Traces
//!
//! A [`Trace`] is an ordered series of `(time, intensity)` samples with a
//! strictly increasing time axis. Traces are immutable: windowing, smoothing,
//! baseline correction and time remapping all return a new trace.
//!
//! ```rust
//! use chromapeak::trace::Trace;
//!
//! let trace = Trace::new(vec![0.0, 0.5, 1.0, 1.5], vec![2.0, 8.0, 3.0, 1.0])?;
//! let window = trace.window(0.4, 1.2);
//! assert_eq!(window.time(), &[0.5, 1.0]);
//! # Ok::<(), chromapeak::trace::TraceError>(())
//! ```

mod error;
mod io;
mod smoothing;


use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::numeric::stats;

pub use error::TraceError;
pub use io::{read_tsv, read_tsv_from, write_tsv, write_tsv_to};

/// Ordered time/intensity samples of one chromatographic run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    time: Vec<f64>,
    intensity: Vec<f64>,
}

impl Trace {
    /// Build a trace, validating lengths, finiteness and time ordering
    pub fn new(time: Vec<f64>, intensity: Vec<f64>) -> Result<Self, TraceError> {
        if time.len() != intensity.len() {
            return Err(TraceError::LengthMismatch {
                time: time.len(),
                intensity: intensity.len(),
            });
        }
        if let Some(index) = time
            .iter()
            .zip(&intensity)
            .position(|(t, i)| !t.is_finite() || !i.is_finite())
        {
            return Err(TraceError::NonFinite { index });
        }
        if let Some(index) = time.windows(2).position(|w| w[1] <= w[0]) {
            return Err(TraceError::NotIncreasing { index: index + 1 });
        }
        Ok(Self { time, intensity })
    }

    /// Build a trace from `(time, intensity)` pairs
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Result<Self, TraceError> {
        let (time, intensity) = pairs.into_iter().unzip();
        Self::new(time, intensity)
    }

    /// Time channel
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Intensity channel
    pub fn intensity(&self) -> &[f64] {
        &self.intensity
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the trace holds no samples
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Iterate over `(time, intensity)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.intensity.iter().copied())
    }

    /// First and last time value
    pub fn time_bounds(&self) -> Option<(f64, f64)> {
        Some((*self.time.first()?, *self.time.last()?))
    }

    /// Sample indices whose time lies in `[start, end]`
    pub fn index_range(&self, start: f64, end: f64) -> Range<usize> {
        let lo = stats::bisect_left(&self.time, start);
        let hi = stats::bisect_right(&self.time, end).max(lo);
        lo..hi
    }

    /// Samples whose time lies in `[start, end]`
    pub fn window(&self, start: f64, end: f64) -> Trace {
        let range = self.index_range(start, end);
        Trace {
            time: self.time[range.clone()].to_vec(),
            intensity: self.intensity[range].to_vec(),
        }
    }

    /// Same time axis with a new intensity channel
    pub fn with_intensity(&self, intensity: Vec<f64>) -> Result<Trace, TraceError> {
        Trace::new(self.time.clone(), intensity)
    }

    /// Remap the time axis through `f`
    ///
    /// Fails if the remapped axis is no longer strictly increasing.
    pub fn map_time<F: Fn(f64) -> f64>(&self, f: F) -> Result<Trace, TraceError> {
        let time = self.time.iter().map(|&t| f(t)).collect();
        Trace::new(time, self.intensity.clone())
    }

    /// Savitzky–Golay smoothed copy of the trace
    pub fn smooth(&self, window_length: usize, order: usize) -> Result<Trace, TraceError> {
        let intensity = smoothing::savitzky_golay(&self.intensity, window_length, order)?;
        self.with_intensity(intensity)
    }
}
