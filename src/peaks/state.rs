//! Stopping logic of the fit/subtract loop, kept free of any fitting so it
//! can be driven directly.

use serde::Serialize;

use crate::numeric::FitError;

/// Why the detector stopped without reaching the cutoff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StagnationReason {
    /// Subtracting the last Gaussian did not lower the working maximum
    NoImprovement,
    /// The configured iteration limit was reached
    IterationLimit,
}

/// State of the iterative detector
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionState {
    /// More peaks remain above the cutoff
    Searching,
    /// The working maximum dropped to the cutoff
    Converged,
    /// The loop stopped making progress
    Stagnated(StagnationReason),
    /// The Gaussian fit of the dominant segment failed
    Failed(FitError),
}

impl DetectionState {
    /// Whether the loop must stop
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DetectionState::Searching)
    }
}

/// Levels the stopping rule compares against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoppingRule {
    /// Background of the analysis window
    pub background: f64,
    /// Minimum height above background worth another iteration
    pub cutoff: f64,
    /// Iteration limit
    pub max_iterations: usize,
}

impl StoppingRule {
    /// State before the first iteration
    pub fn initial(&self, working_max: f64) -> DetectionState {
        if working_max - self.background > self.cutoff {
            DetectionState::Searching
        } else {
            DetectionState::Converged
        }
    }

    /// State after iteration `iteration` (1-based) lowered the maximum from
    /// `previous_max` to `current_max`
    pub fn after_subtraction(
        &self,
        iteration: usize,
        previous_max: f64,
        current_max: f64,
    ) -> DetectionState {
        if !(current_max < previous_max) {
            DetectionState::Stagnated(StagnationReason::NoImprovement)
        } else if current_max - self.background <= self.cutoff {
            DetectionState::Converged
        } else if iteration >= self.max_iterations {
            DetectionState::Stagnated(StagnationReason::IterationLimit)
        } else {
            DetectionState::Searching
        }
    }
}
