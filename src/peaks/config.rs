use serde::{Deserialize, Serialize};

/// How far around its centre a fitted peak is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Centre ± a multiple of sigma
    #[default]
    #[serde(alias = "Sigma")]
    Sigma,
    /// Centre ± one FWHM
    #[serde(alias = "FWHM")]
    Fwhm,
}

/// Settings of the iterative peak detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakConfig {
    /// Fraction of the strongest first-pass segment below which detection stops
    pub detection_min: f64,
    /// Edge trimming policy
    pub edge: EdgePolicy,
    /// Sigma multiple used by [`EdgePolicy::Sigma`]
    pub edge_value: f64,
    /// Working-grid points per original sample interval
    pub oversampling: usize,
    /// Upper bound on fit/subtract iterations
    pub max_peaks: usize,
    /// Number of time chunks used for calibrant selection
    pub min_peaks: usize,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            detection_min: 0.05,
            edge: EdgePolicy::Sigma,
            edge_value: 2.0,
            oversampling: 10,
            max_peaks: 250,
            min_peaks: 4,
        }
    }
}
