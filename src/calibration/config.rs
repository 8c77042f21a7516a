use serde::{Deserialize, Serialize};

/// Settings of retention-time calibration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Time pairs required before a trace is calibrated
    pub min_peaks: usize,
    /// Signal-to-noise a reference apex needs to become a time pair
    pub min_peak_sn: f64,
    /// Relative RMS improvement a later candidate needs to replace the current best
    pub min_improvement: f64,
    /// Also try the exact PCHIP and Akima interpolants
    pub use_interpolation: bool,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            min_peaks: 4,
            min_peak_sn: 27.0,
            min_improvement: 0.05,
            use_interpolation: false,
        }
    }
}
