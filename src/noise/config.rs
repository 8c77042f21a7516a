use serde::{Deserialize, Serialize};

/// Strategy used to estimate background and noise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMethod {
    /// Sliding window with the lowest mean intensity
    #[default]
    #[serde(alias = "MT")]
    Mt,
    /// Iterative percentile convergence on the sorted intensities
    #[serde(alias = "NOBAN")]
    Noban,
}

/// How noise is measured on the background set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseMode {
    /// Population standard deviation
    #[default]
    #[serde(alias = "RMS")]
    Rms,
    /// Maximum minus minimum
    #[serde(alias = "MM")]
    Mm,
}

/// Settings for [`estimate`](super::estimate)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Estimation strategy
    pub method: BackgroundMethod,
    /// Noise measure
    pub noise: NoiseMode,
    /// Window length of the MT strategy, in samples
    pub slice_points: usize,
    /// Initial fraction of the sorted samples used by NOBAN
    pub noban_start: f64,
    /// Half-width (time units) of the local background region around a reference peak
    pub window: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            method: BackgroundMethod::Mt,
            noise: NoiseMode::Rms,
            slice_points: 5,
            noban_start: 0.25,
            window: 1.0,
        }
    }
}

impl BackgroundConfig {
    /// NOBAN settings with the given start fraction and noise measure
    pub fn noban(noban_start: f64, noise: NoiseMode) -> Self {
        Self {
            method: BackgroundMethod::Noban,
            noise,
            noban_start,
            ..Default::default()
        }
    }

    /// MT settings with the given window length and noise measure
    pub fn minimum_window(slice_points: usize, noise: NoiseMode) -> Self {
        Self {
            method: BackgroundMethod::Mt,
            noise,
            slice_points,
            ..Default::default()
        }
    }
}
