//! Analysis configuration.
//!
//! Every setting lives in one immutable [`AnalysisConfig`] value that is
//! passed explicitly to the components; each component only sees its own
//! section. The TOML form mirrors the struct layout and every field has a
//! default, so an empty file is a valid configuration:
//!
//! ```toml
//! # chromapeak.toml
//! [window]
//! start = 10.0
//! end = 60.0
//!
//! [background]
//! method = "noban"
//! noise = "mm"
//! noban_start = 0.25
//!
//! [peaks]
//! detection_min = 0.05
//! edge = "fwhm"
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::baseline::BaselineConfig;
use crate::batch::BatchConfig;
use crate::calibration::CalibrationConfig;
use crate::noise::BackgroundConfig;
use crate::peaks::PeakConfig;

/// Errors raised while loading or validating a configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not valid TOML for this configuration
    #[error("Failed to parse TOML configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Settings that contradict each other or are out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Time range of a trace that is analysed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisWindow {
    /// First time of interest
    pub start: f64,
    /// Last time of interest
    pub end: f64,
}

impl AnalysisWindow {
    /// Window covering `[start, end]`
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Whether `t` lies inside the window (bounds included)
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }

    /// Intersection with `[start, end]`
    pub fn clip(&self, start: f64, end: f64) -> AnalysisWindow {
        AnalysisWindow::new(start.max(self.start), end.min(self.end))
    }
}

impl Default for AnalysisWindow {
    fn default() -> Self {
        Self::new(10.0, 60.0)
    }
}

/// Savitzky–Golay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Odd window length in samples
    pub window_length: usize,
    /// Polynomial order, below the window length
    pub order: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window_length: 21,
            order: 3,
        }
    }
}

/// Formatting of exported numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Decimal places written for times and intensities
    pub decimals: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { decimals: 6 }
    }
}

/// Complete analysis configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Analysis window
    pub window: AnalysisWindow,
    /// Background and noise estimation
    pub background: BackgroundConfig,
    /// Baseline correction
    pub baseline: BaselineConfig,
    /// Smoothing
    pub smoothing: SmoothingConfig,
    /// Peak detection
    pub peaks: PeakConfig,
    /// Retention-time calibration
    pub calibration: CalibrationConfig,
    /// Export formatting
    pub output: OutputConfig,
    /// Batch processing
    pub batch: BatchConfig,
}

impl AnalysisConfig {
    /// Load and validate a TOML configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Serialize back to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Reject settings that can never produce a meaningful analysis
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if !(self.window.start < self.window.end) {
            return invalid(format!(
                "window start {} must be below window end {}",
                self.window.start, self.window.end
            ));
        }
        let fraction = self.background.noban_start;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return invalid(format!("background.noban_start {} outside (0, 1]", fraction));
        }
        if self.background.slice_points == 0 {
            return invalid("background.slice_points must be at least 1".to_string());
        }
        if !(self.background.window > 0.0) {
            return invalid("background.window must be positive".to_string());
        }
        if self.baseline.points == 0 {
            return invalid("baseline.points must be at least 1".to_string());
        }
        if self.smoothing.window_length % 2 == 0 {
            return invalid(format!(
                "smoothing.window_length {} must be odd",
                self.smoothing.window_length
            ));
        }
        if self.smoothing.order >= self.smoothing.window_length {
            return invalid(format!(
                "smoothing.order {} must be below window_length {}",
                self.smoothing.order, self.smoothing.window_length
            ));
        }
        if !(self.peaks.detection_min >= 0.0) {
            return invalid("peaks.detection_min must not be negative".to_string());
        }
        if !(self.peaks.edge_value > 0.0) {
            return invalid("peaks.edge_value must be positive".to_string());
        }
        if self.peaks.oversampling == 0 {
            return invalid("peaks.oversampling must be at least 1".to_string());
        }
        if self.peaks.min_peaks == 0 {
            return invalid("peaks.min_peaks must be at least 1".to_string());
        }
        if !(self.calibration.min_improvement >= 0.0) {
            return invalid("calibration.min_improvement must not be negative".to_string());
        }
        if !(self.calibration.min_peak_sn >= 0.0) {
            return invalid("calibration.min_peak_sn must not be negative".to_string());
        }
        if self.output.decimals > 17 {
            return invalid(format!("output.decimals {} exceeds 17", self.output.decimals));
        }
        Ok(())
    }
}

impl FromStr for AnalysisConfig {
    type Err = ConfigError;

    /// Parse and validate a TOML configuration
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{BackgroundMethod, NoiseMode};
    use crate::peaks::EdgePolicy;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AnalysisConfig = "".parse().unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.window, AnalysisWindow::new(10.0, 60.0));
        assert_eq!(config.background.method, BackgroundMethod::Mt);
        assert_eq!(config.background.slice_points, 5);
        assert_eq!(config.baseline.points, 100);
        assert_eq!(config.peaks.detection_min, 0.05);
        assert_eq!(config.calibration.min_peak_sn, 27.0);
        assert_eq!(config.output.decimals, 6);
        assert_eq!(config.batch.workers, 0);
    }

    #[test]
    fn test_parse_sections() {
        let toml = r#"
            [window]
            start = 5.0
            end = 45.0

            [background]
            method = "NOBAN"
            noise = "mm"
            noban_start = 0.3

            [peaks]
            edge = "fwhm"
            max_peaks = 20

            [calibration]
            use_interpolation = true
        "#;

        let config: AnalysisConfig = toml.parse().unwrap();
        assert_eq!(config.window.start, 5.0);
        assert_eq!(config.background.method, BackgroundMethod::Noban);
        assert_eq!(config.background.noise, NoiseMode::Mm);
        assert_eq!(config.background.noban_start, 0.3);
        assert_eq!(config.background.slice_points, 5);
        assert_eq!(config.peaks.edge, EdgePolicy::Fwhm);
        assert_eq!(config.peaks.max_peaks, 20);
        assert!(config.calibration.use_interpolation);
    }

    #[test]
    fn test_validation_rejects_contradictions() {
        for toml in [
            "[window]\nstart = 60.0\nend = 10.0",
            "[background]\nnoban_start = 0.0",
            "[background]\nslice_points = 0",
            "[baseline]\npoints = 0",
            "[smoothing]\nwindow_length = 20",
            "[smoothing]\nwindow_length = 3\norder = 3",
            "[peaks]\noversampling = 0",
            "[output]\ndecimals = 18",
        ] {
            let result: Result<AnalysisConfig, _> = toml.parse();
            assert!(
                matches!(result, Err(ConfigError::Invalid(_))),
                "accepted: {}",
                toml
            );
        }
    }

    #[test]
    fn test_unknown_method_is_parse_error() {
        let result: Result<AnalysisConfig, _> = "[background]\nmethod = \"median\"".parse();
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AnalysisConfig::default();
        config.peaks.edge_value = 3.0;
        let text = config.to_toml().unwrap();
        let back: AnalysisConfig = text.parse().unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_window_clip() {
        let window = AnalysisWindow::new(10.0, 60.0);
        assert_eq!(window.clip(5.0, 20.0), AnalysisWindow::new(10.0, 20.0));
        assert!(window.contains(10.0));
        assert!(!window.contains(60.1));
    }
}
