use serde::{Deserialize, Serialize};

/// Settings of the polynomial baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// Apply baseline correction in the batch pipeline
    pub enabled: bool,
    /// Chunk length in samples; each chunk contributes its minimum as an anchor
    pub points: usize,
    /// Polynomial order
    pub order: usize,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            points: 100,
            order: 1,
        }
    }
}
