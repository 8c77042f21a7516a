use serde::{Deserialize, Serialize};

/// Settings of the batch worker pool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker threads; `0` uses one per logical CPU
    pub workers: usize,
}
