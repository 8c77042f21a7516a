//! Loading the analysis configuration for a command.
//!
//! Settings come from an optional TOML file (see `chromapeak::config`);
//! command-line flags override single fields afterwards.

use anyhow::{Context, Result};
use std::path::Path;

use chromapeak::config::AnalysisConfig;

/// Load `path`, or the defaults when no file is given
pub fn load(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Re-validate after command-line overrides were applied
pub fn checked(config: AnalysisConfig) -> Result<AnalysisConfig> {
    config
        .validate()
        .context("Invalid settings after applying command-line options")?;
    Ok(config)
}
