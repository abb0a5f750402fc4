//! Engine configuration file.
//!
//! Every key is optional; a missing file section falls back to the defaults
//! the engine plays with.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use chess_core::TimePolicy;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    pub time: TimePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            time: TimePolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let time = &self.time;
        ensure!(
            time.move_time_safety > 0.0 && time.move_time_safety <= 1.0,
            "time.move_time_safety must be in (0, 1], got {}",
            time.move_time_safety
        );
        ensure!(
            time.clock_fraction > 0.0 && time.clock_fraction <= 1.0,
            "time.clock_fraction must be in (0, 1], got {}",
            time.clock_fraction
        );
        ensure!(
            !self.log_level.trim().is_empty(),
            "log_level must not be empty"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
