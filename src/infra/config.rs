// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::errors::WozEvalError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub resampling: ResamplingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResamplingConfig {
    /// Lowest utility treated as meaningful. Every utility is shifted
    /// by this floor before it becomes resampling mass.
    pub utility_floor: f64,
    /// Population size the sample producer is asked to deliver.
    pub sample_count_hint: usize,
    /// Wall-clock budget for filling the pool, in milliseconds.
    pub time_budget_ms: u64,
    /// Fixed seed for the interval sampler. Unset means entropy-seeded.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ResamplingConfig {
    fn default() -> Self {
        Self {
            utility_floor: -20.0,
            sample_count_hint: 1000,
            time_budget_ms: 250,
            seed: None,
        }
    }
}

impl ResamplingConfig {
    pub fn validate(&self) -> Result<(), WozEvalError> {
        if !self.utility_floor.is_finite() {
            return Err(WozEvalError::Config(format!(
                "utility_floor must be finite, got {}",
                self.utility_floor
            )));
        }
        if self.sample_count_hint == 0 {
            return Err(WozEvalError::Config(
                "sample_count_hint must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.resampling.validate()?;
        Ok(config)
    }
}
