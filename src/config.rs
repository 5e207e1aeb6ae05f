use crate::error::{PipelineError, Result};
use serde::Deserialize;
use std::fs;

/// Explicit configuration passed into the coordinator at batch start.
/// No stage reads the environment; everything routes through this object.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Minimum batch quality percentage required for promotion to the next
    /// layer (0-100).
    pub quality_threshold: f64,
    /// Directory the transport adapter fetches raw payloads from.
    pub source_path: String,
    /// Logical table promoted batches are appended to.
    pub sink_table: String,
    /// Named procedure invoked after a successful append (silver -> gold).
    pub gold_procedure: String,
    /// Bound on how long a single sink call may block, in seconds.
    pub sink_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            quality_threshold: 80.0,
            source_path: "data/incoming".to_string(),
            sink_table: "claims_enriched".to_string(),
            gold_procedure: "sp_silver_to_gold_transformation".to_string(),
            sink_timeout_secs: 30,
        }
    }
}

impl PipelineConfig {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Failed to read config file '{}': {}", path, e))
        })?;

        let config: PipelineConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_policy_values() {
        let config = PipelineConfig::default();
        assert_eq!(config.quality_threshold, 80.0);
        assert_eq!(config.sink_table, "claims_enriched");
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: PipelineConfig = toml::from_str("quality_threshold = 95.0").unwrap();
        assert_eq!(config.quality_threshold, 95.0);
        assert_eq!(config.gold_procedure, "sp_silver_to_gold_transformation");
    }
}
