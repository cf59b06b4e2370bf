//! Configuration management for the causal judge.

mod sub_configs;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

pub use sub_configs::{BootstrapSettings, KnowledgeSettings, LoggingSettings};

/// Main configuration structure for the judge pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JudgeSettings {
    #[serde(default)]
    pub bootstrap: BootstrapSettings,
    #[serde(default)]
    pub knowledge: KnowledgeSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl JudgeSettings {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in order:
    /// 1. config/default.toml (base settings)
    /// 2. config/{CAUSAL_JUDGE_ENV}.toml (environment-specific)
    /// 3. Environment variables with CAUSAL_JUDGE_ prefix
    pub fn load() -> CoreResult<Self> {
        let env = std::env::var("CAUSAL_JUDGE_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("CAUSAL_JUDGE").separator("__"));

        let settings: JudgeSettings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let settings: JudgeSettings = toml::from_str(&content)
            .map_err(|e| CoreError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> CoreResult<()> {
        let b = &self.bootstrap;

        if b.boot_num == 0 {
            return Err(CoreError::ConfigError(
                "bootstrap.boot_num must be at least 1".into(),
            ));
        }
        if b.block_len == 0 {
            return Err(CoreError::ConfigError(
                "bootstrap.block_len must be at least 1".into(),
            ));
        }
        for (name, value) in [
            ("bootstrap.forbidden_below", b.forbidden_below),
            ("bootstrap.forced_above", b.forced_above),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::ConfigError(format!(
                    "{} must lie in [0, 1], got {}",
                    name, value
                )));
            }
        }
        if b.forbidden_below > b.forced_above {
            return Err(CoreError::ConfigError(format!(
                "bootstrap.forbidden_below ({}) must not exceed bootstrap.forced_above ({})",
                b.forbidden_below, b.forced_above
            )));
        }

        if self.knowledge.waiting_minutes <= 0.0 {
            return Err(CoreError::ConfigError(
                "knowledge.waiting_minutes must be positive".into(),
            ));
        }

        Ok(())
    }
}
