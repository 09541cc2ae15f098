use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "voxcart.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub recovery: RecoveryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
    pub n_predict: usize,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key: None,
            timeout_ms: 5_000,
            n_predict: 256,
            temperature: 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// Consecutive failures that force a capture restart.
    pub failure_threshold: u32,
    pub resume_delay_ms: u64,
    pub restart_delay_ms: u64,
    pub action_log_capacity: usize,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            resume_delay_ms: 1_000,
            restart_delay_ms: 2_000,
            action_log_capacity: 50,
        }
    }
}

impl RecoveryConfig {
    pub fn resume_delay(&self) -> Duration {
        Duration::from_millis(self.resume_delay_ms)
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `voxcart=debug`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".to_string() }
    }
}

impl AppConfig {
    /// Loads `path` (or `voxcart.toml` in the working directory when present),
    /// then applies `VOXCART_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match resolve_config_path(path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw)
            .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn apply_env_overrides<F>(&mut self, read: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| read(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(value) = read("VOXCART_LLM_URL") {
            self.llm.base_url = value;
        }
        if let Some(value) = read("VOXCART_LLM_API_KEY") {
            self.llm.api_key = Some(value);
        }
        if let Some(value) = read("VOXCART_LOG") {
            self.logging.filter = value;
        }
        if let Some(value) = read("VOXCART_FAILURE_THRESHOLD") {
            self.recovery.failure_threshold = value.parse().map_err(|_| {
                ConfigError::InvalidEnvOverride { key: "VOXCART_FAILURE_THRESHOLD".to_string(), value }
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("llm.base_url must not be empty".to_string()));
        }
        if self.recovery.failure_threshold == 0 {
            return Err(ConfigError::Validation(
                "recovery.failure_threshold must be at least 1".to_string(),
            ));
        }
        if self.recovery.action_log_capacity == 0 {
            return Err(ConfigError::Validation(
                "recovery.action_log_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        }
    }
}
