//! Configuration for the health check client
//!
//! Configuration can be built in code, loaded from a YAML file, or read from
//! `AI_HEALTH_*` environment variables. Every loader validates before
//! returning.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{HealthError, Result};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

pub const ENV_BASE_URL: &str = "AI_HEALTH_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "AI_HEALTH_TIMEOUT_MS";
pub const ENV_CACHE_TTL_SECS: &str = "AI_HEALTH_CACHE_TTL_SECS";
pub const ENV_LIVENESS_MARKER: &str = "AI_HEALTH_LIVENESS_MARKER";
pub const ENV_SERVICE_NAME: &str = "AI_HEALTH_SERVICE_NAME";
pub const ENV_MODEL_CACHE_POLICY: &str = "AI_HEALTH_MODEL_CACHE_POLICY";

impl HealthCheckConfig {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading health check configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await?;

        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML configuration. Missing keys take their defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;

        config.validate_config()?;
        debug!("Health check configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from the process environment, reading a `.env` file
    /// first when one is present
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment overrides from {:?}", path);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from defaults overridden by `lookup`.
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_MS) {
            config.timeout_ms = parse_var(ENV_TIMEOUT_MS, &timeout)?;
        }
        if let Some(ttl) = lookup(ENV_CACHE_TTL_SECS) {
            config.cache_ttl_secs = parse_var(ENV_CACHE_TTL_SECS, &ttl)?;
        }
        if let Some(marker) = lookup(ENV_LIVENESS_MARKER) {
            config.liveness_marker = marker;
        }
        if let Some(name) = lookup(ENV_SERVICE_NAME) {
            config.service_name = name;
        }
        if let Some(policy) = lookup(ENV_MODEL_CACHE_POLICY) {
            config.model_cache_policy = parse_var(ENV_MODEL_CACHE_POLICY, &policy)?;
        }

        config.validate_config()?;
        Ok(config)
    }

    /// Run [`Validate`] and lift the message into a [`HealthError`]
    pub fn validate_config(&self) -> Result<()> {
        Validate::validate(self).map_err(HealthError::validation)
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| HealthError::config(format!("Invalid value for {}: {}", key, e)))
}
