//! Configuration models

use crate::core::health::liveness::DEFAULT_LIVENESS_MARKER;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default Ollama endpoint
pub fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

/// Default health check timeout in milliseconds
pub fn default_timeout_ms() -> u64 {
    5_000
}

/// Default model cache TTL in seconds
pub fn default_cache_ttl_secs() -> u64 {
    30
}

pub fn default_liveness_marker() -> String {
    DEFAULT_LIVENESS_MARKER.to_string()
}

/// Default display name of the probed service
pub fn default_service_name() -> String {
    "Ollama Service".to_string()
}

/// Which model probe outcomes are written to the cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelCachePolicy {
    /// Cache Healthy results and HTTP 404 "not found" results only
    #[default]
    HealthyAndNotFound,
    /// Cache every outcome that came from a network probe
    AllOutcomes,
}

impl fmt::Display for ModelCachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelCachePolicy::HealthyAndNotFound => f.write_str("healthy_and_not_found"),
            ModelCachePolicy::AllOutcomes => f.write_str("all_outcomes"),
        }
    }
}

impl FromStr for ModelCachePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "healthy_and_not_found" => Ok(ModelCachePolicy::HealthyAndNotFound),
            "all_outcomes" | "all" => Ok(ModelCachePolicy::AllOutcomes),
            other => Err(format!("Unknown model cache policy: {}", other)),
        }
    }
}

/// Health check client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckConfig {
    /// Base URL of the AI service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-probe timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// How long a model health result is served from cache, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Substring expected in the service root response
    #[serde(default = "default_liveness_marker")]
    pub liveness_marker: String,
    /// Display name used as the target of service probes
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default)]
    pub model_cache_policy: ModelCachePolicy,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
            liveness_marker: default_liveness_marker(),
            service_name: default_service_name(),
            model_cache_policy: ModelCachePolicy::default(),
        }
    }
}

impl HealthCheckConfig {
    /// Default configuration pointing at `base_url`
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
