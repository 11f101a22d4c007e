//! Configuration validation

use super::models::HealthCheckConfig;
use url::Url;

/// Upper bound for the health check timeout. Probes are liveness checks and
/// must stay well below a typical inference call.
pub const MAX_HEALTH_CHECK_TIMEOUT_MS: u64 = 30_000;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for HealthCheckConfig {
    fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("Base URL '{}' is invalid: {}", self.base_url, e))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(format!(
                    "Base URL must use http:// or https:// scheme, got: {}",
                    scheme
                ));
            }
        }

        if url.host_str().is_none() {
            return Err("Base URL must have a valid host".to_string());
        }

        if self.timeout_ms == 0 {
            return Err("Health check timeout must be greater than 0".to_string());
        }

        if self.timeout_ms > MAX_HEALTH_CHECK_TIMEOUT_MS {
            return Err(format!(
                "Health check timeout must not exceed {}ms, got {}ms",
                MAX_HEALTH_CHECK_TIMEOUT_MS, self.timeout_ms
            ));
        }

        if self.cache_ttl_secs == 0 {
            return Err("Cache TTL must be greater than 0".to_string());
        }

        if self.liveness_marker.trim().is_empty() {
            return Err("Liveness marker cannot be empty".to_string());
        }

        if self.service_name.trim().is_empty() {
            return Err("Service name cannot be empty".to_string());
        }

        Ok(())
    }
}
