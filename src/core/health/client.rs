//! Health check client
//!
//! Owns the transport, the liveness predicate and the model result cache of
//! one AI service. Several clients pointed at different services never share
//! state.

use super::cache::ResultCache;
use super::liveness::{LivenessPredicate, MarkerPredicate};
use super::transport::{ProbeError, ProbeResponse, ProbeTransport, ReqwestTransport, millis};
use super::types::HealthCheckResult;
use super::wire::{LIST_MODELS_PATH, model_names};
use crate::config::HealthCheckConfig;
use crate::utils::error::Result;
use futures::future::join_all;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Probes an Ollama-compatible service and its models
pub struct HealthCheckClient {
    pub(super) config: HealthCheckConfig,
    pub(super) transport: Arc<dyn ProbeTransport>,
    pub(super) liveness: Arc<dyn LivenessPredicate>,
    pub(super) cache: ResultCache,
}

impl HealthCheckClient {
    /// Create a client that talks HTTP to `config.base_url`
    pub fn new(config: HealthCheckConfig) -> Result<Self> {
        config.validate_config()?;
        let transport = ReqwestTransport::new(&config.base_url, config.timeout())?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client on top of a custom transport
    pub fn with_transport(
        config: HealthCheckConfig,
        transport: Arc<dyn ProbeTransport>,
    ) -> Result<Self> {
        config.validate_config()?;
        info!(
            base_url = %config.base_url,
            timeout_ms = config.timeout_ms,
            cache_ttl_secs = config.cache_ttl_secs,
            "Creating health check client"
        );

        Ok(Self {
            liveness: Arc::new(MarkerPredicate::new(config.liveness_marker.clone())),
            cache: ResultCache::new(config.cache_ttl()),
            transport,
            config,
        })
    }

    /// Replace the liveness predicate used by service checks
    pub fn with_liveness_predicate(mut self, predicate: Arc<dyn LivenessPredicate>) -> Self {
        self.liveness = predicate;
        self
    }

    pub fn config(&self) -> &HealthCheckConfig {
        &self.config
    }

    /// Base URL of the probed service, as seen by the transport
    pub fn base_url(&self) -> String {
        self.transport.base_url()
    }

    /// Drop every cached model result
    pub fn clear_cache(&self) {
        self.cache.clear();
        debug!("Model health cache cleared");
    }

    /// Fresh cached result for `model_name`, without probing
    pub fn cached_model_health(&self, model_name: &str) -> Option<Arc<HealthCheckResult>> {
        self.cache.get(model_name)
    }

    /// Number of fresh cached model results
    pub fn cached_model_count(&self) -> usize {
        self.cache.len()
    }

    /// Names of the models the service reports, in response order.
    ///
    /// Any failure yields an empty list.
    pub async fn get_available_models(&self) -> Vec<String> {
        let (outcome, elapsed) = self
            .probe(LIST_MODELS_PATH, self.transport.get(LIST_MODELS_PATH))
            .await;

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Failed to list available models");
                return Vec::new();
            }
        };

        if !response.is_success() {
            warn!(
                status = response.status,
                "Model listing returned a non-success status"
            );
            return Vec::new();
        }

        match model_names(&response.body) {
            Some(models) => {
                debug!(
                    count = models.len(),
                    elapsed_ms = millis(elapsed),
                    "Listed available models"
                );
                models
            }
            None => {
                warn!("Model listing response could not be parsed");
                Vec::new()
            }
        }
    }

    /// Check several models concurrently. Results follow input order.
    pub async fn check_models_health<I, S>(&self, model_names: I) -> Vec<Arc<HealthCheckResult>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = model_names.into_iter().collect();
        join_all(names.iter().map(|name| self.check_model_health(name.as_ref()))).await
    }

    /// List the service's models, then check each of them
    pub async fn check_available_models_health(&self) -> Vec<Arc<HealthCheckResult>> {
        let models = self.get_available_models().await;
        self.check_models_health(models).await
    }

    /// Run a transport call bounded by the health check timeout.
    ///
    /// Returns the outcome with the time spent on the call.
    pub(super) async fn probe<F>(
        &self,
        path: &str,
        request: F,
    ) -> (std::result::Result<ProbeResponse, ProbeError>, Duration)
    where
        F: Future<Output = std::result::Result<ProbeResponse, ProbeError>>,
    {
        let timeout = self.config.timeout();
        let start = Instant::now();

        let outcome = match tokio::time::timeout(timeout, request).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProbeError::timed_out(
                format!("{}{}", self.transport.base_url(), path),
                timeout,
                start.elapsed(),
            )),
        };

        (outcome, start.elapsed())
    }
}

impl fmt::Debug for HealthCheckClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthCheckClient")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
