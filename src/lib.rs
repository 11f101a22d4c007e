//! # ai-health-probe
//!
//! Health diagnostics for Ollama-compatible AI inference services.
//!
//! The client answers two independent questions: is the service up
//! ([`HealthCheckClient::check_service_health`]), and is a given model loaded
//! and queryable ([`HealthCheckClient::check_model_health`]). Every probe
//! returns a [`HealthCheckResult`] with a Healthy / Degraded / Unhealthy
//! verdict and a diagnostics bag; probes never return errors. Model results
//! are cached per client for a short TTL.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ai_health_probe::{HealthCheckClient, HealthCheckConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HealthCheckClient::new(HealthCheckConfig::default())?;
//!
//!     let service = client.check_service_health().await;
//!     println!("{}", service.summary());
//!
//!     if service.status().allows_requests() {
//!         for model in client.get_available_models().await {
//!             let health = client.check_model_health(&model).await;
//!             println!("{}", health.summary());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::{HealthCheckConfig, ModelCachePolicy};
pub use core::health::{
    HealthCheckClient, HealthCheckResult, HealthStatus, LivenessPredicate, MarkerPredicate,
    ProbeError, ProbeResponse, ProbeTransport, ReqwestTransport,
};
pub use utils::error::{HealthError, Result};
