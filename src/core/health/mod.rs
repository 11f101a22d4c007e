//! Health diagnostics for an AI inference service and its models
//!
//! # Module Structure
//!
//! - `types` - Health status tiers and check results
//! - `cache` - TTL cache of model health results
//! - `transport` - Probe transport trait, reqwest implementation, error classification
//! - `liveness` - Predicate deciding whether the service root response is alive
//! - `wire` - Ollama API paths and payloads
//! - `client` - Client construction, cache access and model listing
//! - `checker` - Service and model health checks
//! - `tests` - Test suite for the client

pub mod cache;
pub mod checker;
pub mod client;
pub mod liveness;
pub mod transport;
pub mod types;
pub mod wire;

pub use cache::{DEFAULT_CACHE_TTL, ResultCache};
pub use client::HealthCheckClient;
pub use liveness::{DEFAULT_LIVENESS_MARKER, LivenessPredicate, MarkerPredicate};
pub use transport::{ProbeError, ProbeResponse, ProbeTransport, ReqwestTransport};
pub use types::{
    Diagnostics, HealthCheckResult, HealthCheckResultBuilder, HealthStatus, MODEL_TARGET_KIND,
    SERVICE_TARGET_KIND,
};
