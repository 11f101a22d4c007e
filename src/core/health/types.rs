//! Health status types and check results
//!
//! A [`HealthCheckResult`] is only ever produced through
//! [`HealthCheckResultBuilder`], whose finishers keep the status, failure
//! reasons and cause consistent with each other.

use super::transport::ProbeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::{Duration, Instant};

/// Target kind label for service-level probes
pub const SERVICE_TARGET_KIND: &str = "AI Service";

/// Target kind label for per-model probes
pub const MODEL_TARGET_KIND: &str = "AI Model";

/// Insertion-ordered diagnostic key/value bag
pub type Diagnostics = serde_json::Map<String, Value>;

/// Health status levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Probe succeeded and the content matched expectations
    Healthy,
    /// Probe succeeded at the transport level but the content was unexpected
    Degraded,
    /// Probe failed outright
    Unhealthy,
}

impl HealthStatus {
    /// Check if the status allows AI-assisted operations to proceed
    pub fn allows_requests(&self) -> bool {
        matches!(self, HealthStatus::Healthy | HealthStatus::Degraded)
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Degraded => "Degraded",
            HealthStatus::Unhealthy => "Unhealthy",
        };
        f.write_str(label)
    }
}

/// Outcome of a single health probe
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckResult {
    target_name: String,
    target_kind: String,
    status: HealthStatus,
    latency_ms: u64,
    checked_at: DateTime<Utc>,
    /// Monotonic counterpart of `checked_at`, used for TTL checks
    #[serde(skip)]
    checked_instant: Instant,
    diagnostics: Diagnostics,
    failure_reasons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<ProbeError>,
}

impl HealthCheckResult {
    /// Start building a result for the given target
    pub fn builder(
        target_name: impl Into<String>,
        target_kind: impl Into<String>,
    ) -> HealthCheckResultBuilder {
        HealthCheckResultBuilder {
            target_name: target_name.into(),
            target_kind: target_kind.into(),
            latency_ms: 0,
            diagnostics: Diagnostics::new(),
            failure_reasons: Vec::new(),
            cause: None,
        }
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn target_kind(&self) -> &str {
        &self.target_kind
    }

    pub fn status(&self) -> HealthStatus {
        self.status
    }

    pub fn is_healthy(&self) -> bool {
        self.status.is_healthy()
    }

    /// Probe duration in milliseconds
    pub fn latency_ms(&self) -> u64 {
        self.latency_ms
    }

    pub fn checked_at(&self) -> DateTime<Utc> {
        self.checked_at
    }

    /// Monotonic time at which the result was produced
    pub fn checked_instant(&self) -> Instant {
        self.checked_instant
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Look up a single diagnostic entry
    pub fn diagnostic(&self, key: &str) -> Option<&Value> {
        self.diagnostics.get(key)
    }

    pub fn failure_reasons(&self) -> &[String] {
        &self.failure_reasons
    }

    /// Underlying transport error, if one caused this result
    pub fn cause(&self) -> Option<&ProbeError> {
        self.cause.as_ref()
    }

    /// Whether this result is still younger than `ttl` at the monotonic
    /// instant `now`
    pub fn is_fresh_at(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.checked_instant) < ttl
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        if self.failure_reasons.is_empty() {
            format!(
                "{} '{}': {} ({}ms)",
                self.target_kind, self.target_name, self.status, self.latency_ms
            )
        } else {
            format!(
                "{} '{}': {} ({}ms): {}",
                self.target_kind,
                self.target_name,
                self.status,
                self.latency_ms,
                self.failure_reasons.join("; ")
            )
        }
    }
}

/// Builder for [`HealthCheckResult`]
#[derive(Debug)]
pub struct HealthCheckResultBuilder {
    target_name: String,
    target_kind: String,
    latency_ms: u64,
    diagnostics: Diagnostics,
    failure_reasons: Vec<String>,
    cause: Option<ProbeError>,
}

impl HealthCheckResultBuilder {
    /// Record the probe duration
    pub fn latency(mut self, elapsed: Duration) -> Self {
        self.latency_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Add a diagnostic entry. JSON nulls are dropped so absent data stays an
    /// omitted key.
    pub fn diagnostic(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        if !value.is_null() {
            self.diagnostics.insert(key.into(), value);
        }
        self
    }

    /// Add a diagnostic entry only when a value is present
    pub fn diagnostic_opt<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.diagnostic(key, value),
            None => self,
        }
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.failure_reasons.push(reason.into());
        self
    }

    pub fn cause(mut self, cause: ProbeError) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Finish as Healthy. Any recorded reasons or cause are discarded.
    pub fn healthy(mut self) -> HealthCheckResult {
        self.failure_reasons.clear();
        self.cause = None;
        self.finish(HealthStatus::Healthy)
    }

    /// Finish as Degraded
    pub fn degraded(self) -> HealthCheckResult {
        self.finish(HealthStatus::Degraded)
    }

    /// Finish as Unhealthy
    pub fn unhealthy(self) -> HealthCheckResult {
        self.finish(HealthStatus::Unhealthy)
    }

    fn finish(mut self, status: HealthStatus) -> HealthCheckResult {
        if status != HealthStatus::Healthy && self.failure_reasons.is_empty() {
            self.failure_reasons
                .push(format!("Health check reported {} without details", status));
        }

        HealthCheckResult {
            target_name: self.target_name,
            target_kind: self.target_kind,
            status,
            latency_ms: self.latency_ms,
            checked_at: Utc::now(),
            checked_instant: Instant::now(),
            diagnostics: self.diagnostics,
            failure_reasons: self.failure_reasons,
            cause: self.cause,
        }
    }
}
