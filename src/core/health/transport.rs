//! Probe transport
//!
//! [`ProbeTransport`] is the seam between the health client and the network.
//! Transport failures are translated into a [`ProbeError`] variant exactly once,
//! in [`ProbeError::from_reqwest`]; the client never inspects raw HTTP client
//! errors. Non-success HTTP statuses are not errors here, they come back as a
//! [`ProbeResponse`] for the client to classify.

use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::error::Error as StdError;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Raw outcome of an HTTP exchange that produced a status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase for the status, when known
    pub reason: Option<String>,
    /// Response headers in the order received
    pub headers: Vec<(String, String)>,
    /// Response body decoded as text
    pub body: String,
}

impl ProbeResponse {
    /// Build a response with no headers, mostly for tests and custom transports
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(str::to_string),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `name: value` pairs joined with `; `
    pub fn headers_summary(&self) -> String {
        self.headers
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Classified transport failure
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeError {
    /// Host unreachable, connection refused, DNS failure
    #[error("Unable to connect to {url}: {message}")]
    ConnectionFailed {
        url: String,
        message: String,
        inner: Option<String>,
    },

    /// The probe did not complete within the health check timeout
    #[error("Request to {url} timed out after {timeout_ms}ms")]
    TimedOut {
        url: String,
        timeout_ms: u64,
        elapsed_ms: u64,
    },

    /// The response arrived but could not be read or decoded
    #[error("Malformed response from {url}: {message}")]
    Malformed { url: String, message: String },

    /// Anything else
    #[error("Unexpected {error_type} error calling {url}: {message}")]
    Other {
        url: String,
        error_type: String,
        message: String,
        trace: Vec<String>,
    },
}

impl ProbeError {
    /// Stable variant name, reported as the `ExceptionType` diagnostic
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::ConnectionFailed { .. } => "ConnectionFailed",
            ProbeError::TimedOut { .. } => "TimedOut",
            ProbeError::Malformed { .. } => "Malformed",
            ProbeError::Other { .. } => "Other",
        }
    }

    pub fn timed_out(url: impl Into<String>, timeout: Duration, elapsed: Duration) -> Self {
        ProbeError::TimedOut {
            url: url.into(),
            timeout_ms: millis(timeout),
            elapsed_ms: millis(elapsed),
        }
    }

    /// Translate a reqwest failure into a probe error classification
    pub fn from_reqwest(
        err: &reqwest::Error,
        url: &str,
        timeout: Duration,
        elapsed: Duration,
    ) -> Self {
        let chain = source_chain(err);

        if err.is_timeout() {
            Self::timed_out(url, timeout, elapsed)
        } else if err.is_connect() {
            ProbeError::ConnectionFailed {
                url: url.to_string(),
                message: err.to_string(),
                inner: chain.last().cloned(),
            }
        } else if err.is_decode() || err.is_body() {
            ProbeError::Malformed {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            let error_type = if err.is_builder() {
                "builder"
            } else if err.is_redirect() {
                "redirect"
            } else if err.is_request() {
                "request"
            } else {
                "http"
            };
            ProbeError::Other {
                url: url.to_string(),
                error_type: error_type.to_string(),
                message: err.to_string(),
                trace: chain,
            }
        }
    }
}

fn source_chain(err: &dyn StdError) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = err.source();
    while let Some(source) = current {
        chain.push(source.to_string());
        current = source.source();
    }
    chain
}

pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Network client used to issue health probes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    /// Base URL every path is resolved against
    fn base_url(&self) -> String;

    /// Issue a GET for `path`
    async fn get(&self, path: &str) -> std::result::Result<ProbeResponse, ProbeError>;

    /// Issue a POST for `path` with a JSON body
    async fn post_json(
        &self,
        path: &str,
        body: Value,
    ) -> std::result::Result<ProbeResponse, ProbeError>;
}

/// [`ProbeTransport`] backed by a `reqwest::Client` with a fixed short timeout
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport for `base_url` whose requests give up after `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| {
            crate::utils::error::HealthError::config(format!(
                "Invalid base URL '{}': {}",
                base_url, e
            ))
        })?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute(
        &self,
        url: String,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<ProbeResponse, ProbeError> {
        let start = Instant::now();

        let response = request
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(&e, &url, self.timeout, start.elapsed()))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or("<binary>").to_string(),
                )
            })
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| ProbeError::from_reqwest(&e, &url, self.timeout, start.elapsed()))?;

        debug!(url = %url, status = status.as_u16(), elapsed_ms = millis(start.elapsed()), "Probe completed");

        Ok(ProbeResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            headers,
            body,
        })
    }
}

#[async_trait]
impl ProbeTransport for ReqwestTransport {
    fn base_url(&self) -> String {
        self.base_url.clone()
    }

    async fn get(&self, path: &str) -> std::result::Result<ProbeResponse, ProbeError> {
        let url = self.endpoint(path);
        let request = self.client.get(&url);
        self.execute(url, request).await
    }

    async fn post_json(
        &self,
        path: &str,
        body: Value,
    ) -> std::result::Result<ProbeResponse, ProbeError> {
        let url = self.endpoint(path);
        let request = self.client.post(&url).json(&body);
        self.execute(url, request).await
    }
}
