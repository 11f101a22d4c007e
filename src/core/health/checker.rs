//! Service and model health checks
//!
//! Every path through these checks ends in a [`HealthCheckResult`]. Transport
//! failures share one classification, [`failure_result`], so service and
//! model probes report connection problems and timeouts the same way.

use super::client::HealthCheckClient;
use super::transport::{ProbeError, ProbeResponse};
use super::types::{
    HealthCheckResult, HealthCheckResultBuilder, MODEL_TARGET_KIND, SERVICE_TARGET_KIND,
};
use super::wire::{ROOT_PATH, SHOW_MODEL_PATH, ShowModelResponse, show_model_request};
use crate::config::ModelCachePolicy;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Body excerpt quoted when the root response lacks the liveness marker
pub const UNEXPECTED_BODY_EXCERPT_CHARS: usize = 100;

/// Body excerpt recorded for non-success responses
pub const ERROR_BODY_EXCERPT_CHARS: usize = 200;

/// Cap for long model fields such as the modelfile and template
pub const MODEL_FIELD_EXCERPT_CHARS: usize = 500;

/// Target name used when a model check is asked for a blank name
pub const UNKNOWN_MODEL_NAME: &str = "Unknown Model";

impl HealthCheckClient {
    /// Probe the service root. Never cached.
    pub async fn check_service_health(&self) -> HealthCheckResult {
        let base_url = self.transport.base_url();
        let (outcome, elapsed) = self
            .probe(ROOT_PATH, self.transport.get(ROOT_PATH))
            .await;

        let builder = HealthCheckResult::builder(&self.config.service_name, SERVICE_TARGET_KIND)
            .latency(elapsed)
            .diagnostic("Endpoint", base_url);

        let result = match outcome {
            Ok(response) => self.classify_service_response(builder, response),
            Err(error) => failure_result(builder, error),
        };

        log_result(&result);
        result
    }

    /// Check that `model_name` is loaded and queryable.
    ///
    /// Fresh cached results are returned as the same `Arc` without probing.
    pub async fn check_model_health(&self, model_name: &str) -> Arc<HealthCheckResult> {
        if model_name.trim().is_empty() {
            warn!("Model health check requested without a model name");
            return Arc::new(invalid_model_name_result(model_name));
        }

        if let Some(cached) = self.cache.get(model_name) {
            debug!(
                model = model_name,
                status = %cached.status(),
                "Model health served from cache"
            );
            return cached;
        }

        let base_url = self.transport.base_url();
        let (outcome, elapsed) = self
            .probe(
                SHOW_MODEL_PATH,
                self.transport
                    .post_json(SHOW_MODEL_PATH, show_model_request(model_name)),
            )
            .await;

        let endpoint = format!("{}{}", base_url, SHOW_MODEL_PATH);
        let builder = HealthCheckResult::builder(model_name, MODEL_TARGET_KIND)
            .latency(elapsed)
            .diagnostic("Endpoint", base_url);

        let (result, cacheable) = match outcome {
            Ok(response) => classify_model_response(builder, model_name, &endpoint, response),
            Err(error) => (failure_result(builder, error), false),
        };

        let result = Arc::new(result);
        if cacheable || self.config.model_cache_policy == ModelCachePolicy::AllOutcomes {
            self.cache.insert(model_name, Arc::clone(&result));
        }

        log_result(&result);
        result
    }

    fn classify_service_response(
        &self,
        builder: HealthCheckResultBuilder,
        response: ProbeResponse,
    ) -> HealthCheckResult {
        let builder = builder.diagnostic("HttpStatusCode", response.status);

        if !response.is_success() {
            return non_success_result(builder, "AI service", &response);
        }

        let headers = response.headers_summary();
        let builder = builder
            .diagnostic_opt("Headers", (!headers.is_empty()).then_some(headers))
            .diagnostic(
                "ResponseBody",
                excerpt(&response.body, UNEXPECTED_BODY_EXCERPT_CHARS),
            );

        if self.liveness.is_live(&response.body) {
            builder.healthy()
        } else {
            builder
                .reason(format!(
                    "Unexpected response from AI service: {}",
                    excerpt(&response.body, UNEXPECTED_BODY_EXCERPT_CHARS)
                ))
                .degraded()
        }
    }
}

/// Result for a blank model name. No probe is made and nothing is cached.
fn invalid_model_name_result(model_name: &str) -> HealthCheckResult {
    HealthCheckResult::builder(UNKNOWN_MODEL_NAME, MODEL_TARGET_KIND)
        .latency(Duration::ZERO)
        .diagnostic("ProvidedName", model_name)
        .reason("Model name cannot be empty")
        .unhealthy()
}

/// Classify an `/api/show` response. The flag says whether the default cache
/// policy stores the result.
fn classify_model_response(
    builder: HealthCheckResultBuilder,
    model_name: &str,
    endpoint: &str,
    response: ProbeResponse,
) -> (HealthCheckResult, bool) {
    let builder = builder.diagnostic("HttpStatusCode", response.status);

    if response.status == 404 {
        let result = builder
            .diagnostic("ResponseBody", response.body.as_str())
            .reason(format!("Model '{}' not found", model_name))
            .reason(format!(
                "The model may need to be pulled (ollama pull {}) or the name may be wrong",
                model_name
            ))
            .reason(format!("Response: {}", response.body))
            .unhealthy();
        return (result, true);
    }

    if !response.is_success() {
        return (
            non_success_result(builder, &format!("Model '{}'", model_name), &response),
            false,
        );
    }

    let show: ShowModelResponse = match serde_json::from_str(&response.body) {
        Ok(show) => show,
        Err(e) => {
            let error = ProbeError::Malformed {
                url: endpoint.to_string(),
                message: format!("Invalid model details JSON: {}", e),
            };
            return (failure_result(builder, error), false);
        }
    };

    let details = show.details.unwrap_or_default();
    let cap = |s: String| excerpt(&s, MODEL_FIELD_EXCERPT_CHARS);
    let result = builder
        .diagnostic_opt("ModelFile", show.modelfile.map(cap))
        .diagnostic_opt("Parameters", show.parameters.map(cap))
        .diagnostic_opt("Template", show.template.map(cap))
        .diagnostic_opt("ParameterSize", details.parameter_size)
        .diagnostic_opt("QuantizationLevel", details.quantization_level)
        .diagnostic_opt("Family", details.family)
        .diagnostic_opt("Format", details.format)
        .healthy();

    (result, true)
}

fn non_success_result(
    builder: HealthCheckResultBuilder,
    target: &str,
    response: &ProbeResponse,
) -> HealthCheckResult {
    let body = excerpt(&response.body, ERROR_BODY_EXCERPT_CHARS);
    let status_line = match &response.reason {
        Some(reason) => format!("HTTP {} {}", response.status, reason),
        None => format!("HTTP {}", response.status),
    };

    builder
        .diagnostic_opt("ReasonPhrase", response.reason.clone())
        .diagnostic("ResponseBody", body.as_str())
        .reason(format!("{} returned {}", target, status_line))
        .reason(format!("Response: {}", body))
        .unhealthy()
}

/// Shared classification of transport failures
pub(crate) fn failure_result(
    builder: HealthCheckResultBuilder,
    error: ProbeError,
) -> HealthCheckResult {
    let mut builder = builder.diagnostic("ExceptionType", error.kind());

    match &error {
        ProbeError::ConnectionFailed {
            url,
            message,
            inner,
        } => {
            builder = builder
                .diagnostic("ExceptionMessage", message.as_str())
                .diagnostic_opt("InnerException", inner.clone())
                .reason(format!("Unable to connect to AI service at {}", url))
                .reason(message.clone());
            if let Some(inner) = inner {
                builder = builder.reason(inner.clone());
            }
        }
        ProbeError::TimedOut {
            timeout_ms,
            elapsed_ms,
            ..
        } => {
            builder = builder
                .diagnostic("TimeoutMs", *timeout_ms)
                .diagnostic("ElapsedMs", *elapsed_ms)
                .reason(format!("Health check timed out after {}ms", timeout_ms))
                .reason("The AI service may be overloaded or unresponsive");
        }
        ProbeError::Malformed { message, .. } => {
            builder = builder
                .diagnostic("ExceptionMessage", message.as_str())
                .reason("Unexpected error during health check");
        }
        ProbeError::Other { message, trace, .. } => {
            builder = builder
                .diagnostic("ExceptionMessage", message.as_str())
                .diagnostic_opt(
                    "StackTrace",
                    (!trace.is_empty()).then(|| trace.join("\n")),
                )
                .reason("Unexpected error during health check");
        }
    }

    builder.cause(error).unhealthy()
}

/// Cut `text` to at most `max_chars` characters, marking the cut with `...`
pub(crate) fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

fn log_result(result: &HealthCheckResult) {
    if result.is_healthy() {
        info!(
            target_name = result.target_name(),
            target_kind = result.target_kind(),
            latency_ms = result.latency_ms(),
            "Health check passed"
        );
    } else {
        warn!(
            target_name = result.target_name(),
            target_kind = result.target_kind(),
            status = %result.status(),
            latency_ms = result.latency_ms(),
            reasons = ?result.failure_reasons(),
            "Health check failed"
        );
    }
}
