//! Service liveness integration tests

#[cfg(test)]
mod tests {
    use crate::common::fixtures::LIVENESS_BODY;
    use crate::common::{HealthResultAssertions, client_for, mock_service, unreachable_client};
    use ai_health_probe::{HealthStatus, ProbeError};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Test that the liveness marker yields a healthy result
    #[tokio::test]
    async fn test_running_service_is_healthy() {
        let (server, client) = mock_service().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/plain; charset=utf-8")
                    .set_body_string(LIVENESS_BODY),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client.check_service_health().await;

        assert_eq!(result.status(), HealthStatus::Healthy);
        assert_eq!(result.target_name(), "Ollama Service");
        assert_eq!(result.target_kind(), "AI Service");
        assert_eq!(result.diagnostic("HttpStatusCode"), Some(&json!(200)));
        assert_eq!(result.diagnostic("Endpoint"), Some(&json!(server.uri())));
        let headers = result.diagnostic("Headers").unwrap().as_str().unwrap();
        assert!(headers.contains("content-type: text/plain"));
        result.assert_consistent();
    }

    /// Test that every call reaches the network
    #[tokio::test]
    async fn test_service_checks_are_not_cached() {
        let (server, client) = mock_service().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LIVENESS_BODY))
            .expect(3)
            .mount(&server)
            .await;

        for _ in 0..3 {
            assert!(client.check_service_health().await.is_healthy());
        }
    }

    /// Test that a 200 without the marker is degraded, not unhealthy
    #[tokio::test]
    async fn test_unexpected_body_is_degraded() {
        let (server, client) = mock_service().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<h1>Welcome to nginx!</h1>"))
            .mount(&server)
            .await;

        let result = client.check_service_health().await;

        assert_eq!(result.status(), HealthStatus::Degraded);
        assert!(result.status().allows_requests());
        result.assert_reason_contains("Unexpected response from AI service");
        result.assert_reason_contains("nginx");
        result.assert_consistent();
    }

    /// Test that the marker match ignores case
    #[tokio::test]
    async fn test_marker_match_is_case_insensitive() {
        let (server, client) = mock_service().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OLLAMA IS RUNNING\n"))
            .mount(&server)
            .await;

        assert!(client.check_service_health().await.is_healthy());
    }

    /// Test that a configured marker replaces the default
    #[tokio::test]
    async fn test_custom_liveness_marker() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LIVENESS_BODY))
            .mount(&server)
            .await;

        let client = client_for(&server, |config| {
            config.liveness_marker = "vLLM server ready".to_string();
            config.service_name = "vLLM".to_string();
        });
        let result = client.check_service_health().await;

        assert_eq!(result.status(), HealthStatus::Degraded);
        assert_eq!(result.target_name(), "vLLM");
    }

    /// Test that an error status is unhealthy with status details
    #[tokio::test]
    async fn test_error_status_is_unhealthy() {
        let (server, client) = mock_service().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway upstream"))
            .mount(&server)
            .await;

        let result = client.check_service_health().await;

        assert_eq!(result.status(), HealthStatus::Unhealthy);
        assert!(!result.status().allows_requests());
        assert_eq!(result.diagnostic("HttpStatusCode"), Some(&json!(502)));
        assert_eq!(result.diagnostic("ReasonPhrase"), Some(&json!("Bad Gateway")));
        assert_eq!(
            result.diagnostic("ResponseBody"),
            Some(&json!("bad gateway upstream"))
        );
        result.assert_reason_contains("HTTP 502");
        assert!(result.cause().is_none());
    }

    /// Test that a refused connection is unhealthy with the cause attached
    #[tokio::test]
    async fn test_unreachable_service() {
        let client = unreachable_client();

        let result = client.check_service_health().await;

        assert_eq!(result.status(), HealthStatus::Unhealthy);
        result.assert_reason_contains("unable to connect");
        result.assert_reason_contains("127.0.0.1:1");
        assert!(matches!(result.cause(), Some(ProbeError::ConnectionFailed { .. })));
        assert_eq!(
            result.diagnostic("ExceptionType"),
            Some(&json!("ConnectionFailed"))
        );
        result.assert_consistent();
    }

    /// Test that a slow service is reported as timed out
    #[tokio::test]
    async fn test_slow_service_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(LIVENESS_BODY)
                    .set_delay(Duration::from_millis(1_500)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, |config| config.timeout_ms = 100);
        let result = client.check_service_health().await;

        assert_eq!(result.status(), HealthStatus::Unhealthy);
        result.assert_reason_contains("timed out after 100ms");
        assert!(matches!(
            result.cause(),
            Some(ProbeError::TimedOut { timeout_ms: 100, .. })
        ));
        assert!(result.latency_ms() < 1_500);
    }

    /// Test that a redirect loop is classified as an unexpected error
    #[tokio::test]
    async fn test_redirect_loop_is_unexpected_error() {
        let (server, client) = mock_service().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(302).insert_header("location", "/"))
            .mount(&server)
            .await;

        let result = client.check_service_health().await;

        assert_eq!(result.status(), HealthStatus::Unhealthy);
        assert_eq!(
            result.failure_reasons(),
            ["Unexpected error during health check".to_string()]
        );
        assert_eq!(result.diagnostic("ExceptionType"), Some(&json!("Other")));
        match result.cause() {
            Some(ProbeError::Other { error_type, url, .. }) => {
                assert_eq!(error_type, "redirect");
                assert!(url.starts_with(&server.uri()));
            }
            other => panic!("expected an Other cause, got {:?}", other),
        }
        result.assert_consistent();
    }

    /// Test that results serialize with the cause tagged by kind
    #[tokio::test]
    async fn test_result_serialization() {
        let client = unreachable_client();
        let result = client.check_service_health().await;

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "unhealthy");
        assert_eq!(value["target_kind"], "AI Service");
        assert_eq!(value["cause"]["kind"], "connection_failed");
        assert!(value["failure_reasons"].as_array().unwrap().len() >= 2);
    }
}
