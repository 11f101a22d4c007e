//! Configuration loading integration tests

#[cfg(test)]
mod tests {
    use ai_health_probe::config::validation::MAX_HEALTH_CHECK_TIMEOUT_MS;
    use ai_health_probe::{HealthCheckClient, HealthCheckConfig, HealthError, ModelCachePolicy};
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    /// Test loading a complete YAML file
    #[tokio::test]
    async fn test_from_file() {
        let file = write_config(
            r#"
base_url: "http://gpu-box:11434"
timeout_ms: 3000
cache_ttl_secs: 120
liveness_marker: "Ollama is running"
service_name: "GPU Ollama"
model_cache_policy: all_outcomes
"#,
        );

        let config = HealthCheckConfig::from_file(file.path()).await.unwrap();

        assert_eq!(config.base_url, "http://gpu-box:11434");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.cache_ttl(), Duration::from_secs(120));
        assert_eq!(config.service_name, "GPU Ollama");
        assert_eq!(config.model_cache_policy, ModelCachePolicy::AllOutcomes);

        let client = HealthCheckClient::new(config).unwrap();
        assert_eq!(client.base_url(), "http://gpu-box:11434");
    }

    /// Test that an empty file yields the defaults
    #[tokio::test]
    async fn test_from_empty_mapping() {
        let file = write_config("{}\n");
        let config = HealthCheckConfig::from_file(file.path()).await.unwrap();
        assert_eq!(config, HealthCheckConfig::default());
    }

    /// Test that a missing file surfaces the IO error
    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = HealthCheckConfig::from_file(dir.path().join("absent.yaml")).await;
        match result {
            Err(HealthError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected an IO error, got {:?}", other),
        }
    }

    /// Test that broken YAML surfaces the parser error
    #[tokio::test]
    async fn test_unparsable_file() {
        let file = write_config("base_url: [unterminated\n");
        let result = HealthCheckConfig::from_file(file.path()).await;
        assert!(matches!(result, Err(HealthError::Yaml(_))));
    }

    /// Test that out-of-range values are rejected on load
    #[tokio::test]
    async fn test_invalid_values_rejected() {
        let file = write_config(&format!("timeout_ms: {}\n", MAX_HEALTH_CHECK_TIMEOUT_MS + 1));
        let result = HealthCheckConfig::from_file(file.path()).await;
        assert!(matches!(result, Err(HealthError::Validation(msg)) if msg.contains("timeout")));

        let file = write_config("base_url: \"ftp://models.local\"\n");
        assert!(HealthCheckConfig::from_file(file.path()).await.is_err());
    }

    /// Test that a client refuses an invalid base URL
    #[test]
    fn test_client_rejects_bad_url() {
        let result = HealthCheckClient::new(HealthCheckConfig::with_base_url("not a url"));
        assert!(result.is_err());
    }
}
