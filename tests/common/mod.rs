//! Common test utilities for ai-health-probe
//!
//! - Mock Ollama servers and clients pointed at them
//! - Response fixtures
//! - Result assertions

pub mod fixtures;

use ai_health_probe::{HealthCheckClient, HealthCheckConfig};
use wiremock::MockServer;

pub use assertions::HealthResultAssertions;

/// Address nothing listens on
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

/// Config pointing at `base_url` with a short timeout so failures stay quick
pub fn test_config(base_url: &str) -> HealthCheckConfig {
    HealthCheckConfig {
        timeout_ms: 2_000,
        ..HealthCheckConfig::with_base_url(base_url)
    }
}

/// Start a mock server and a client talking to it
pub async fn mock_service() -> (MockServer, HealthCheckClient) {
    let server = MockServer::start().await;
    let client = HealthCheckClient::new(test_config(&server.uri())).unwrap();
    (server, client)
}

/// Client for `server` with a customized config
pub fn client_for(server: &MockServer, f: impl FnOnce(&mut HealthCheckConfig)) -> HealthCheckClient {
    let mut config = test_config(&server.uri());
    f(&mut config);
    HealthCheckClient::new(config).unwrap()
}

/// Client for an address where every connection is refused
pub fn unreachable_client() -> HealthCheckClient {
    HealthCheckClient::new(test_config(UNREACHABLE_URL)).unwrap()
}
