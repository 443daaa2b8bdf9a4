//! Shared helpers for Bridge service integration tests

use bridge_core::types::{NetworkConfig, RetryPolicy, RetryStrategy};
use bridge_registry::BridgeClient;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Retry policy with millisecond delays so retry tests stay fast
pub fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        strategy: RetryStrategy::FixedDelay,
        backoff_multiplier: 1.0,
        initial_delay_ms: 10,
        max_delay_ms: 10,
    }
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer, retry: RetryPolicy) -> BridgeClient {
    BridgeClient::new(&server.uri(), &NetworkConfig::default(), retry).unwrap()
}

/// Client with a short whole-request timeout
#[allow(dead_code)]
pub fn client_with_timeout(server: &MockServer, secs: u64) -> BridgeClient {
    let network = NetworkConfig {
        http_timeout_secs: secs,
        ..NetworkConfig::default()
    };
    BridgeClient::new(&server.uri(), &network, RetryPolicy::none()).unwrap()
}

/// Serve `fields` for `GET /resource/{resource}`
#[allow(dead_code)]
pub async fn mock_resource(server: &MockServer, resource: &str, fields: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/resource/{}", resource)))
        .respond_with(ResponseTemplate::new(200).set_body_json(fields))
        .mount(server)
        .await;
}

/// Answer `POST /resource/{namespace}/{name}` with `status`, expecting `times` calls
#[allow(dead_code)]
pub async fn mock_register(server: &MockServer, namespace: &str, name: &str, status: u16, times: u64) {
    Mock::given(method("POST"))
        .and(path(format!("/resource/{}/{}", namespace, name)))
        .respond_with(ResponseTemplate::new(status))
        .expect(times)
        .mount(server)
        .await;
}

/// Number of requests the server has seen
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|r| r.len())
        .unwrap_or_default()
}
