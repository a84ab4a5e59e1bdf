/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for bitso-adapter tests

use std::sync::Arc;

use bitso_adapter::{BitsoClient, ClientConfig, Credentials, MockTransport};
use wiremock::{MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-key";
pub const TEST_API_SECRET: &str = "test-secret";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_API_KEY, TEST_API_SECRET).expect("test credentials")
}

/// Signed client pointed at the mock server
#[allow(dead_code)]
pub fn signed_client(server: &MockServer) -> BitsoClient {
    BitsoClient::with_base_url(ClientConfig::default(), &server.uri(), Some(test_credentials()))
        .expect("client init")
}

/// Signed client over a recording transport that answers every call with `body`
#[allow(dead_code)]
pub fn spy_client(body: &str) -> (BitsoClient, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::with_body(body));
    let client = BitsoClient::with_transport(
        transport.clone(),
        bitso_adapter::http::PRODUCTION_BASE_URL,
        Some(test_credentials()),
    )
    .expect("client init");
    (client, transport)
}

/// `200` response wrapping `payload` in a success envelope
#[allow(dead_code)]
pub fn envelope(payload: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "success": true,
        "payload": payload,
    }))
}
