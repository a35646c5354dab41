//! `eth_blockNumber` liveness probe

use crate::constants::PROBE_REQUEST_ID;
use alloy::transports::http::reqwest::Url;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    id: u64,
    params: &'a [serde_json::Value],
}

/// Bounded-time liveness check for a JSON-RPC endpoint
#[derive(Debug, Clone)]
pub struct HealthProbe {
    client: Client,
    timeout: Duration,
}

impl HealthProbe {
    /// Probe using `client`, giving up after `timeout`
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// `true` when the endpoint answers `eth_blockNumber` with HTTP 200 and a string `result`
    ///
    /// Failures are logged and reported as `false`, never as an error.
    pub async fn is_healthy(&self, url: &Url) -> bool {
        match self.check(url).await {
            Ok(()) => true,
            Err(reason) => {
                tracing::warn!(%url, %reason, "RPC health probe failed");
                false
            }
        }
    }

    async fn check(&self, url: &Url) -> Result<(), String> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method: "eth_blockNumber",
            id: PROBE_REQUEST_ID,
            params: &[],
        };

        let response = self
            .client
            .post(url.as_str())
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.status() != StatusCode::OK {
            return Err(format!("HTTP {}", response.status()));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;
        if body.get("result").is_some_and(serde_json::Value::is_string) {
            Ok(())
        } else {
            Err(format!("unexpected body: {body}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn probe() -> HealthProbe {
        HealthProbe::new(Client::new(), Duration::from_millis(300))
    }

    fn url_of(server: &MockServer) -> Url {
        server.uri().parse().unwrap()
    }

    #[tokio::test]
    async fn test_healthy_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "jsonrpc": "2.0",
                "method": "eth_blockNumber",
                "id": 1,
                "params": []
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": "0x3e8"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        assert!(probe().is_healthy(&url_of(&server)).await);
    }

    #[tokio::test]
    async fn test_http_500_is_unhealthy() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(!probe().is_healthy(&url_of(&server)).await);
    }

    #[tokio::test]
    async fn test_non_string_result_is_unhealthy() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": 1000})),
            )
            .mount(&server)
            .await;

        assert!(!probe().is_healthy(&url_of(&server)).await);
    }

    #[tokio::test]
    async fn test_rpc_error_body_is_unhealthy() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": -32000, "message": "header not found"}
            })))
            .mount(&server)
            .await;

        assert!(!probe().is_healthy(&url_of(&server)).await);
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": "0x1"}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        assert!(!probe().is_healthy(&url_of(&server)).await);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        // Port 9 (discard) on localhost is closed on test machines
        let url: Url = "http://127.0.0.1:9".parse().unwrap();
        assert!(!probe().is_healthy(&url).await);
    }
}
