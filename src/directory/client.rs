//! HTTP client for the upstream directory
//!
//! A thin wrapper over a pooled `reqwest::Client` with a request timeout.
//! Transport failures and non-success statuses are mapped to `UpstreamError`.
//! There are no retries.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::UpstreamError;

/// HTTP client used to reach the upstream directory
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    /// Create a new client with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("apidir-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Perform a GET request and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        debug!(url = url, "Sending HTTP GET request");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::NetworkTimeout
            } else if e.is_connect() {
                UpstreamError::ConnectionRefused
            } else {
                UpstreamError::Network(e.to_string())
            }
        })?;

        match response.status() {
            StatusCode::OK => {
                let body = response
                    .bytes()
                    .await
                    .map_err(|e| UpstreamError::Network(e.to_string()))?;

                debug!(url = url, body_size = body.len(), "Received response");

                serde_json::from_slice(&body).map_err(|e| UpstreamError::InvalidData(e.to_string()))
            }
            status => {
                warn!(url = url, status = status.as_u16(), "Unexpected status");
                Err(UpstreamError::Status(status.as_u16()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        value: u32,
    }

    fn client() -> UpstreamClient {
        UpstreamClient::new(Duration::from_secs(5)).unwrap()
    }

    // Test 1: Successful GET decodes the JSON body
    #[tokio::test]
    async fn test_get_json_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/payload"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"value": 7}"#))
            .mount(&mock_server)
            .await;

        let result: Payload = client()
            .get_json(&format!("{}/payload", mock_server.uri()))
            .await
            .unwrap();

        assert_eq!(result, Payload { value: 7 });
    }

    // Test 2: Server error status is reported with its code
    #[tokio::test]
    async fn test_get_json_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let result: Result<Payload, _> = client().get_json(&mock_server.uri()).await;

        assert_eq!(result, Err(UpstreamError::Status(503)));
    }

    // Test 3: Non-200 success codes are not accepted either
    #[tokio::test]
    async fn test_get_json_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let result: Result<Payload, _> = client().get_json(&mock_server.uri()).await;

        assert_eq!(result, Err(UpstreamError::Status(404)));
    }

    // Test 4: Undecodable body is invalid data
    #[tokio::test]
    async fn test_get_json_invalid_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let result: Result<Payload, _> = client().get_json(&mock_server.uri()).await;

        assert!(matches!(result, Err(UpstreamError::InvalidData(_))));
    }

    // Test 5: Slow upstream hits the timeout
    #[tokio::test]
    async fn test_get_json_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"value": 1}"#)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let client = UpstreamClient::new(Duration::from_millis(100)).unwrap();
        let result: Result<Payload, _> = client.get_json(&mock_server.uri()).await;

        assert_eq!(result, Err(UpstreamError::NetworkTimeout));
    }

    // Test 6: Nothing listening is a connection failure
    #[tokio::test]
    async fn test_get_json_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result: Result<Payload, _> = client().get_json(&format!("http://{}/", addr)).await;

        assert_eq!(result, Err(UpstreamError::ConnectionRefused));
    }
}
