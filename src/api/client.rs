//! HTTP client for the SAC-DM backend.
//!
//! Only the baseline endpoint is used by the viewer: readings arrive over
//! MQTT, while the per-device mean and standard deviation are fetched here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::types::{Baseline, DeviceId};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (connect, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Anything that can answer "what is the baseline of this device".
#[async_trait]
pub trait BaselineSource: Send + Sync + 'static {
    async fn fetch_baseline(&self, device_id: DeviceId) -> Result<Baseline>;
}

#[derive(Debug, Clone)]
pub struct SacDmClient {
    client: Client,
    base_url: String,
}

impl SacDmClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Request)?;

        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn baseline_url(&self, device_id: DeviceId) -> String {
        format!("{}/sacdm_default/device/{}", self.base_url, device_id)
    }

    pub async fn get_baseline(&self, device_id: DeviceId) -> Result<Baseline> {
        let response = self.client.get(self.baseline_url(device_id)).send().await?;
        let status = response.status();

        if status.is_success() {
            return response.json().await.map_err(ApiError::Request);
        }

        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| status.to_string());

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl BaselineSource for SacDmClient {
    async fn fetch_baseline(&self, device_id: DeviceId) -> Result<Baseline> {
        self.get_baseline(device_id).await
    }
}

/// Pulls a human-readable message out of an error body.
fn error_message(body: &serde_json::Value) -> Option<String> {
    ["detail", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(|v| v.as_str()))
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(id: u32) -> DeviceId {
        DeviceId::new(id).unwrap()
    }

    #[test]
    fn test_client_normalizes_url() {
        let client = SacDmClient::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.baseline_url(device(7)),
            "http://localhost:8000/sacdm_default/device/7"
        );
    }

    #[test]
    fn test_client_invalid_url() {
        let result = SacDmClient::new("localhost:8000", Duration::from_secs(1));
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_error_message_prefers_detail() {
        let body = serde_json::json!({ "detail": "Device not found", "error": "x" });
        assert_eq!(error_message(&body).as_deref(), Some("Device not found"));

        let body = serde_json::json!({ "error": "Mean values not found" });
        assert_eq!(error_message(&body).as_deref(), Some("Mean values not found"));

        assert_eq!(error_message(&serde_json::json!("plain")), None);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_request_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let client = SacDmClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let result = client.get_baseline(device(1)).await;
        assert!(matches!(result, Err(ApiError::Request(_))));
    }
}
