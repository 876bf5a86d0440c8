use super::RelayService;
use crate::models::{AltTextRequest, AltTextResponse, ErrorResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Used when a relay error reply carries no readable message.
pub const RELAY_ERROR_FALLBACK: &str = "Failed to generate alt text.";

/// HTTP client for the relay endpoint.
pub struct HttpRelayClient {
    client: Client,
    base_url: String,
}

impl HttpRelayClient {
    pub fn new(base_url: String) -> Self {
        Self::new_with_client(base_url, Client::new())
    }

    pub fn new_with_client(base_url: String, client: Client) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl RelayService for HttpRelayClient {
    async fn generate_alt_text(&self, image_source: &str) -> Result<String> {
        let url = format!("{}/api/imgalt", self.base_url);
        let request = AltTextRequest {
            image_source: image_source.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(30))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach relay endpoint: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| RELAY_ERROR_FALLBACK.to_string());
            tracing::warn!("Relay returned status {}: {}", status, message);
            return Err(Error::Relay(message));
        }

        let body: AltTextResponse = response.json().await?;
        Ok(body.alt)
    }
}
