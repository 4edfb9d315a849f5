//! Vendor HTTP client
//!
//! One POST per call against an OpenAI-compatible chat-completions endpoint.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::config::ProviderConfig;
use crate::core::models::ChatCompletionRequest;
use crate::errors::RelayError;

/// Sends a chat-completion request and returns the raw response body.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatCompletionRequest) -> Result<String, RelayError>;
}

/// Pooled reqwest client bound to a single vendor endpoint.
pub struct HttpRelay {
    client: Client,
    endpoint: String,
}

impl HttpRelay {
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn new(provider: &ProviderConfig, timeout: Duration) -> Result<Self, RelayError> {
        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", provider.api_key))
            .map_err(|e| RelayError::Internal(format!("Invalid Authorization header: {e}")))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::Internal(format!("Failed to build vendor HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: provider.endpoint.clone(),
        })
    }
}

#[async_trait]
impl ChatTransport for HttpRelay {
    async fn send(&self, request: &ChatCompletionRequest) -> Result<String, RelayError> {
        info!(
            endpoint = %self.endpoint,
            model = %request.model,
            "Calling vendor chat-completions API"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            warn!(status = status.as_u16(), "Vendor API returned an error status");
            return Err(RelayError::VendorStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;

        #[cfg(feature = "debug-logs")]
        debug!("Vendor response body: {}", body);

        #[cfg(not(feature = "debug-logs"))]
        debug!(bytes = body.len(), "Vendor response received");

        Ok(body)
    }
}
