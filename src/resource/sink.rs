//! Result sinks - where a custom resource outcome is delivered

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use crate::error::{RelayError, Result};
use crate::resource::event::ResourceResponse;

/// Accepts one terminal response per handled event
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn deliver(&self, response_url: &str, response: &ResourceResponse) -> Result<()>;
}

/// Default timeout for the callback PUT
const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivers the response with an HTTP PUT to the pre-signed callback URL
#[derive(Debug, Clone)]
pub struct HttpResultSink {
    client: Client,
}

impl HttpResultSink {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_DELIVERY_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::Delivery(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ResultSink for HttpResultSink {
    async fn deliver(&self, response_url: &str, response: &ResourceResponse) -> Result<()> {
        let body = serde_json::to_vec(response)?;
        log::info!("Response: {}", String::from_utf8_lossy(&body));

        // The pre-signed URL is signed without a content type
        let reply = self
            .client
            .put(response_url)
            .header(CONTENT_TYPE, "")
            .body(body)
            .send()
            .await
            .map_err(|e| RelayError::Delivery(format!("Request failed: {}", e)))?;

        let status = reply.status();
        log::info!("Callback status: {}", status);

        if !status.is_success() {
            let text = reply.text().await.unwrap_or_default();
            return Err(RelayError::Delivery(format!("Callback returned {}: {}", status, text)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_sink_builds() {
        assert!(HttpResultSink::new().is_ok());
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpResultSink>();
    }
}
