//! Webhook push dispatch.
//!
//! POSTs a work order to an external transcription service, which is
//! expected to call back through the update endpoint when done.
//! Delivery is at-most-once: failures are logged and the report stays
//! PENDING until the polling worker retries it.

use std::time::Duration;

use reqwest::Client;

use crate::backend::{DispatchRequest, ProcessingBackend};
use crate::error::DispatchError;

/// Connect timeout for webhook deliveries (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Request timeout for webhook deliveries (30 seconds).
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates an HTTP client with appropriate timeouts.
fn create_http_client() -> Result<Client, DispatchError> {
    Client::builder()
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
        .timeout(DEFAULT_REQUEST_TIMEOUT)
        .build()
        .map_err(|e| DispatchError::HttpClient(e.to_string()))
}

/// Backend that pushes work orders to a configured webhook URL.
pub struct WebhookBackend {
    client: Client,
    webhook_url: String,
}

impl WebhookBackend {
    pub fn new(webhook_url: &str) -> Result<Self, DispatchError> {
        if !webhook_url.starts_with("http://") && !webhook_url.starts_with("https://") {
            return Err(DispatchError::InvalidUrl {
                url: webhook_url.to_string(),
                reason: "must start with http:// or https://".to_string(),
            });
        }

        Ok(Self {
            client: create_http_client()?,
            webhook_url: webhook_url.to_string(),
        })
    }
}

impl ProcessingBackend for WebhookBackend {
    fn dispatch(&self, request: DispatchRequest) {
        let client = self.client.clone();
        let url = self.webhook_url.clone();
        tokio::spawn(async move {
            log::debug!("Dispatching report {} to {}", request.report_id, url);
            match client.post(&url).json(&request).send().await {
                Ok(resp) if resp.status().is_success() => {
                    log::info!("Dispatched report {} to webhook", request.report_id);
                }
                Ok(resp) => {
                    log::error!(
                        "Webhook rejected report {}: HTTP {}",
                        request.report_id,
                        resp.status()
                    );
                }
                Err(e) => {
                    log::error!(
                        "Webhook dispatch failed for report {}: {}",
                        request.report_id,
                        e
                    );
                }
            }
        });
    }
}
