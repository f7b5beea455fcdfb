//! Forwarding of completed submissions to the external automation webhook.
//!
//! Completion never blocks on the webhook: the handler spawns the forward
//! and a failure is logged, not surfaced to the client. The next system in
//! the chain owns retries and reconciliation.

use std::time::Duration;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for intake forwarding failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

/// Delivers completed brief submissions to the automation webhook.
pub struct IntakeForwarder {
    client: reqwest::Client,
}

impl IntakeForwarder {
    /// Create a forwarder with a pre-configured HTTP client.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client }
    }

    /// POST one completed submission to the webhook URL.
    pub async fn forward(
        &self,
        url: &str,
        token: &str,
        submission: &serde_json::Value,
    ) -> Result<(), WebhookError> {
        let payload = serde_json::json!({
            "token": token,
            "submitted_at": chrono::Utc::now(),
            "submission": submission,
        });

        let response = self.client.post(url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

impl Default for IntakeForwarder {
    fn default() -> Self {
        Self::new()
    }
}
