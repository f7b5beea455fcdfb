//! Gmail REST transport with delegated-credential refresh.

use std::time::Duration;

use serde::Deserialize;

use crate::message;
use crate::{Mailer, OutgoingEmail, SentMessage};

/// HTTP request timeout for a single outbound call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default Google OAuth token endpoint.
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Default Gmail message-send endpoint.
const DEFAULT_SEND_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for mail dispatch failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// The refresh-token exchange was rejected by the identity provider,
    /// usually an expired or revoked grant. Carries the provider's error
    /// body for diagnostics.
    #[error("Failed to refresh token: {0}")]
    CredentialExchange(String),

    /// The send endpoint rejected the message. Carries the provider's error
    /// body.
    #[error("Gmail API error: {0}")]
    Send(String),

    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// OAuth client credentials plus provider endpoints.
///
/// The client id/secret are known only to the server process; they are
/// combined with each creator's stored refresh token to mint short-lived
/// access tokens.
#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Token endpoint; overridable for tests.
    pub token_url: String,
    /// Message-send endpoint; overridable for tests.
    pub send_url: String,
}

impl GoogleOAuthConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Required | Default                   |
    /// |------------------------|----------|---------------------------|
    /// | `GOOGLE_CLIENT_ID`     | **yes**  | --                        |
    /// | `GOOGLE_CLIENT_SECRET` | **yes**  | --                        |
    /// | `GOOGLE_TOKEN_URL`     | no       | Google's token endpoint   |
    /// | `GMAIL_SEND_URL`       | no       | Gmail's send endpoint     |
    ///
    /// # Panics
    ///
    /// Panics if either required variable is missing, which is the desired
    /// behaviour -- we want misconfiguration to fail fast at startup.
    pub fn from_env() -> Self {
        let client_id = std::env::var("GOOGLE_CLIENT_ID")
            .expect("GOOGLE_CLIENT_ID must be set in the environment");
        let client_secret = std::env::var("GOOGLE_CLIENT_SECRET")
            .expect("GOOGLE_CLIENT_SECRET must be set in the environment");

        Self {
            client_id,
            client_secret,
            token_url: std::env::var("GOOGLE_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
            send_url: std::env::var("GMAIL_SEND_URL")
                .unwrap_or_else(|_| DEFAULT_SEND_URL.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// Sends email through the Gmail REST API as the credential's owner.
pub struct GmailClient {
    http: reqwest::Client,
    oauth: GoogleOAuthConfig,
}

impl GmailClient {
    /// Create a client with a pre-configured HTTP transport.
    pub fn new(oauth: GoogleOAuthConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { http, oauth }
    }

    /// Exchange a long-lived refresh token for a short-lived access token.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, MailError> {
        let response = self
            .http
            .post(&self.oauth.token_url)
            .form(&[
                ("client_id", self.oauth.client_id.as_str()),
                ("client_secret", self.oauth.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::CredentialExchange(body));
        }

        let body: TokenResponse = response.json().await?;
        Ok(body.access_token)
    }
}

#[async_trait::async_trait]
impl Mailer for GmailClient {
    async fn send(&self, email: &OutgoingEmail) -> Result<SentMessage, MailError> {
        let access_token = self.refresh_access_token(&email.refresh_token).await?;

        let raw = message::compose_raw_message(
            &email.from,
            &email.from_name,
            &email.to,
            &email.subject,
            &email.html,
        );
        let encoded = message::encode_for_send(&raw);

        let response = self
            .http
            .post(&self.oauth.send_url)
            .bearer_auth(&access_token)
            .json(&serde_json::json!({ "raw": encoded }))
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Send(body));
        }

        let body: SendResponse = response.json().await?;
        tracing::info!(to = %email.to, message_id = %body.id, "Email sent");

        Ok(SentMessage {
            message_id: body.id,
            access_token,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mail_error_display_credential_exchange() {
        let err = MailError::CredentialExchange("invalid_grant".to_string());
        assert_eq!(err.to_string(), "Failed to refresh token: invalid_grant");
    }

    #[test]
    fn mail_error_display_send() {
        let err = MailError::Send("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Gmail API error: quota exceeded");
    }
}
