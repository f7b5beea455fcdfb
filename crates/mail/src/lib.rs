//! Mail dispatch via the creator's own mailbox.
//!
//! Turns a delegated OAuth credential plus message fields into one delivered
//! email: refresh the short-lived access token, assemble a raw MIME message,
//! and submit it to the Gmail REST send endpoint. The [`Mailer`] trait is the
//! seam between callers (interactive send, the reminder sweep) and the real
//! transport, so orchestration can be exercised without network access.

pub mod gmail;
pub mod message;

pub use gmail::{GmailClient, GoogleOAuthConfig, MailError};

/// One outgoing email, addressed and authorized.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    /// The sender's long-lived delegated credential.
    pub refresh_token: String,
    /// Send-as address (the creator's own mailbox).
    pub from: String,
    /// Display name for the `From` header.
    pub from_name: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Result of a successful send.
#[derive(Debug, Clone)]
pub struct SentMessage {
    /// Provider-issued message id.
    pub message_id: String,
    /// The access token obtained for this send. Persisting it is the
    /// caller's decision: interactive sends store it, the scheduled sweep
    /// does not.
    pub access_token: String,
}

/// Outbound mail transport.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one email, returning the provider message id and the access
    /// token used.
    async fn send(&self, email: &OutgoingEmail) -> Result<SentMessage, MailError>;
}
