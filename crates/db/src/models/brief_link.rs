//! Brief-link entity models and DTOs.

use briefdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `brief_links` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BriefLink {
    pub id: DbId,
    pub token: String,
    pub creator_id: DbId,
    pub creator_email: String,
    pub creator_name: String,
    pub client_email: Option<String>,
    pub client_name: Option<String>,
    pub language: String,
    pub status: String,
    pub created_at: Timestamp,
    pub reminder_sent_at: Option<Timestamp>,
}

/// Public projection of a link, safe to return to an unauthenticated client
/// rendering the brief form. Deliberately omits ids, addresses, and reminder
/// bookkeeping.
#[derive(Debug, Clone, Serialize)]
pub struct PublicBriefLink {
    pub token: String,
    pub creator_name: String,
    pub client_name: Option<String>,
    pub language: String,
    pub status: String,
}

impl From<BriefLink> for PublicBriefLink {
    fn from(link: BriefLink) -> Self {
        Self {
            token: link.token,
            creator_name: link.creator_name,
            client_name: link.client_name,
            language: link.language,
            status: link.status,
        }
    }
}

/// Request DTO for creating a brief link.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBriefLink {
    /// Target recipient when the link is emailed directly; `None` for links
    /// generated for manual sharing.
    #[validate(email)]
    pub client_email: Option<String>,
    pub client_name: Option<String>,
    /// Locale tag; anything other than `"en"` falls back to Hebrew.
    pub language: Option<String>,
}

/// Fully resolved insert payload: creator snapshot from the access token,
/// server-generated link token, normalized language.
#[derive(Debug, Clone)]
pub struct NewBriefLink {
    pub token: String,
    pub creator_id: DbId,
    pub creator_email: String,
    pub creator_name: String,
    pub client_email: Option<String>,
    pub client_name: Option<String>,
    pub language: String,
}
