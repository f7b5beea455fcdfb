//! Delegated-credential entity models.

use briefdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `user_google_tokens` table.
///
/// Never serialized into HTTP responses; both tokens are secrets.
#[derive(Debug, Clone, FromRow)]
pub struct UserGoogleToken {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token: String,
    pub access_token: String,
    pub updated_at: Timestamp,
}
