//! Repository for the `user_google_tokens` table.

use briefdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::google_token::UserGoogleToken;

/// Column list for `user_google_tokens` queries.
const COLUMNS: &str = "id, user_id, refresh_token, access_token, updated_at";

/// Provides CRUD operations for delegated Google credentials.
pub struct GoogleTokenRepo;

impl GoogleTokenRepo {
    /// Store (or overwrite) the credential for a user, as happens after each
    /// successful OAuth authorization.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        refresh_token: &str,
        access_token: &str,
    ) -> Result<UserGoogleToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_google_tokens (user_id, refresh_token, access_token) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id) DO UPDATE SET \
                refresh_token = EXCLUDED.refresh_token, \
                access_token = EXCLUDED.access_token, \
                updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserGoogleToken>(&query)
            .bind(user_id)
            .bind(refresh_token)
            .bind(access_token)
            .fetch_one(pool)
            .await
    }

    /// Find the credential for a single user.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserGoogleToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_google_tokens WHERE user_id = $1");
        sqlx::query_as::<_, UserGoogleToken>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Batch lookup for the reminder sweep: credentials for every listed
    /// user. Users without a stored credential are simply absent from the
    /// result.
    pub async fn find_for_users(
        pool: &PgPool,
        user_ids: &[DbId],
    ) -> Result<Vec<UserGoogleToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_google_tokens WHERE user_id = ANY($1)");
        sqlx::query_as::<_, UserGoogleToken>(&query)
            .bind(user_ids)
            .fetch_all(pool)
            .await
    }

    /// Persist a freshly exchanged access token. Returns `false` when the
    /// user has no stored credential.
    pub async fn update_access_token(
        pool: &PgPool,
        user_id: DbId,
        access_token: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_google_tokens \
             SET access_token = $2, updated_at = now() \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(access_token)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
