//! Repository for the `brief_links` table.

use briefdesk_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::brief_link::{BriefLink, NewBriefLink};

/// Column list for `brief_links` queries.
const COLUMNS: &str = "id, token, creator_id, creator_email, creator_name, \
     client_email, client_name, language, status, created_at, reminder_sent_at";

/// Provides CRUD operations for brief links.
pub struct BriefLinkRepo;

impl BriefLinkRepo {
    /// Insert a new link, returning the created row.
    ///
    /// `status` defaults to `pending` and `reminder_sent_at` to `NULL` at the
    /// schema level; the row is born eligible for the reminder sweep once it
    /// ages past the threshold.
    pub async fn create(pool: &PgPool, input: &NewBriefLink) -> Result<BriefLink, sqlx::Error> {
        let query = format!(
            "INSERT INTO brief_links \
                (token, creator_id, creator_email, creator_name, \
                 client_email, client_name, language) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BriefLink>(&query)
            .bind(&input.token)
            .bind(input.creator_id)
            .bind(&input.creator_email)
            .bind(&input.creator_name)
            .bind(&input.client_email)
            .bind(&input.client_name)
            .bind(&input.language)
            .fetch_one(pool)
            .await
    }

    /// Find a link by its public token.
    pub async fn find_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<BriefLink>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brief_links WHERE token = $1");
        sqlx::query_as::<_, BriefLink>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// List a creator's links, newest first (dashboard view).
    pub async fn list_for_creator(
        pool: &PgPool,
        creator_id: DbId,
    ) -> Result<Vec<BriefLink>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM brief_links \
             WHERE creator_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, BriefLink>(&query)
            .bind(creator_id)
            .fetch_all(pool)
            .await
    }

    /// Load the reminder sweep's candidate set: pending, never reminded, and
    /// addressed to a client. Age filtering happens in the caller since
    /// business-day arithmetic lives outside SQL.
    pub async fn list_reminder_candidates(pool: &PgPool) -> Result<Vec<BriefLink>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM brief_links \
             WHERE status = 'pending' \
               AND reminder_sent_at IS NULL \
               AND client_email IS NOT NULL \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, BriefLink>(&query)
            .fetch_all(pool)
            .await
    }

    /// Flip a pending link to completed. Returns `false` when the token is
    /// unknown or the link was already completed; the status never reverts.
    pub async fn complete(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE brief_links SET status = 'completed' \
             WHERE token = $1 AND status = 'pending'",
        )
        .bind(token)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record that a reminder went out, but only if none was recorded before
    /// (compare-and-swap on `reminder_sent_at`). Returns `false` when the
    /// field was already set, so overlapping sweeps cannot double-mark.
    pub async fn mark_reminder_sent(
        pool: &PgPool,
        id: DbId,
        sent_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE brief_links SET reminder_sent_at = $2 \
             WHERE id = $1 AND reminder_sent_at IS NULL",
        )
        .bind(id)
        .bind(sent_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
