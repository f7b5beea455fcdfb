//! Overdue-brief reminder sweep.
//!
//! One pass per trigger: load pending, unreminded, client-addressed links;
//! keep those older than the business-day threshold; send one reminder per
//! link through the creator's own mailbox; mark each link so it is never
//! reminded twice. Row-level failures are collected and reported, never
//! fatal; only the initial reads and a miscovered calendar abort the run.
//!
//! Send-and-mark is not transactional across services. A crash between a
//! successful send and the marker write leaves the row eligible, so the next
//! run may send a duplicate. That risk is accepted and bounded by the
//! trigger cadence; the marker itself is a compare-and-swap, so overlapping
//! sweeps cannot double-mark.

use std::collections::HashMap;

use chrono::Utc;

use briefdesk_core::calendar::{BusinessCalendar, CalendarError};
use briefdesk_core::link::Language;
use briefdesk_core::templates::{self, ReminderContext};
use briefdesk_core::types::DbId;
use briefdesk_db::repositories::{BriefLinkRepo, GoogleTokenRepo};
use briefdesk_db::DbPool;
use briefdesk_mail::{Mailer, OutgoingEmail};

use crate::config::ServerConfig;

// ---------------------------------------------------------------------------
// Report / error
// ---------------------------------------------------------------------------

/// Outcome of one sweep.
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Candidate rows before the age filter.
    pub pending: usize,
    /// Rows past the business-day threshold.
    pub overdue: usize,
    /// Reminders successfully sent and marked.
    pub sent: usize,
    /// Per-row failures; the affected rows stay eligible for the next run.
    pub errors: Vec<String>,
}

/// Batch-fatal sweep failures.
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    /// A datastore read failed before dispatch; nothing was sent.
    #[error("Datastore read failed: {0}")]
    Db(#[from] sqlx::Error),

    /// A link's age falls outside the holiday table coverage. This is a
    /// deployment configuration problem (the table needs its yearly
    /// extension), so the whole run fails loudly instead of guessing.
    #[error("Business calendar misconfigured: {0}")]
    Calendar(#[from] CalendarError),
}

// ---------------------------------------------------------------------------
// Sweep
// ---------------------------------------------------------------------------

/// Run one reminder sweep over the current candidate set.
pub async fn run_sweep(
    pool: &DbPool,
    mailer: &dyn Mailer,
    config: &ServerConfig,
) -> Result<SweepReport, SweepError> {
    let calendar = BusinessCalendar::bundled();
    let now = Utc::now();

    let candidates = BriefLinkRepo::list_reminder_candidates(pool).await?;
    let pending = candidates.len();
    if pending == 0 {
        return Ok(SweepReport::default());
    }

    let mut overdue = Vec::new();
    for link in candidates {
        if calendar.is_older_than_working_days(
            link.created_at,
            now,
            config.reminder_threshold_days,
        )? {
            overdue.push(link);
        }
    }
    if overdue.is_empty() {
        return Ok(SweepReport {
            pending,
            ..SweepReport::default()
        });
    }

    // Resolve every creator's delegated credential in one batch.
    let mut creator_ids: Vec<DbId> = overdue.iter().map(|l| l.creator_id).collect();
    creator_ids.sort_unstable();
    creator_ids.dedup();
    let refresh_tokens: HashMap<DbId, String> =
        GoogleTokenRepo::find_for_users(pool, &creator_ids)
            .await?
            .into_iter()
            .map(|t| (t.user_id, t.refresh_token))
            .collect();

    let mut sent = 0usize;
    let mut errors = Vec::new();

    // Sequential dispatch: bounds concurrent send load and keeps failure
    // attribution per-row.
    for link in &overdue {
        // The candidate query filters on client_email IS NOT NULL.
        let Some(client_email) = link.client_email.as_deref() else {
            continue;
        };

        let Some(refresh_token) = refresh_tokens.get(&link.creator_id) else {
            errors.push(format!("No token for creator {}", link.creator_email));
            continue;
        };

        let business_days =
            calendar.count_working_days_between(link.created_at, now)?;
        let creator_name = if link.creator_name.is_empty() {
            link.creator_email.as_str()
        } else {
            link.creator_name.as_str()
        };
        let brief_url = format!("{}/brief/{}", config.app_base_url, link.token);

        let email = templates::reminder_email(
            Language::from_tag(&link.language),
            &ReminderContext {
                creator_name,
                client_email,
                brief_url: &brief_url,
                business_days,
            },
        );

        let outgoing = OutgoingEmail {
            refresh_token: refresh_token.clone(),
            from: link.creator_email.clone(),
            from_name: creator_name.to_string(),
            // The reminder goes to the creator about their own pending
            // brief, not to the client.
            to: link.creator_email.clone(),
            subject: email.subject,
            html: email.html,
        };

        match mailer.send(&outgoing).await {
            Ok(message) => {
                match BriefLinkRepo::mark_reminder_sent(pool, link.id, Utc::now()).await {
                    Ok(marked) => {
                        if !marked {
                            tracing::warn!(
                                link_id = link.id,
                                "Reminder marker was already set; a concurrent sweep sent a duplicate"
                            );
                        }
                        sent += 1;
                        tracing::info!(
                            link_id = link.id,
                            message_id = %message.message_id,
                            business_days,
                            "Reminder sent"
                        );
                    }
                    Err(e) => {
                        // Sent but unmarked: the row stays eligible and the
                        // next run may remind again. Documented duplicate risk.
                        tracing::error!(link_id = link.id, error = %e, "Failed to mark reminder");
                        errors.push(format!("Failed for {client_email}: {e}"));
                    }
                }
            }
            Err(e) => {
                tracing::error!(link_id = link.id, error = %e, "Reminder send failed");
                errors.push(format!("Failed for {client_email}: {e}"));
            }
        }
    }

    Ok(SweepReport {
        pending,
        overdue: overdue.len(),
        sent,
        errors,
    })
}
