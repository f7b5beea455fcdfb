//! Handler for the scheduled reminder trigger.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CronTrigger;
use crate::reminder::{self, SweepError};
use crate::state::AppState;

/// Report returned to the scheduler. The shape is part of the trigger
/// contract: `{message, count}` when nothing was dispatched, otherwise
/// `{message, sent, errors?}` with `errors` omitted when empty.
#[derive(Debug, Serialize)]
pub struct CronReport {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// GET /api/v1/cron/check-pending-briefs
///
/// Invoked by the external scheduler with the pre-shared secret. Runs one
/// reminder sweep and reports counts plus per-row errors. Safe to re-run:
/// already-reminded and completed links never re-enter the candidate set.
pub async fn check_pending_briefs(
    _trigger: CronTrigger,
    State(state): State<AppState>,
) -> AppResult<Json<CronReport>> {
    let report = reminder::run_sweep(&state.pool, state.mailer.as_ref(), &state.config)
        .await
        .map_err(|e| match e {
            SweepError::Db(db) => AppError::Database(db),
            SweepError::Calendar(cal) => AppError::InternalError(cal.to_string()),
        })?;

    let body = if report.pending == 0 {
        CronReport {
            message: "No pending briefs to remind".to_string(),
            count: Some(0),
            sent: None,
            errors: None,
        }
    } else if report.overdue == 0 {
        CronReport {
            message: "No overdue briefs".to_string(),
            count: Some(0),
            sent: None,
            errors: None,
        }
    } else {
        CronReport {
            message: format!("Processed {} overdue briefs", report.overdue),
            count: None,
            sent: Some(report.sent),
            errors: (!report.errors.is_empty()).then_some(report.errors),
        }
    };

    Ok(Json(body))
}
