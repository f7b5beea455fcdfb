//! Route definitions for scheduler-triggered jobs.

use axum::routing::get;
use axum::Router;

use crate::handlers::cron;
use crate::state::AppState;

/// Routes mounted at `/cron`.
///
/// ```text
/// GET    /check-pending-briefs -> check_pending_briefs
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/check-pending-briefs", get(cron::check_pending_briefs))
}
