//! Route definitions for the `/emails` resource. All endpoints require
//! authentication.

use axum::routing::post;
use axum::Router;

use crate::handlers::emails;
use crate::state::AppState;

/// Routes mounted at `/emails`.
///
/// ```text
/// POST   /send                 -> send_email
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/send", post(emails::send_email))
}
