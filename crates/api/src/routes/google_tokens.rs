//! Route definitions for delegated-credential storage. All endpoints
//! require authentication.

use axum::routing::post;
use axum::Router;

use crate::handlers::google_tokens;
use crate::state::AppState;

/// Routes mounted at `/google`.
///
/// ```text
/// POST   /tokens               -> upsert_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/tokens", post(google_tokens::upsert_token))
}
