//! Route definitions for the `/links` resource.
//!
//! Creation and listing require authentication; token-addressed fetch and
//! completion are public.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::links;
use crate::state::AppState;

/// Routes mounted at `/links`.
///
/// ```text
/// POST   /                     -> create_link
/// GET    /                     -> list_links
/// GET    /{token}              -> get_link
/// POST   /{token}/complete     -> complete_link
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(links::list_links).post(links::create_link))
        .route("/{token}", get(links::get_link))
        .route("/{token}/complete", post(links::complete_link))
}
