//! Route registry.

pub mod cron;
pub mod emails;
pub mod google_tokens;
pub mod health;
pub mod links;

use axum::Router;

use crate::state::AppState;

/// All routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/links", links::router())
        .nest("/emails", emails::router())
        .nest("/google", google_tokens::router())
        .nest("/cron", cron::router())
}
