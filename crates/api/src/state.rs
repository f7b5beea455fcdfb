use std::sync::Arc;

use briefdesk_mail::Mailer;

use crate::config::ServerConfig;
use crate::webhook::IntakeForwarder;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: briefdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Outbound mail transport (Gmail in production, recorded in tests).
    pub mailer: Arc<dyn Mailer>,
    /// Intake webhook forwarder for completed submissions.
    pub intake: Arc<IntakeForwarder>,
}
