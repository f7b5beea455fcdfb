//! Handler for delegated-credential storage.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use briefdesk_core::error::CoreError;
use briefdesk_db::repositories::GoogleTokenRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /google/tokens`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertGoogleToken {
    /// Long-lived delegated refresh token from the OAuth authorization.
    #[validate(length(min = 1))]
    pub refresh_token: String,
    /// Short-lived access token, when the authorization response carried one.
    #[serde(default)]
    pub access_token: Option<String>,
}

/// POST /api/v1/google/tokens
///
/// Store (or overwrite) the delegated Google credential for the
/// authenticated creator. Called by the dashboard after each successful
/// OAuth authorization; rows are never deleted here.
pub async fn upsert_token(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpsertGoogleToken>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    GoogleTokenRepo::upsert(
        &state.pool,
        auth.user_id,
        &input.refresh_token,
        input.access_token.as_deref().unwrap_or(""),
    )
    .await?;

    tracing::info!(user_id = auth.user_id, "Delegated mail credential stored");

    Ok(StatusCode::NO_CONTENT)
}
