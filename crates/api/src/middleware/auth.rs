//! Request authentication extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use briefdesk_core::error::CoreError;
use briefdesk_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Read the bearer token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })
}

// ---------------------------------------------------------------------------
// AuthUser
// ---------------------------------------------------------------------------

/// Authenticated creator extracted from a JWT bearer token.
///
/// The identity provider issues the token; this extractor validates it and
/// exposes the identity snapshot that gets denormalized onto created links.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The creator's user id at the identity provider.
    pub user_id: DbId,
    /// The creator's email address (the send-as mailbox).
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
}

impl AuthUser {
    /// Display name with the email as fallback.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.email,
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
            name: claims.name,
        })
    }
}

// ---------------------------------------------------------------------------
// CronTrigger
// ---------------------------------------------------------------------------

/// Marker extractor for scheduler-triggered endpoints.
///
/// Checks the bearer token against the configured `CRON_SECRET`. This is a
/// static pre-shared secret presented by the external scheduler, not a user
/// session; a mismatch rejects the invocation before any side effects.
#[derive(Debug, Clone, Copy)]
pub struct CronTrigger;

impl FromRequestParts<AppState> for CronTrigger {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let secret = bearer_token(parts)?;

        if secret != state.config.cron_secret {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid cron secret".into(),
            )));
        }

        Ok(CronTrigger)
    }
}
