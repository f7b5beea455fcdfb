//! Handler for interactive send-as-self email.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use briefdesk_core::error::CoreError;
use briefdesk_db::repositories::GoogleTokenRepo;
use briefdesk_mail::{Mailer as _, OutgoingEmail};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /emails/send`.
#[derive(Debug, Deserialize, Validate)]
pub struct SendEmailRequest {
    #[validate(email)]
    pub to: String,
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub html: String,
}

/// Response payload for a successful send.
#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub message_id: String,
}

/// POST /api/v1/emails/send
///
/// Send an email as the authenticated creator through their own mailbox.
/// Requires a stored delegated credential (403 otherwise). Unlike the
/// scheduled sweep, the interactive path persists the refreshed access
/// token immediately.
pub async fn send_email(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SendEmailRequest>,
) -> AppResult<Json<DataResponse<SendEmailResponse>>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let credential = GoogleTokenRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "No mail credential stored; sign in again to authorize sending".into(),
            ))
        })?;

    let outgoing = OutgoingEmail {
        refresh_token: credential.refresh_token,
        from: auth.email.clone(),
        from_name: auth.display_name().to_string(),
        to: input.to,
        subject: input.subject,
        html: input.html,
    };

    let sent = state.mailer.send(&outgoing).await?;

    GoogleTokenRepo::update_access_token(&state.pool, auth.user_id, &sent.access_token).await?;

    Ok(Json(DataResponse {
        data: SendEmailResponse {
            message_id: sent.message_id,
        },
    }))
}
