//! Handlers for the `/links` resource.
//!
//! Creation and listing require authentication; fetching and completing a
//! link are public, addressed solely by the unguessable token.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use briefdesk_core::error::CoreError;
use briefdesk_core::link::{generate_link_token, Language, LinkStatus};
use briefdesk_db::models::brief_link::{BriefLink, CreateBriefLink, NewBriefLink, PublicBriefLink};
use briefdesk_db::repositories::BriefLinkRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/links
///
/// Create a brief link. The creator identity is snapshotted from the access
/// token; the server generates the token and the deep link.
pub async fn create_link(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateBriefLink>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedLink>>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let language = Language::from_tag(input.language.as_deref().unwrap_or_default());

    let new_link = NewBriefLink {
        token: generate_link_token(),
        creator_id: auth.user_id,
        creator_email: auth.email.clone(),
        creator_name: auth.display_name().to_string(),
        client_email: input.client_email,
        client_name: input.client_name,
        language: language.as_str().to_string(),
    };

    let link = BriefLinkRepo::create(&state.pool, &new_link).await?;
    let url = format!("{}/brief/{}", state.config.app_base_url, link.token);

    tracing::info!(link_id = link.id, creator_id = auth.user_id, "Brief link created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedLink { url, link },
        }),
    ))
}

/// Response payload for link creation: the row plus its shareable URL.
#[derive(Debug, serde::Serialize)]
pub struct CreatedLink {
    pub url: String,
    #[serde(flatten)]
    pub link: BriefLink,
}

/// GET /api/v1/links
///
/// List the authenticated creator's links, newest first.
pub async fn list_links(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BriefLink>>>> {
    let links = BriefLinkRepo::list_for_creator(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: links }))
}

/// GET /api/v1/links/{token}
///
/// Public fetch for rendering the brief form. Returns a trimmed projection;
/// internal ids and reminder bookkeeping stay server-side.
pub async fn get_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<DataResponse<PublicBriefLink>>> {
    let link = BriefLinkRepo::find_by_token(&state.pool, &token)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Brief link",
        }))?;

    Ok(Json(DataResponse { data: link.into() }))
}

/// Request body for completing a brief.
#[derive(Debug, Deserialize)]
pub struct CompleteBrief {
    /// The filled questionnaire, forwarded verbatim to the intake webhook.
    /// Its shape is owned by the form, not by this service.
    #[serde(default)]
    pub submission: serde_json::Value,
}

/// POST /api/v1/links/{token}/complete
///
/// Single-completion endpoint: flips a pending link to completed exactly
/// once. 404 for an unknown token, 409 when already completed. The
/// submission payload is forwarded to the automation webhook without
/// blocking the response.
pub async fn complete_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(input): Json<CompleteBrief>,
) -> AppResult<Json<DataResponse<PublicBriefLink>>> {
    let link = BriefLinkRepo::find_by_token(&state.pool, &token)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Brief link",
        }))?;

    // The conditional update below is what enforces single completion; this
    // check just gives a precise 409 on the common path.
    if link.status == LinkStatus::Completed.as_str() {
        return Err(AppError::Core(CoreError::Conflict(
            "Brief already completed".into(),
        )));
    }

    let flipped = BriefLinkRepo::complete(&state.pool, &token).await?;
    if !flipped {
        return Err(AppError::Core(CoreError::Conflict(
            "Brief already completed".into(),
        )));
    }

    tracing::info!(link_id = link.id, "Brief completed");

    if let Some(url) = state.config.intake_webhook_url.clone() {
        let forwarder = state.intake.clone();
        let token = token.clone();
        let submission = input.submission;
        tokio::spawn(async move {
            if let Err(e) = forwarder.forward(&url, &token, &submission).await {
                tracing::error!(error = %e, "Intake webhook forwarding failed");
            }
        });
    }

    let completed = BriefLinkRepo::find_by_token(&state.pool, &token)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Brief link",
        }))?;

    Ok(Json(DataResponse {
        data: completed.into(),
    }))
}
