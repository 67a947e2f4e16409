//! Handlers for link creation and retrieval.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::{CreateLinkRequest, LinkResponse};
use crate::application::services::CreateLinkCommand;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// When no custom code is supplied, the code is derived from the link's
/// database identifier after insert, so it is deterministic per id.
///
/// # Errors
///
/// Returns 400 for an invalid URL or custom code and 409 when the custom
/// code is already taken.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_short_link(CreateLinkCommand {
            original_url: payload.url,
            custom_code: payload.custom_code,
            alias: payload.alias,
            user_id: None,
            expires_at: payload.expires_at,
        })
        .await?;

    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}

/// Retrieves a link by its numeric identifier.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
pub async fn get_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(id).await?;
    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}
