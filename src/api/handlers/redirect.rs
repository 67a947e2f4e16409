//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;

use crate::application::services::ClientInfo;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /code/{code}`
///
/// # Responses
///
/// - **302 Found** with `Location` on success
/// - **400 Bad Request** for an empty code
/// - **404 Not Found** for absent, inactive, or expired links
/// - **500 Internal Server Error** when the cache backend fails
///
/// All orchestration lives in
/// [`RedirectService`](crate::application::services::RedirectService); the
/// handler only extracts client metadata and shapes the response.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let client = ClientInfo {
        ip: addr.ip().to_string(),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string(),
    };

    let destination = state.redirect_service.resolve(&code, client).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, destination)]))
}

/// Rejects a redirect request with no code.
///
/// `GET /code` (and `/code/` after path normalization) cannot match the
/// parameterized route, so this handler feeds the empty code through the
/// resolver to surface the same 400 the service defines.
pub async fn empty_code_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    state
        .redirect_service
        .resolve("", ClientInfo::default())
        .await?;

    // The resolver always rejects an empty code before this point.
    Ok(StatusCode::FOUND)
}
