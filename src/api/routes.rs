//! API route configuration.

use crate::api::handlers::{create_link_handler, get_link_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link management routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /links`      - Create a short link
/// - `GET  /links/{id}` - Retrieve a link by id
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_handler))
        .route("/links/{id}", get(get_link_handler))
}
