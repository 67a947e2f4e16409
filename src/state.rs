//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService};

/// Handles shared by all request handlers.
///
/// Services are constructed once at startup with their store, cache, and
/// queue collaborators already injected; handlers never touch connection
/// handles directly.
#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService>,
    pub link_service: Arc<LinkService>,
    /// Public base URL used to compose full short URLs.
    pub base_url: String,
}
