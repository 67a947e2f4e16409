//! DTOs for the link creation endpoint.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::Link;

/// Compiled regex for custom code validation.
static CUSTOM_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// Request to create a short link.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The destination URL. A missing scheme defaults to `https://`.
    #[validate(length(min = 1, message = "URL must not be empty"))]
    pub url: String,

    /// Optional custom short code; when absent the code is derived from the
    /// link's identifier.
    #[validate(length(min = 4, max = 20))]
    #[validate(regex(path = "*CUSTOM_CODE_REGEX"))]
    pub custom_code: Option<String>,

    /// Optional human-readable label.
    #[validate(length(max = 100))]
    pub alias: Option<String>,

    /// Optional expiry timestamp. After this time, the code stops resolving.
    pub expires_at: Option<DateTime<Utc>>,
}

/// A link as returned by the API.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub short_url: String,
    pub original_url: String,
    pub alias: Option<String>,
    pub is_active: bool,
    pub visit_count: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    /// Builds the response, composing the full short URL from the public
    /// base URL.
    pub fn from_link(link: Link, base_url: &str) -> Self {
        let short_url = format!(
            "{}/code/{}",
            base_url.trim_end_matches('/'),
            link.short_code
        );

        Self {
            id: link.id,
            code: link.short_code,
            short_url,
            original_url: link.original_url,
            alias: link.alias,
            is_active: link.is_active,
            visit_count: link.visit_count,
            expires_at: link.expires_at,
            created_at: link.created_at,
        }
    }
}
