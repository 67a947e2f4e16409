//! Link creation and retrieval service.

use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::base62;
use crate::utils::custom_code::validate_custom_code;
use crate::utils::url_normalizer::normalize_url;

/// Input for creating a new short link.
#[derive(Debug, Clone)]
pub struct CreateLinkCommand {
    pub original_url: String,
    pub custom_code: Option<String>,
    pub alias: Option<String>,
    pub user_id: Option<Uuid>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Service for creating and retrieving shortened links.
///
/// Code assignment is two-phase for encoder-derived codes: the row is
/// inserted first so the database allocates the identifier, then the code
/// derived from that identifier is written back. A custom code skips the
/// second phase but must pass validation and a collision check.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(links: Arc<dyn LinkRepository>) -> Self {
        Self { links }
    }

    /// Creates a short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an invalid URL or custom code,
    /// [`AppError::Conflict`] when the custom code is already taken, and
    /// [`AppError::Internal`] on store errors.
    pub async fn create_short_link(&self, cmd: CreateLinkCommand) -> Result<Link, AppError> {
        let normalized_url = normalize_url(&cmd.original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let custom_code = match cmd.custom_code.filter(|c| !c.is_empty()) {
            Some(code) => {
                validate_custom_code(&code)?;

                if self.links.code_exists(&code).await? {
                    return Err(AppError::conflict(
                        "Custom code already exists",
                        json!({ "code": code }),
                    ));
                }

                Some(code)
            }
            None => None,
        };

        let mut link = self
            .links
            .create(NewLink {
                short_code: custom_code,
                original_url: normalized_url,
                alias: cmd.alias,
                user_id: cmd.user_id,
                expires_at: cmd.expires_at,
            })
            .await?;

        if link.short_code.is_empty() {
            let code = base62::encode(link.id.unsigned_abs());
            self.links.assign_code(link.id, &code).await?;
            link.short_code = code;
        }

        Ok(link)
    }

    /// Retrieves a link by its numeric identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this identifier.
    pub async fn get_link(&self, id: i64) -> Result<Link, AppError> {
        self.links
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;

    fn stored_link(id: i64, code: &str, url: &str) -> Link {
        Link {
            id,
            short_code: code.to_string(),
            original_url: url.to_string(),
            alias: None,
            user_id: None,
            is_custom: !code.is_empty(),
            visit_count: 0,
            expires_at: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn command(url: &str, custom_code: Option<&str>) -> CreateLinkCommand {
        CreateLinkCommand {
            original_url: url.to_string(),
            custom_code: custom_code.map(str::to_string),
            alias: None,
            user_id: None,
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_derives_code_from_id() {
        let mut links = MockLinkRepository::new();
        links
            .expect_create()
            .withf(|new_link| new_link.short_code.is_none())
            .returning(|_| Ok(stored_link(125, "", "https://example.com/")));
        links
            .expect_assign_code()
            .withf(|id, code| *id == 125 && code == "21")
            .returning(|_, _| Ok(()));

        let service = LinkService::new(Arc::new(links));
        let link = service
            .create_short_link(command("https://example.com/", None))
            .await
            .unwrap();

        assert_eq!(link.short_code, "21");
    }

    #[tokio::test]
    async fn test_create_with_custom_code_skips_derivation() {
        let mut links = MockLinkRepository::new();
        links
            .expect_code_exists()
            .withf(|code| code == "my-promo")
            .returning(|_| Ok(false));
        links
            .expect_create()
            .withf(|new_link| new_link.short_code.as_deref() == Some("my-promo"))
            .returning(|_| Ok(stored_link(7, "my-promo", "https://example.com/")));
        links.expect_assign_code().times(0);

        let service = LinkService::new(Arc::new(links));
        let link = service
            .create_short_link(command("https://example.com/", Some("my-promo")))
            .await
            .unwrap();

        assert_eq!(link.short_code, "my-promo");
        assert!(link.is_custom);
    }

    #[tokio::test]
    async fn test_create_rejects_taken_custom_code() {
        let mut links = MockLinkRepository::new();
        links.expect_code_exists().returning(|_| Ok(true));
        links.expect_create().times(0);

        let service = LinkService::new(Arc::new(links));
        let err = service
            .create_short_link(command("https://example.com/", Some("taken-code")))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_url() {
        let mut links = MockLinkRepository::new();
        links.expect_create().times(0);

        let service = LinkService::new(Arc::new(links));
        let err = service
            .create_short_link(command("ftp://example.com/file", None))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_defaults_missing_scheme_to_https() {
        let mut links = MockLinkRepository::new();
        links
            .expect_create()
            .withf(|new_link| new_link.original_url == "https://example.com/page")
            .returning(|_| Ok(stored_link(1, "", "https://example.com/page")));
        links.expect_assign_code().returning(|_, _| Ok(()));

        let service = LinkService::new(Arc::new(links));
        let link = service
            .create_short_link(command("example.com/page", None))
            .await
            .unwrap();

        assert_eq!(link.short_code, "1");
    }

    #[tokio::test]
    async fn test_get_link_not_found() {
        let mut links = MockLinkRepository::new();
        links.expect_find_by_id().returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(links));
        let err = service.get_link(99).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
