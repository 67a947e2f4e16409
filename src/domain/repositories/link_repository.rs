//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// This is the link store contract the resolution pipeline consumes: the
/// redirect path reads active links by code, the worker resolves codes to
/// identifiers, and the creation flow inserts and then assigns the derived
/// code.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new link row and returns it with its assigned identifier.
    ///
    /// When `new_link.short_code` is `None` the row is inserted without a
    /// code; the caller derives one from the returned id and assigns it with
    /// [`Self::assign_code`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Assigns a short code to an already-persisted link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] on a code collision and
    /// [`AppError::Internal`] on database errors.
    async fn assign_code(&self, id: i64, code: &str) -> Result<(), AppError>;

    /// Finds an active link by its short code.
    ///
    /// Inactive links are filtered out at the query; expiry is checked by
    /// the caller so expired and absent links surface identically.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Resolves an active link's short code to its numeric identifier.
    ///
    /// Used by the worker to enrich access events without fetching the
    /// whole row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active_id_by_code(&self, code: &str) -> Result<Option<i64>, AppError>;

    /// Finds a link by its numeric identifier, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Checks whether a short code is already taken.
    ///
    /// Used to reject colliding custom codes before insert.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn code_exists(&self, code: &str) -> Result<bool, AppError>;
}
