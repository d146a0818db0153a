//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::domain::error::LinkError;
use async_trait::async_trait;

/// Storage contract backing the link registry.
///
/// Implementations must enforce uniqueness of `code` on insert and provide a
/// single-key atomic increment for click accounting. Every operation touches
/// at most one link, so no multi-row transactions are required.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - sharded in-memory map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with `click_count = 0` and `created_at = now`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::DuplicateCode`] if the code is already taken. This
    /// is the authoritative duplicate check; callers' pre-checks are advisory.
    ///
    /// Returns [`LinkError::Storage`] on backend errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, LinkError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Storage`] on backend errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, LinkError>;

    /// Finds the oldest link pointing at exactly `destination_url`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Storage`] on backend errors.
    async fn find_by_destination(&self, destination_url: &str)
    -> Result<Option<Link>, LinkError>;

    /// Lists all links, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Storage`] on backend errors.
    async fn list(&self) -> Result<Vec<Link>, LinkError>;

    /// Hard-deletes a link.
    ///
    /// Returns `Ok(true)` if a link was removed, `Ok(false)` if none existed.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Storage`] on backend errors.
    async fn delete(&self, code: &str) -> Result<bool, LinkError>;

    /// Atomically increments `click_count` and sets `last_clicked_at = now`.
    ///
    /// Returns `Ok(false)` when the code does not exist; nothing is changed.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Storage`] on backend errors.
    async fn record_click(&self, code: &str) -> Result<bool, LinkError>;
}
