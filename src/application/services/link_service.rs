//! Link creation, lookup and click accounting service.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::error::LinkError;
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::{
    DEFAULT_CODE_LENGTH, DEFAULT_MAX_ATTEMPTS, generate_code, validate_custom_code,
};
use crate::utils::url_validator::validate_destination_url;

/// Service for creating, resolving and deleting shortened links.
///
/// Arbitrates between user-supplied aliases and generated codes. Existence
/// checks made here are a fast path only; a [`LinkError::DuplicateCode`]
/// returned by the repository on insert is the authoritative signal.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    code_length: usize,
    max_attempts: usize,
    /// Held from the destination lookup until the generated code is inserted.
    generation_lock: Mutex<()>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service with the default code settings.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self {
            link_repository,
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            generation_lock: Mutex::new(()),
        }
    }

    /// Overrides the generated code length and the generation attempt bound.
    pub fn with_code_settings(mut self, code_length: usize, max_attempts: usize) -> Self {
        self.code_length = code_length;
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `destination_url` - Absolute URL to redirect to, stored verbatim
    /// - `alias` - Optional custom code; when absent a code is generated
    ///
    /// # Deduplication
    ///
    /// Without an alias, a destination that is already shortened is rejected
    /// with [`LinkError::DuplicateUrl`] carrying the existing code. Aliases
    /// skip this check and may coexist with a generated code for the same URL.
    ///
    /// Generated creates are serialized within this service instance, so
    /// concurrent requests for one destination yield a single generated code.
    /// Separate server processes sharing a database can still race here.
    ///
    /// # Errors
    ///
    /// - [`LinkError::InvalidUrl`] if the destination does not parse as an absolute URL
    /// - [`LinkError::InvalidCode`] if the alias is empty or contains `/`
    /// - [`LinkError::DuplicateCode`] if the alias is taken
    /// - [`LinkError::DuplicateUrl`] if the destination is already shortened
    /// - [`LinkError::GenerationExhausted`] if no free code was found in time
    pub async fn create_short_link(
        &self,
        destination_url: String,
        alias: Option<String>,
    ) -> Result<Link, LinkError> {
        validate_destination_url(&destination_url)?;

        let link = match alias {
            Some(code) => self.create_with_alias(code, destination_url).await?,
            None => {
                let _guard = self.generation_lock.lock().await;

                if let Some(existing) = self
                    .link_repository
                    .find_by_destination(&destination_url)
                    .await?
                {
                    return Err(LinkError::DuplicateUrl {
                        code: existing.code,
                    });
                }

                self.create_with_generated_code(destination_url).await?
            }
        };

        info!(code = %link.code, "Short link created");
        Ok(link)
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if no link matches the code.
    pub async fn get_link_by_code(&self, code: &str) -> Result<Link, LinkError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| LinkError::NotFound(code.to_string()))
    }

    /// Resolves a code for redirection.
    ///
    /// Does not count the click; callers dispatch that separately so the
    /// redirect never waits on it.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if no link matches the code.
    pub async fn resolve(&self, code: &str) -> Result<Link, LinkError> {
        let link = self.get_link_by_code(code).await?;
        debug!(code, destination = %link.destination_url, "Resolved short link");
        Ok(link)
    }

    /// Lists all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, LinkError> {
        self.link_repository.list().await
    }

    /// Deletes a link. Deleting an unknown code succeeds.
    pub async fn delete_link(&self, code: &str) -> Result<(), LinkError> {
        if self.link_repository.delete(code).await? {
            info!(code, "Short link deleted");
        } else {
            debug!(code, "Delete requested for unknown code");
        }
        Ok(())
    }

    /// Counts one click against `code`.
    ///
    /// Returns `Ok(false)` if the code no longer exists.
    pub async fn record_click(&self, code: &str) -> Result<bool, LinkError> {
        self.link_repository.record_click(code).await
    }

    /// Builds the public short URL for a code.
    pub fn get_short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }

    async fn create_with_alias(
        &self,
        code: String,
        destination_url: String,
    ) -> Result<Link, LinkError> {
        validate_custom_code(&code)?;

        if self.link_repository.find_by_code(&code).await?.is_some() {
            return Err(LinkError::DuplicateCode(code));
        }

        self.link_repository
            .create(NewLink {
                code,
                destination_url,
            })
            .await
    }

    /// Proposes random codes until one is inserted.
    ///
    /// A candidate that passes the existence check can still lose the insert
    /// to a concurrent request; that also counts as a failed attempt.
    async fn create_with_generated_code(
        &self,
        destination_url: String,
    ) -> Result<Link, LinkError> {
        for attempt in 1..=self.max_attempts {
            let code = generate_code(self.code_length);

            if self.link_repository.find_by_code(&code).await?.is_some() {
                debug!(code = %code, attempt, "Generated code already taken");
                continue;
            }

            let new_link = NewLink {
                code,
                destination_url: destination_url.clone(),
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(LinkError::DuplicateCode(code)) => {
                    warn!(code = %code, attempt, "Lost insert race for generated code");
                }
                Err(e) => return Err(e),
            }
        }

        Err(LinkError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }
}
