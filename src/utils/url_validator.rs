//! Destination URL validation.
//!
//! Destinations are stored exactly as submitted; deduplication compares the
//! raw strings, so nothing here rewrites the input.

use url::Url;

use crate::domain::error::LinkError;

/// Checks that `input` parses as an absolute URL.
///
/// # Errors
///
/// Returns [`LinkError::InvalidUrl`] for empty input, relative references and
/// anything else the URL parser rejects. Control characters are rejected up
/// front: the parser silently strips tabs and newlines, but the raw string is
/// what ends up in the `Location` header.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_destination_url("https://example.com/a").is_ok());
/// assert!(validate_destination_url("/relative/path").is_err());
/// ```
pub fn validate_destination_url(input: &str) -> Result<Url, LinkError> {
    if input.trim().is_empty() {
        return Err(LinkError::InvalidUrl("URL is required".to_string()));
    }

    if input.chars().any(|c| c.is_ascii_control()) {
        return Err(LinkError::InvalidUrl(
            "URL must not contain control characters".to_string(),
        ));
    }

    Url::parse(input).map_err(|e| LinkError::InvalidUrl(e.to_string()))
}
