//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to create a short link.
///
/// Field aliases accept the camelCase payload older clients send.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Absolute URL to redirect to.
    #[serde(alias = "url")]
    #[validate(length(min = 1, message = "URL is required"))]
    pub destination_url: String,

    /// Optional custom short code.
    #[serde(default, alias = "shortCode", alias = "short_code")]
    #[validate(length(max = 255, message = "Short code is too long"))]
    pub code: Option<String>,
}

/// Response body for a newly created link.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLinkResponse {
    pub code: String,
    pub destination_url: String,
    pub short_url: String,
}

/// Snapshot of a link with its usage counters.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub code: String,
    pub destination_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
}

impl LinkResponse {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            code: link.code,
            destination_url: link.destination_url,
            short_url,
            created_at: link.created_at,
            click_count: link.click_count,
            last_clicked_at: link.last_clicked_at,
        }
    }
}
