//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A short code bound to its destination URL plus usage metadata.
///
/// Only `click_count` and `last_clicked_at` ever change after insertion, and
/// only through the click-recording path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub code: String,
    pub destination_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        code: String,
        destination_url: String,
        created_at: DateTime<Utc>,
        click_count: i64,
        last_clicked_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            code,
            destination_url,
            created_at,
            click_count,
            last_clicked_at,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub destination_url: String,
}

impl NewLink {
    /// Materializes the link as it looks right after insertion.
    pub fn into_link(self, created_at: DateTime<Utc>) -> Link {
        Link::new(self.code, self.destination_url, created_at, 0, None)
    }
}
