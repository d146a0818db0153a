//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};

/// A resolved redirect waiting to be counted.
///
/// Created in the redirect handler and sent through a bounded channel to
/// [`crate::domain::click_worker::run_click_worker`], which decouples the
/// redirect response from the counter update.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub code: String,
    pub requested_at: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates a click event stamped with the current time.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            requested_at: Utc::now(),
        }
    }
}
