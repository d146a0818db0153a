//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use metrics::counter;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Click Tracking
///
/// The click is handed to the background worker with a non-blocking
/// `try_send`. If the queue is full or closed the click is dropped and
/// logged; the redirect is returned either way.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist. No click is queued
/// in that case.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let link = state.link_service.resolve(&code).await?;

    match state.click_sender.try_send(ClickEvent::new(code)) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            counter!("clicks_dropped_total").increment(1);
            warn!(code = %event.code, "Click queue full, dropping click");
        }
        Err(TrySendError::Closed(event)) => {
            counter!("clicks_dropped_total").increment(1);
            warn!(code = %event.code, "Click queue closed, dropping click");
        }
    }

    Ok(Redirect::temporary(&link.destination_url))
}
