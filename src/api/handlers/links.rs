//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, CreateLinkResponse, LinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "destination_url": "https://example.com/a",
///   "code": "mine"   // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "code": "Xk9pQ2",
///   "destination_url": "https://example.com/a",
///   "short_url": "http://localhost:3000/Xk9pQ2"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request for an invalid URL or alias
/// - 409 Conflict if the alias is taken or the URL is already shortened
///   (`details.code` holds the existing code)
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_short_link(payload.destination_url, payload.code)
        .await?;

    let short_url = state.link_service.get_short_url(&state.base_url, &link.code);

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            code: link.code,
            destination_url: link.destination_url,
            short_url,
        }),
    ))
}

/// Lists all links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    let items = links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.get_short_url(&state.base_url, &link.code);
            LinkResponse::from_link(link, short_url)
        })
        .collect();

    Ok(Json(items))
}

/// Returns a single link with its click statistics.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link_by_code(&code).await?;
    let short_url = state.link_service.get_short_url(&state.base_url, &link.code);

    Ok(Json(LinkResponse::from_link(link, short_url)))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// Always answers `204 No Content`, whether or not the code existed. The code
/// becomes available for reuse immediately.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
