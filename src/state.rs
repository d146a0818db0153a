//! Shared application state injected into HTTP handlers.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::LinkService;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Link service over whichever storage backend was configured.
pub type DynLinkService = LinkService<dyn LinkRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    pub base_url: String,
}

impl AppState {
    pub fn new(
        link_service: Arc<DynLinkService>,
        click_sender: mpsc::Sender<ClickEvent>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            link_service,
            click_sender,
            base_url: base_url.into(),
        }
    }
}
