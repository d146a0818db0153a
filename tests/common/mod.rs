#![allow(dead_code)]

use axum_test::TestServer;
use std::sync::Arc;
use tinylink::application::services::LinkService;
use tinylink::domain::click_event::ClickEvent;
use tinylink::domain::click_worker::run_click_worker;
use tinylink::domain::repositories::LinkRepository;
use tinylink::infrastructure::persistence::InMemoryLinkRepository;
use tinylink::routes::build_router;
use tinylink::state::{AppState, DynLinkService};
use tokio::sync::mpsc;

pub const BASE_URL: &str = "http://sho.rt";

/// Service over a fresh in-memory repository.
pub fn create_test_service() -> Arc<DynLinkService> {
    let repository: Arc<dyn LinkRepository> = Arc::new(InMemoryLinkRepository::new());
    Arc::new(LinkService::new(repository))
}

/// State whose click queue is left undrained, so tests can inspect it.
pub fn create_test_state() -> (AppState, mpsc::Receiver<ClickEvent>, Arc<DynLinkService>) {
    let service = create_test_service();
    let (tx, rx) = mpsc::channel(100);
    let state = AppState::new(service.clone(), tx, BASE_URL.to_string());
    (state, rx, service)
}

/// State with a running click worker attached to the queue.
pub fn create_test_state_with_worker() -> (AppState, Arc<DynLinkService>) {
    let (state, rx, service) = create_test_state();
    tokio::spawn(run_click_worker(rx, service.clone(), 4));
    (state, service)
}

pub fn make_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state)).unwrap()
}

pub async fn create_test_link(service: &DynLinkService, code: &str, url: &str) {
    service
        .create_short_link(url.to_string(), Some(code.to_string()))
        .await
        .unwrap();
}
