//! Background worker that turns queued click events into counter updates.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use metrics::counter;
use tokio::sync::{Semaphore, mpsc};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info};

use crate::application::services::LinkService;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Number of retries after the first failed attempt.
const MAX_RETRIES: usize = 3;

/// Drains the click queue until every sender is dropped.
///
/// Up to `concurrency` recordings run at the same time. Events already in the
/// queue when the senders go away are still processed, and the function only
/// returns once every spawned recording has finished.
pub async fn run_click_worker<L>(
    mut rx: mpsc::Receiver<ClickEvent>,
    link_service: Arc<LinkService<L>>,
    concurrency: usize,
) where
    L: LinkRepository + ?Sized + 'static,
{
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };

        let link_service = link_service.clone();
        tokio::spawn(async move {
            process_click(&link_service, event).await;
            drop(permit);
        });
    }

    // All permits back means no recording is still in flight.
    let _ = semaphore.acquire_many(concurrency as u32).await;
    info!("Click worker stopped");
}

async fn process_click<L>(link_service: &LinkService<L>, event: ClickEvent)
where
    L: LinkRepository + ?Sized,
{
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(25)
        .max_delay(Duration::from_secs(1))
        .map(jitter)
        .take(MAX_RETRIES);

    let code = event.code.as_str();
    let result = Retry::start(strategy, move || link_service.record_click(code)).await;

    match result {
        Ok(true) => {
            counter!("clicks_recorded_total").increment(1);
            let lag = Utc::now() - event.requested_at;
            debug!(code, lag_ms = lag.num_milliseconds(), "Click recorded");
        }
        Ok(false) => {
            counter!("clicks_skipped_total").increment(1);
            debug!(code, "Click skipped, link no longer exists");
        }
        Err(e) => {
            counter!("clicks_failed_total").increment(1);
            error!(code, error = %e, "Failed to record click");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::LinkError;
    use crate::domain::repositories::MockLinkRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_worker_records_every_queued_click() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_record_click()
            .withf(|code| code == "abc123")
            .times(5)
            .returning(|_| Ok(true));

        let service = Arc::new(LinkService::new(Arc::new(mock_repo)));
        let (tx, rx) = mpsc::channel(16);

        for _ in 0..5 {
            tx.send(ClickEvent::new("abc123")).await.unwrap();
        }
        drop(tx);

        run_click_worker(rx, service, 2).await;
    }

    #[tokio::test]
    async fn test_worker_retries_transient_failures() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_mock = calls.clone();

        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_record_click().returning(move |_| {
            if calls_in_mock.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(LinkError::Storage("connection reset".to_string()))
            } else {
                Ok(true)
            }
        });

        let service = Arc::new(LinkService::new(Arc::new(mock_repo)));
        let (tx, rx) = mpsc::channel(4);
        tx.send(ClickEvent::new("abc123")).await.unwrap();
        drop(tx);

        run_click_worker(rx, service, 1).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_worker_gives_up_after_max_retries() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_record_click()
            .times(MAX_RETRIES + 1)
            .returning(|_| Err(LinkError::Storage("down".to_string())));

        let service = Arc::new(LinkService::new(Arc::new(mock_repo)));
        let (tx, rx) = mpsc::channel(4);
        tx.send(ClickEvent::new("abc123")).await.unwrap();
        drop(tx);

        run_click_worker(rx, service, 1).await;
    }

    #[tokio::test]
    async fn test_worker_skips_missing_code_without_retry() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_record_click()
            .times(1)
            .returning(|_| Ok(false));

        let service = Arc::new(LinkService::new(Arc::new(mock_repo)));
        let (tx, rx) = mpsc::channel(4);
        tx.send(ClickEvent::new("gone")).await.unwrap();
        drop(tx);

        run_click_worker(rx, service, 1).await;
    }
}
