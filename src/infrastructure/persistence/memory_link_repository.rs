//! In-memory implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{Link, NewLink};
use crate::domain::error::LinkError;
use crate::domain::repositories::LinkRepository;

/// Link storage backed by a sharded concurrent map.
///
/// Insertion goes through the entry API, so the existence check and the
/// insert happen under the same shard lock. Click increments mutate the entry
/// in place under that lock as well.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, Link>,
}

impl InMemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, LinkError> {
        match self.links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Err(LinkError::DuplicateCode(new_link.code)),
            Entry::Vacant(slot) => {
                let link = new_link.into_link(Utc::now());
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, LinkError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn find_by_destination(
        &self,
        destination_url: &str,
    ) -> Result<Option<Link>, LinkError> {
        Ok(self
            .links
            .iter()
            .filter(|entry| entry.destination_url == destination_url)
            .min_by_key(|entry| entry.created_at)
            .map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Link>, LinkError> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(links)
    }

    async fn delete(&self, code: &str) -> Result<bool, LinkError> {
        Ok(self.links.remove(code).is_some())
    }

    async fn record_click(&self, code: &str) -> Result<bool, LinkError> {
        let Some(mut link) = self.links.get_mut(code) else {
            return Ok(false);
        };

        link.click_count += 1;
        link.last_clicked_at = Some(Utc::now());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn new_link(code: &str, url: &str) -> NewLink {
        NewLink {
            code: code.to_string(),
            destination_url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryLinkRepository::new();

        let created = repo
            .create(new_link("abc123", "https://example.com"))
            .await
            .unwrap();
        assert_eq!(created.click_count, 0);
        assert!(created.last_clicked_at.is_none());

        let found = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_nonexistent() {
        let repo = InMemoryLinkRepository::new();
        assert!(repo.find_by_code("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let repo = InMemoryLinkRepository::new();

        repo.create(new_link("abc123", "https://example.com"))
            .await
            .unwrap();

        let err = repo
            .create(new_link("abc123", "https://other.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, LinkError::DuplicateCode(code) if code == "abc123"));
        let kept = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(kept.destination_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_concurrent_create_has_single_winner() {
        let repo = Arc::new(InMemoryLinkRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(new_link("race", &format!("https://example.com/{i}")))
                        .await
                })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(e) => assert!(matches!(e, LinkError::DuplicateCode(_))),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_destination_returns_oldest() {
        let repo = InMemoryLinkRepository::new();

        repo.create(new_link("first", "https://example.com"))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        repo.create(new_link("second", "https://example.com"))
            .await
            .unwrap();

        let found = repo
            .find_by_destination("https://example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.code, "first");

        assert!(
            repo.find_by_destination("https://example.com/other")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryLinkRepository::new();

        for code in ["one", "two", "three"] {
            repo.create(new_link(code, &format!("https://example.com/{code}")))
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        let codes: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.code)
            .collect();
        assert_eq!(codes, vec!["three", "two", "one"]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link("gone", "https://example.com"))
            .await
            .unwrap();

        assert!(repo.delete("gone").await.unwrap());
        assert!(!repo.delete("gone").await.unwrap());
        assert!(repo.find_by_code("gone").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deleted_code_can_be_reused() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link("reuse", "https://old.com"))
            .await
            .unwrap();
        repo.delete("reuse").await.unwrap();

        let link = repo
            .create(new_link("reuse", "https://new.com"))
            .await
            .unwrap();
        assert_eq!(link.destination_url, "https://new.com");
        assert_eq!(link.click_count, 0);
    }

    #[tokio::test]
    async fn test_record_click_missing_code_is_skipped() {
        let repo = InMemoryLinkRepository::new();
        assert!(!repo.record_click("ghost").await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_clicks_are_not_lost() {
        let repo = Arc::new(InMemoryLinkRepository::new());
        repo.create(new_link("hot", "https://example.com"))
            .await
            .unwrap();

        let started = Utc::now();
        let handles: Vec<_> = (0..200)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.record_click("hot").await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().unwrap());
        }

        let link = repo.find_by_code("hot").await.unwrap().unwrap();
        assert_eq!(link.click_count, 200);
        assert!(link.last_clicked_at.unwrap() >= started);
    }
}
