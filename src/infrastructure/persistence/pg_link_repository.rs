//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::error::LinkError;
use crate::domain::repositories::LinkRepository;
use crate::utils::db_error::{is_check_violation, is_unique_violation};

const LINK_COLUMNS: &str = "code, destination_url, created_at, click_count, last_clicked_at";

#[derive(sqlx::FromRow)]
struct LinkRow {
    code: String,
    destination_url: String,
    created_at: DateTime<Utc>,
    click_count: i64,
    last_clicked_at: Option<DateTime<Utc>>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.code,
            r.destination_url,
            r.created_at,
            r.click_count,
            r.last_clicked_at,
        )
    }
}

/// PostgreSQL repository for link storage and click accounting.
///
/// The primary key on `code` backs the uniqueness guarantee, and click
/// recording is a single `UPDATE ... SET click_count = click_count + 1`.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, LinkError> {
        let sql = format!(
            "INSERT INTO links (code, destination_url) VALUES ($1, $2) RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(&new_link.code)
            .bind(&new_link.destination_url)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    LinkError::DuplicateCode(new_link.code.clone())
                } else if is_check_violation(&e) {
                    LinkError::InvalidCode(new_link.code.clone())
                } else {
                    e.into()
                }
            })?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, LinkError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE code = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_destination(
        &self,
        destination_url: &str,
    ) -> Result<Option<Link>, LinkError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE destination_url = $1 \
             ORDER BY created_at ASC LIMIT 1"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(destination_url)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Link::from))
    }

    async fn list(&self) -> Result<Vec<Link>, LinkError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links ORDER BY created_at DESC");

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete(&self, code: &str) -> Result<bool, LinkError> {
        let result = sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_click(&self, code: &str) -> Result<bool, LinkError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET click_count = click_count + 1, last_clicked_at = NOW()
            WHERE code = $1
            "#,
        )
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
