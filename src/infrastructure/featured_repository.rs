//! SQLite implementation of the featured-item store
//!
//! Membership lives in `featured_items` (one row per identifier); the
//! per-kind resume cursors and the imported flag live in the `sync_state`
//! key-value table.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::domain::constants::store;
use crate::domain::entities::SyncKind;
use crate::domain::repositories::FeaturedRepository;

#[derive(Clone)]
pub struct SqliteFeaturedRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteFeaturedRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool: Arc::new(pool) }
    }

    async fn get_state_value(&self, key: &str) -> Result<Option<i64>> {
        let row = sqlx::query("SELECT value FROM sync_state WHERE key = ?")
            .bind(key)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.map(|row| row.get("value")))
    }

    async fn set_state_value(&self, key: &str, value: i64) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO sync_state (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl FeaturedRepository for SqliteFeaturedRepository {
    async fn mark_featured(&self, id: i64) -> Result<()> {
        // OR IGNORE keeps the original first_seen_at on re-insert
        sqlx::query("INSERT OR IGNORE INTO featured_items (id, first_seen_at) VALUES (?, ?)")
            .bind(id)
            .bind(Utc::now())
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn was_featured(&self, id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM featured_items WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn first_seen(&self, id: i64) -> Result<Option<DateTime<Utc>>> {
        let row = sqlx::query("SELECT first_seen_at FROM featured_items WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.map(|row| row.get("first_seen_at")))
    }

    async fn get_cursor(&self, kind: SyncKind) -> Result<u32> {
        let value = self.get_state_value(kind.cursor_key()).await?.unwrap_or(0);
        Ok(u32::try_from(value).unwrap_or(0))
    }

    async fn set_cursor(&self, kind: SyncKind, page: u32) -> Result<()> {
        self.set_state_value(kind.cursor_key(), i64::from(page)).await
    }

    async fn is_snapshot_imported(&self) -> Result<bool> {
        Ok(self
            .get_state_value(store::SNAPSHOT_IMPORTED_KEY)
            .await?
            .is_some_and(|value| value != 0))
    }

    async fn mark_snapshot_imported(&self) -> Result<()> {
        self.set_state_value(store::SNAPSHOT_IMPORTED_KEY, 1).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database_connection::DatabaseConnection;
    use tempfile::tempdir;

    async fn test_repository() -> (tempfile::TempDir, SqliteFeaturedRepository) {
        let temp_dir = tempdir().unwrap();
        let database_url = format!("sqlite:{}", temp_dir.path().join("store.db").display());
        let db = DatabaseConnection::new(&database_url).await.unwrap();
        db.migrate().await.unwrap();
        (temp_dir, SqliteFeaturedRepository::new(db.pool().clone()))
    }

    #[tokio::test]
    async fn test_membership_roundtrip() {
        let (_dir, repo) = test_repository().await;

        assert!(!repo.was_featured(42).await.unwrap());
        repo.mark_featured(42).await.unwrap();
        assert!(repo.was_featured(42).await.unwrap());
        assert!(!repo.was_featured(43).await.unwrap());
    }

    #[tokio::test]
    async fn test_reinsert_keeps_first_seen() {
        let (_dir, repo) = test_repository().await;

        repo.mark_featured(7).await.unwrap();
        let first = repo.first_seen(7).await.unwrap().unwrap();
        repo.mark_featured(7).await.unwrap();
        assert_eq!(repo.first_seen(7).await.unwrap().unwrap(), first);
    }

    #[tokio::test]
    async fn test_cursor_defaults_to_zero_and_roundtrips() {
        let (_dir, repo) = test_repository().await;

        assert_eq!(repo.get_cursor(SyncKind::Daily).await.unwrap(), 0);
        repo.set_cursor(SyncKind::Daily, 5).await.unwrap();
        assert_eq!(repo.get_cursor(SyncKind::Daily).await.unwrap(), 5);
        // Kinds keep independent cursors
        assert_eq!(repo.get_cursor(SyncKind::Weekly).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_snapshot_imported_flag() {
        let (_dir, repo) = test_repository().await;

        assert!(!repo.is_snapshot_imported().await.unwrap());
        repo.mark_snapshot_imported().await.unwrap();
        assert!(repo.is_snapshot_imported().await.unwrap());
    }
}
