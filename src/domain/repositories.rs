//! Repository interface for the persisted featured-item store
//!
//! Contains the trait definition the sync engine and the bulk importer work
//! against; the SQLite implementation lives in the infrastructure layer.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::SyncKind;

/// Persisted set of identifiers already confirmed featured, plus the small
/// scalars the engine needs to resume (per-kind cursors, imported flag).
///
/// The set is shared across both sync kinds; insert and membership must be
/// safe under concurrent access from the two kind-flows.
#[async_trait]
pub trait FeaturedRepository: Send + Sync {
    /// Mark an identifier as featured. Idempotent; re-inserting an existing
    /// identifier is a no-op.
    async fn mark_featured(&self, id: i64) -> Result<()>;

    /// Membership test. No side effects; safe to call before any sync or
    /// import has ever run (returns false for everything until populated).
    async fn was_featured(&self, id: i64) -> Result<bool>;

    /// When the identifier was first inserted, if it is present at all
    async fn first_seen(&self, id: i64) -> Result<Option<DateTime<Utc>>>;

    /// Next page to fetch for this kind; 0 when never set
    async fn get_cursor(&self, kind: SyncKind) -> Result<u32>;

    /// Persist the next page to fetch for this kind
    async fn set_cursor(&self, kind: SyncKind, page: u32) -> Result<()>;

    /// Whether the bundled snapshot has ever been imported
    async fn is_snapshot_imported(&self) -> Result<bool>;

    /// Mark the bundled snapshot as imported; set exactly once, never cleared
    async fn mark_snapshot_imported(&self) -> Result<()>;
}
