//! One-time bulk import of the bundled featured-item snapshot
//!
//! Seeds the store from a snapshot file shipped with the application so a
//! fresh install does not have to page through the whole remote feed. The
//! snapshot is newline-separated records of comma-separated decimal
//! identifiers, optionally with a trailing empty token from a trailing
//! delimiter.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::domain::entities::ImportSummary;
use crate::domain::repositories::FeaturedRepository;

pub struct SnapshotImporter {
    repo: Arc<dyn FeaturedRepository>,
}

impl SnapshotImporter {
    pub fn new(repo: Arc<dyn FeaturedRepository>) -> Self {
        Self { repo }
    }

    /// Run the import unless it has already run for this store.
    ///
    /// Tokens that do not parse as an integer are skipped without failing
    /// the import. The imported flag is set unconditionally afterward, even
    /// when the snapshot file could not be read at all, so the import never
    /// re-runs against the same store.
    pub async fn run_if_needed(&self, path: &Path) -> Result<ImportSummary> {
        if self.repo.is_snapshot_imported().await? {
            debug!("snapshot already imported, skipping");
            return Ok(ImportSummary::default());
        }

        let mut summary = ImportSummary { ran: true, ..ImportSummary::default() };

        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                for line in content.lines() {
                    for token in line.split(',') {
                        if token.is_empty() {
                            continue;
                        }
                        match token.parse::<i64>() {
                            Ok(id) if id >= 0 => {
                                self.repo.mark_featured(id).await?;
                                summary.imported += 1;
                            }
                            _ => {
                                debug!(token, "snapshot token is not an identifier, skipping");
                                summary.skipped_tokens += 1;
                            }
                        }
                    }
                }
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read bundled snapshot");
            }
        }

        self.repo.mark_snapshot_imported().await?;
        info!(
            imported = summary.imported,
            skipped = summary.skipped_tokens,
            "snapshot import finished"
        );
        Ok(summary)
    }
}

/// Append one identifier to a snapshot file, creating it if necessary.
///
/// Maintenance helper used to (re)build the bundled snapshot from a live
/// store; not called during normal operation.
pub async fn append_to_snapshot(path: &Path, id: i64) -> Result<()> {
    use tokio::io::AsyncWriteExt;

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("Failed to open snapshot file: {}", path.display()))?;
    file.write_all(format!("{id},").as_bytes())
        .await
        .with_context(|| format!("Failed to append to snapshot file: {}", path.display()))?;
    Ok(())
}
