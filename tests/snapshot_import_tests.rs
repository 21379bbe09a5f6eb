//! Tests for the one-time bulk snapshot import

use std::sync::Arc;

use tempfile::TempDir;

use featured_sync::infrastructure::snapshot_import::append_to_snapshot;
use featured_sync::{DatabaseConnection, FeaturedRepository, SnapshotImporter, SqliteFeaturedRepository};

async fn setup() -> (TempDir, Arc<SqliteFeaturedRepository>, SnapshotImporter) {
    let temp_dir = TempDir::new().unwrap();
    let database_url = format!("sqlite:{}", temp_dir.path().join("import.db").display());
    let db = DatabaseConnection::new(&database_url).await.unwrap();
    db.migrate().await.unwrap();

    let repo = Arc::new(SqliteFeaturedRepository::new(db.pool().clone()));
    let importer = SnapshotImporter::new(repo.clone());
    (temp_dir, repo, importer)
}

#[tokio::test]
async fn import_skips_bad_and_empty_tokens() {
    let (dir, repo, importer) = setup().await;
    let snapshot = dir.path().join("snapshot.txt");
    tokio::fs::write(&snapshot, "1,2,x,3,").await.unwrap();

    let summary = importer.run_if_needed(&snapshot).await.unwrap();

    assert!(summary.ran);
    assert_eq!(summary.imported, 3);
    assert_eq!(summary.skipped_tokens, 1);
    for id in [1, 2, 3] {
        assert!(repo.was_featured(id).await.unwrap());
    }
    assert!(repo.is_snapshot_imported().await.unwrap());
}

#[tokio::test]
async fn import_reads_every_line() {
    let (dir, repo, importer) = setup().await;
    let snapshot = dir.path().join("snapshot.txt");
    tokio::fs::write(&snapshot, "10,11,12,\n20,21,\n30,").await.unwrap();

    let summary = importer.run_if_needed(&snapshot).await.unwrap();

    assert_eq!(summary.imported, 6);
    assert_eq!(summary.skipped_tokens, 0);
    for id in [10, 11, 12, 20, 21, 30] {
        assert!(repo.was_featured(id).await.unwrap());
    }
}

#[tokio::test]
async fn import_never_runs_twice() {
    let (dir, repo, importer) = setup().await;
    let snapshot = dir.path().join("snapshot.txt");
    tokio::fs::write(&snapshot, "1,").await.unwrap();
    importer.run_if_needed(&snapshot).await.unwrap();

    // Re-invoking with different content is a no-op
    tokio::fs::write(&snapshot, "2,").await.unwrap();
    let summary = importer.run_if_needed(&snapshot).await.unwrap();

    assert!(!summary.ran);
    assert_eq!(summary.imported, 0);
    assert!(!repo.was_featured(2).await.unwrap());
}

#[tokio::test]
async fn missing_snapshot_still_marks_the_import_done() {
    let (dir, repo, importer) = setup().await;
    let snapshot = dir.path().join("does_not_exist.txt");

    let summary = importer.run_if_needed(&snapshot).await.unwrap();

    assert!(summary.ran);
    assert_eq!(summary.imported, 0);
    assert!(repo.is_snapshot_imported().await.unwrap());
}

#[tokio::test]
async fn appended_snapshot_round_trips_through_import() {
    let (dir, repo, importer) = setup().await;
    let snapshot = dir.path().join("snapshot.txt");
    append_to_snapshot(&snapshot, 111).await.unwrap();
    append_to_snapshot(&snapshot, 222).await.unwrap();

    let summary = importer.run_if_needed(&snapshot).await.unwrap();

    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped_tokens, 0);
    assert!(repo.was_featured(111).await.unwrap());
    assert!(repo.was_featured(222).await.unwrap());
}
