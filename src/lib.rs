//! Featured Sync - discovery-sync engine for daily/weekly featured item feeds
//!
//! This library periodically pulls pages of featured-item records from a
//! remote listing endpoint, deduplicates them against a persisted set of
//! previously-seen identifiers, and decides from a run of consecutive
//! duplicates when the remote feed has caught up with local state.

// Module declarations
pub mod domain;
pub mod application;
pub mod infrastructure;

// Re-export the main library surface for easier access
pub use application::sync_engine::SyncEngine;
pub use domain::entities::{ImportSummary, ListingPage, SyncKind, SyncOutcome, SyncReport};
pub use domain::repositories::FeaturedRepository;
pub use domain::services::{FetchError, ListingFetcher};
pub use infrastructure::database_connection::DatabaseConnection;
pub use infrastructure::featured_repository::SqliteFeaturedRepository;
pub use infrastructure::listing_client::{HttpListingClient, ListingClientConfig};
pub use infrastructure::snapshot_import::SnapshotImporter;
