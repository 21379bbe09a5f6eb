//! Infrastructure layer for the database, wire parsing, HTTP transport,
//! configuration, and logging

pub mod config;
pub mod database_connection;
pub mod featured_repository;
pub mod listing_client;
pub mod logging;
pub mod parsing;
pub mod snapshot_import;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager};
pub use database_connection::DatabaseConnection;
pub use featured_repository::SqliteFeaturedRepository;
pub use listing_client::{HttpListingClient, ListingClientConfig};
pub use parsing::parse_listing_page;
pub use snapshot_import::SnapshotImporter;
