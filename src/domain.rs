//! Domain module - core entities and trait seams
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod constants;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export commonly used items for convenience
pub use entities::{ImportSummary, ListingPage, SyncKind, SyncOutcome, SyncReport};
pub use repositories::FeaturedRepository;
pub use services::{FetchError, ListingFetcher};
