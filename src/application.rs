//! Application layer module
//!
//! Contains the sync engine that orchestrates the domain logic.

pub mod sync_engine;

pub use sync_engine::SyncEngine;
