//! Service interface for the listing-page transport

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::SyncKind;

/// Transport-level failure while fetching a listing page.
///
/// The engine recovers from these locally: a failed cycle reports "no new
/// data" and mutates nothing, so the next trigger retries from the same
/// persisted cursor.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    #[error("listing request failed: {0}")]
    Transport(String),

    #[error("listing endpoint returned HTTP {0}")]
    Status(u16),
}

/// Issues one outbound request per listing page and resolves exactly once
/// with either the raw text body or a transport error. No internal retry;
/// page-level retry happens naturally on the next external trigger.
#[async_trait]
pub trait ListingFetcher: Send + Sync {
    async fn fetch_page(&self, kind: SyncKind, page: u32) -> Result<String, FetchError>;
}
