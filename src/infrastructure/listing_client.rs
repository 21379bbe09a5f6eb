//! HTTP transport for listing pages with rate limiting
//!
//! Wraps a reqwest client behind the `ListingFetcher` seam: one form-encoded
//! POST per page, rate-limited so repeated UI triggers cannot hammer the
//! listing endpoint.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use tracing::debug;

use crate::domain::constants::{listing, sync};
use crate::domain::entities::SyncKind;
use crate::domain::services::{FetchError, ListingFetcher};

/// Transport configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ListingClientConfig {
    pub endpoint_url: String,
    pub shared_secret: String,
    /// The listing endpoint rejects requests carrying a browser user agent,
    /// so the default is empty (no User-Agent header at all)
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_requests_per_second: u32,
}

impl Default for ListingClientConfig {
    fn default() -> Self {
        Self {
            endpoint_url: listing::ENDPOINT_URL.to_string(),
            shared_secret: listing::SHARED_SECRET.to_string(),
            user_agent: String::new(),
            timeout_seconds: sync::DEFAULT_REQUEST_TIMEOUT_SECONDS,
            max_requests_per_second: sync::DEFAULT_MAX_REQUESTS_PER_SECOND,
        }
    }
}

/// Rate-limited listing-page client
pub struct HttpListingClient {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    config: ListingClientConfig,
}

impl HttpListingClient {
    /// Create a new client with the given configuration
    pub fn new(config: ListingClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if !config.user_agent.is_empty() {
            headers.insert(
                USER_AGENT,
                HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
            );
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.max_requests_per_second)
                .context("Rate limit must be greater than 0")?,
        );
        let rate_limiter = RateLimiter::direct(quota);

        Ok(Self {
            client,
            rate_limiter,
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &ListingClientConfig {
        &self.config
    }
}

#[async_trait]
impl ListingFetcher for HttpListingClient {
    async fn fetch_page(&self, kind: SyncKind, page: u32) -> Result<String, FetchError> {
        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        debug!(kind = %kind, page, "fetching listing page");

        let params = [
            ("diff", listing::DIFF_FILTER.to_string()),
            ("type", kind.type_code().to_string()),
            ("page", page.to_string()),
            ("len", listing::LEN_FILTER.to_string()),
            ("secret", self.config.shared_secret.clone()),
        ];

        let response = self
            .client
            .post(&self.config.endpoint_url)
            .form(&params)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        debug!(kind = %kind, page, bytes = body.len(), "listing page fetched");
        Ok(body)
    }
}
