//! Pagination controller for the featured-item feeds
//!
//! One engine instance serves both sync kinds. Each invocation drives
//! fetch → parse → dedupe → decide cycles as a sequential loop, bounded by
//! the per-invocation page budget, resuming from the persisted cursor and
//! persisting where to resume next time. Once a kind has converged, a
//! process-lifetime flag suppresses further invocations for that kind until
//! restart.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::domain::entities::{ListingPage, SyncKind, SyncOutcome, SyncReport};
use crate::domain::repositories::FeaturedRepository;
use crate::domain::services::ListingFetcher;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::parsing::parse_listing_page;

pub struct SyncEngine {
    repo: Arc<dyn FeaturedRepository>,
    fetcher: Arc<dyn ListingFetcher>,
    max_pages: u32,
    duplicate_threshold: u32,
    expected_slots: usize,
    daily_synced: AtomicBool,
    weekly_synced: AtomicBool,
}

impl SyncEngine {
    pub fn new(
        repo: Arc<dyn FeaturedRepository>,
        fetcher: Arc<dyn ListingFetcher>,
        config: &AppConfig,
    ) -> Self {
        Self {
            repo,
            fetcher,
            max_pages: config.user.max_pages_per_sync,
            duplicate_threshold: config.advanced.duplicate_threshold,
            expected_slots: config.advanced.expected_slots,
            daily_synced: AtomicBool::new(false),
            weekly_synced: AtomicBool::new(false),
        }
    }

    fn session_flag(&self, kind: SyncKind) -> &AtomicBool {
        match kind {
            SyncKind::Daily => &self.daily_synced,
            SyncKind::Weekly => &self.weekly_synced,
        }
    }

    /// Whether this kind has already converged during this process lifetime
    pub fn has_converged(&self, kind: SyncKind) -> bool {
        self.session_flag(kind).load(Ordering::Acquire)
    }

    /// Membership query used by the badge-rendering collaborator. Safe to
    /// call before any sync has ever run.
    pub async fn was_featured(&self, id: i64) -> Result<bool> {
        self.repo.was_featured(id).await
    }

    /// Mark an identifier as featured directly, outside a sync cycle. Used
    /// by the collaborator when it encounters the currently-live featured
    /// item.
    pub async fn mark_featured(&self, id: i64) -> Result<()> {
        self.repo.mark_featured(id).await
    }

    /// Run one sync invocation for the given kind.
    ///
    /// Transport failures and the end-of-feed sentinel are absorbed into the
    /// returned report; only store errors propagate.
    pub async fn run_sync(&self, kind: SyncKind) -> Result<SyncReport> {
        if self.has_converged(kind) {
            debug!(kind = %kind, "feed already synced this session");
            return Ok(SyncReport::already_synced(kind));
        }

        let mut pages_checked = 0u32;
        let mut new_items = 0u32;
        let mut duplicates_total = 0u32;

        loop {
            let page = self.repo.get_cursor(kind).await?;
            debug!(kind = %kind, page, pages_checked, "fetching listing page");

            let body = match self.fetcher.fetch_page(kind, page).await {
                Ok(body) => body,
                Err(err) => {
                    // Nothing is mutated; the next trigger retries from the
                    // same persisted cursor
                    warn!(kind = %kind, page, %err, "listing fetch failed");
                    return Ok(SyncReport {
                        kind,
                        outcome: SyncOutcome::TransportFailed,
                        all_new: false,
                        pages_checked,
                        new_items,
                        duplicates: duplicates_total,
                    });
                }
            };

            let ids = match parse_listing_page(&body, self.expected_slots) {
                ListingPage::End => {
                    debug!(kind = %kind, page, "no more pages in the feed");
                    return Ok(SyncReport {
                        kind,
                        outcome: SyncOutcome::EndOfFeed,
                        all_new: false,
                        pages_checked,
                        new_items,
                        duplicates: duplicates_total,
                    });
                }
                ListingPage::Items(ids) => ids,
            };

            let mut all_new = true;
            let mut dupes = 0u32;
            for id in ids {
                if self.repo.was_featured(id).await? {
                    dupes += 1;
                    duplicates_total += 1;
                    // A run of duplicates means the rest of this page is
                    // already-saved data, not a coincidental overlap between
                    // pages; the remaining ids stay unwalked
                    if dupes >= self.duplicate_threshold {
                        debug!(kind = %kind, page, dupes, "duplicate run, feed has caught up");
                        all_new = false;
                        break;
                    }
                } else {
                    new_items += 1;
                }
                self.repo.mark_featured(id).await?;
            }

            pages_checked += 1;

            if all_new && pages_checked < self.max_pages {
                self.repo.set_cursor(kind, page + 1).await?;
                continue;
            }

            if pages_checked >= self.max_pages {
                // Budget exhausted while still finding new data: remember
                // where to resume, convergence not reached
                self.repo.set_cursor(kind, page + 1).await?;
                info!(kind = %kind, pages_checked, new_items, "page budget exhausted");
                return Ok(SyncReport {
                    kind,
                    outcome: SyncOutcome::BudgetExhausted,
                    all_new,
                    pages_checked,
                    new_items,
                    duplicates: duplicates_total,
                });
            }

            // Converged: start from the top next session, and skip further
            // syncs of this kind for the rest of this process lifetime
            self.repo.set_cursor(kind, 0).await?;
            self.session_flag(kind).store(true, Ordering::Release);
            info!(kind = %kind, pages_checked, new_items, "feed converged with local state");
            return Ok(SyncReport {
                kind,
                outcome: SyncOutcome::Converged,
                all_new: false,
                pages_checked,
                new_items,
                duplicates: duplicates_total,
            });
        }
    }
}
