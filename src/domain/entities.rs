//! Core domain entities for the featured-item sync engine

use serde::{Deserialize, Serialize};

use crate::domain::constants::{listing, store};

/// One of the two independent recurring discovery feeds. Both are processed
/// by identical logic with different remote parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyncKind {
    Daily,
    Weekly,
}

impl SyncKind {
    /// Numeric listing-type parameter sent to the remote endpoint
    pub fn type_code(self) -> u32 {
        match self {
            Self::Daily => listing::TYPE_DAILY,
            Self::Weekly => listing::TYPE_WEEKLY,
        }
    }

    /// Persisted key under which this kind's resume cursor is stored
    pub fn cursor_key(self) -> &'static str {
        match self {
            Self::Daily => store::DAILY_CURSOR_KEY,
            Self::Weekly => store::WEEKLY_CURSOR_KEY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl std::fmt::Display for SyncKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed listing page: either the end-of-feed sentinel or the ordered
/// identifiers extracted from the page's slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingPage {
    /// The remote side reported that no further pages exist
    End,
    /// Identifiers in slot order; may be shorter than a full page when the
    /// feed ran out of live slots
    Items(Vec<i64>),
}

/// Why a sync invocation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncOutcome {
    /// This kind already converged earlier in the process lifetime; no fetch
    /// was issued
    AlreadySynced,
    /// The remote side reported no further pages
    EndOfFeed,
    /// Enough consecutive duplicates were seen that local state has caught
    /// up with the remote feed
    Converged,
    /// The per-invocation page budget ran out while still finding new data
    BudgetExhausted,
    /// The fetch could not complete; nothing was mutated
    TransportFailed,
}

/// Completion report for one sync invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub kind: SyncKind,
    pub outcome: SyncOutcome,
    /// Whether every walked identifier was previously unseen
    pub all_new: bool,
    /// Pages processed by this invocation
    pub pages_checked: u32,
    /// Identifiers newly inserted into the store
    pub new_items: u32,
    /// Identifiers that were already present
    pub duplicates: u32,
}

impl SyncReport {
    /// Report for an invocation that was suppressed by the session flag
    pub fn already_synced(kind: SyncKind) -> Self {
        Self {
            kind,
            outcome: SyncOutcome::AlreadySynced,
            all_new: false,
            pages_checked: 0,
            new_items: 0,
            duplicates: 0,
        }
    }
}

/// Result of a bulk snapshot import
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    /// False when the import had already run and this call was a no-op
    pub ran: bool,
    /// Identifiers marked present
    pub imported: u32,
    /// Tokens skipped because they did not parse as an integer
    pub skipped_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_type_codes() {
        assert_eq!(SyncKind::Daily.type_code(), 21);
        assert_eq!(SyncKind::Weekly.type_code(), 22);
    }

    #[test]
    fn test_kind_cursor_keys_are_distinct() {
        assert_ne!(SyncKind::Daily.cursor_key(), SyncKind::Weekly.cursor_key());
    }

    #[test]
    fn test_already_synced_report() {
        let report = SyncReport::already_synced(SyncKind::Weekly);
        assert_eq!(report.outcome, SyncOutcome::AlreadySynced);
        assert!(!report.all_new);
        assert_eq!(report.pages_checked, 0);
    }
}
