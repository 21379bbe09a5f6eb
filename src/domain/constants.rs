//! Listing endpoint characteristics and sync domain constants

/// Remote listing endpoint characteristics
pub mod listing {
    /// Default listing endpoint URL (overridable through the advanced config)
    pub const ENDPOINT_URL: &str = "http://www.boomlings.com/database/getGJLevels21.php";

    /// Fixed shared secret expected by the listing endpoint
    pub const SHARED_SECRET: &str = "Wmfd2893gb7";

    /// Value sent in the `diff` form field (no difficulty filter)
    pub const DIFF_FILTER: &str = "-";

    /// Value sent in the `len` form field (no length filter)
    pub const LEN_FILTER: &str = "-";

    /// Listing type code for the daily feed
    pub const TYPE_DAILY: u32 = 21;

    /// Listing type code for the weekly feed
    pub const TYPE_WEEKLY: u32 = 22;

    /// A full listing page carries exactly this many slots
    pub const SLOTS_PER_PAGE: usize = 10;

    /// Response body signalling that no further pages exist
    pub const END_OF_FEED: &str = "-1";
}

/// Sync engine limits
pub mod sync {
    /// Pages fetched per trigger; caps outbound requests per UI trigger
    pub const DEFAULT_MAX_PAGES_PER_SYNC: u32 = 3;

    /// Consecutive duplicates on one page that count as convergence rather
    /// than coincidental overlap between pages
    pub const DEFAULT_DUPLICATE_THRESHOLD: u32 = 3;

    /// Default request timeout (seconds)
    pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

    /// Default outbound request rate
    pub const DEFAULT_MAX_REQUESTS_PER_SECOND: u32 = 5;
}

/// Persisted store keys
pub mod store {
    /// Key holding the next daily page to fetch
    pub const DAILY_CURSOR_KEY: &str = "daily_page";

    /// Key holding the next weekly page to fetch
    pub const WEEKLY_CURSOR_KEY: &str = "weekly_page";

    /// Key marking that the bundled snapshot has been imported
    pub const SNAPSHOT_IMPORTED_KEY: &str = "snapshot_imported";
}
