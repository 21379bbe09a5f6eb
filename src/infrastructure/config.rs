//! Configuration infrastructure
//!
//! Configuration is organized into two tiers:
//! 1. User-configurable settings (exposed by the host application)
//! 2. Hidden/Advanced settings (in config file only)

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use crate::domain::constants::{listing, sync};
use crate::infrastructure::listing_client::ListingClientConfig;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// User-configurable settings
    pub user: UserConfig,

    /// Hidden/Advanced settings (config file only)
    pub advanced: AdvancedConfig,
}

/// User-configurable settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Maximum pages to fetch in a single sync invocation
    pub max_pages_per_sync: u32,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,

    /// Maximum outbound requests per second
    pub max_requests_per_second: u32,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            max_pages_per_sync: sync::DEFAULT_MAX_PAGES_PER_SYNC,
            request_timeout_seconds: sync::DEFAULT_REQUEST_TIMEOUT_SECONDS,
            max_requests_per_second: sync::DEFAULT_MAX_REQUESTS_PER_SECOND,
            logging: LoggingConfig::default(),
        }
    }
}

/// Hidden/Advanced settings that are in the config file but not exposed to
/// end users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancedConfig {
    /// Listing endpoint URL
    pub listing_endpoint: String,

    /// Fixed shared secret sent with every listing request
    pub shared_secret: String,

    /// User agent sent with listing requests; empty omits the header
    pub user_agent: String,

    /// Slots per full listing page
    pub expected_slots: usize,

    /// Consecutive duplicates on one page that count as convergence
    pub duplicate_threshold: u32,
}

impl Default for AdvancedConfig {
    fn default() -> Self {
        Self {
            listing_endpoint: listing::ENDPOINT_URL.to_string(),
            shared_secret: listing::SHARED_SECRET.to_string(),
            user_agent: String::new(),
            expected_slots: listing::SLOTS_PER_PAGE,
            duplicate_threshold: sync::DEFAULT_DUPLICATE_THRESHOLD,
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Log file directory; defaults next to the executable when unset
    pub log_dir: Option<PathBuf>,

    /// Module-specific log level filters (e.g. "sqlx": "warn")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let mut module_filters = HashMap::new();
        module_filters.insert("sqlx".to_string(), "warn".to_string());
        module_filters.insert("reqwest".to_string(), "info".to_string());

        Self {
            level: "info".to_string(),
            console_output: true,
            file_output: false,
            log_dir: None,
            module_filters,
        }
    }
}

impl AppConfig {
    /// Build the transport configuration from the two tiers
    pub fn listing_client_config(&self) -> ListingClientConfig {
        ListingClientConfig {
            endpoint_url: self.advanced.listing_endpoint.clone(),
            shared_secret: self.advanced.shared_secret.clone(),
            user_agent: self.advanced.user_agent.clone(),
            timeout_seconds: self.user.request_timeout_seconds,
            max_requests_per_second: self.user.max_requests_per_second,
        }
    }
}

/// Loads and persists the application configuration as JSON under the
/// platform config directory
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Get the platform-appropriate configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine platform config directory")?
            .join("featured-sync");
        Ok(config_dir)
    }

    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self {
            config_path: config_dir.join("featured_sync_config.json"),
        })
    }

    /// Create a manager bound to an explicit config file path
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load the configuration, writing the defaults first if no config file
    /// exists yet
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            let config = AppConfig::default();
            self.save_config(&config).await?;
            info!(path = %self.config_path.display(), "wrote default configuration");
            return Ok(config);
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .with_context(|| format!("Failed to read config file: {}", self.config_path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", self.config_path.display()))?;
        Ok(config)
    }

    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(config_dir) = self.config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir)
                    .await
                    .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;
            }
        }

        let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
        fs::write(&self.config_path, content)
            .await
            .with_context(|| format!("Failed to write config file: {}", self.config_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_domain_constants() {
        let config = AppConfig::default();
        assert_eq!(config.user.max_pages_per_sync, 3);
        assert_eq!(config.advanced.duplicate_threshold, 3);
        assert_eq!(config.advanced.expected_slots, 10);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.user.max_pages_per_sync, config.user.max_pages_per_sync);
        assert_eq!(parsed.advanced.listing_endpoint, config.advanced.listing_endpoint);
    }

    #[tokio::test]
    async fn test_first_load_writes_defaults() {
        let temp_dir = tempdir().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("config.json"));

        let config = manager.load_config().await.unwrap();
        assert!(manager.config_path().exists());
        assert_eq!(config.user.max_pages_per_sync, 3);

        // Second load reads the file it just wrote
        let reloaded = manager.load_config().await.unwrap();
        assert_eq!(reloaded.advanced.expected_slots, 10);
    }
}
