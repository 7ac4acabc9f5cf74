use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            fetch: FetchConfig::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Location of the fjall job ledger
    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            ledger_path: default_ledger_path(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    "0.0.0.0:3001".parse().unwrap()
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("data/ledger")
}

/// Fetch provider configuration
///
/// The rendering service receives the target listing URL plus a store-scoping
/// cookie and returns the fully rendered markup. Two timeouts apply: the
/// interactive one bounds requests that hold a client connection open, the
/// background one bounds detached jobs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Store department listing page, department and query parameters fixed
    #[serde(default = "default_target_url")]
    pub target_url: String,
    /// Selector the remote renderer waits on before returning markup
    #[serde(default = "default_wait_selector")]
    pub wait_selector: String,
    #[serde(default = "default_premium_proxy")]
    pub premium_proxy: bool,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_sync_timeout_secs")]
    pub sync_timeout_secs: u64,
    #[serde(default = "default_background_timeout_secs")]
    pub background_timeout_secs: u64,
    /// Fetch provider API key (loaded from environment, not from config file)
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            target_url: default_target_url(),
            wait_selector: default_wait_selector(),
            premium_proxy: default_premium_proxy(),
            connect_timeout_secs: default_connect_timeout_secs(),
            sync_timeout_secs: default_sync_timeout_secs(),
            background_timeout_secs: default_background_timeout_secs(),
            api_key: None,
        }
    }
}

fn default_endpoint() -> String {
    "https://app.scrapingbee.com/api/v1/".to_string()
}

fn default_target_url() -> String {
    "https://www.walmart.com/browse/grocery/produce/?povid=globalnav_dept_4044_Produce&ebt_eligible=true"
        .to_string()
}

fn default_wait_selector() -> String {
    ".pa0-xl".to_string()
}

fn default_premium_proxy() -> bool {
    true
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_sync_timeout_secs() -> u64 {
    55
}

fn default_background_timeout_secs() -> u64 {
    90
}

/// Extractor configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractorConfig {
    /// Candidate containers examined per page; scanning stops at this bound
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
        }
    }
}

fn default_max_items() -> usize {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:3001");
        assert_eq!(config.fetch.sync_timeout_secs, 55);
        assert_eq!(config.fetch.background_timeout_secs, 90);
        assert!(config.fetch.premium_proxy);
        assert_eq!(config.extractor.max_items, 15);
        assert!(config.fetch.api_key.is_none());
    }
}
