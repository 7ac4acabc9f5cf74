//! Outbound fetch through the external rendering service.
//!
//! The provider renders the target listing page (JavaScript included) on
//! its side and returns the final markup, scoped to one physical store by a
//! session cookie. One outbound call per request or job; failures are
//! reported to the caller, never retried here.

pub mod scrapingbee;

pub use scrapingbee::ScrapingBeeClient;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("render request failed: {0}")]
    Transport(String),

    #[error("render request timed out")]
    Timeout,

    #[error("upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("scraping API key is not configured")]
    MissingApiKey,
}

/// Which timeout budget applies to a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// The caller holds a client connection open; shorter budget
    Interactive,
    /// Detached job; tolerates a longer render wait
    Background,
}

/// Seam for the external fetch dependency; stubbed in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the rendered listing markup for one store.
    async fn fetch_listing(&self, store_id: &str, mode: FetchMode) -> Result<String, FetchError>;
}
