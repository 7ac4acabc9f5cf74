//! HTTP client for the ScrapingBee rendering API

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Client;
use tracing::debug;

use super::{FetchError, FetchMode, PageFetcher};
use crate::config::FetchConfig;

/// Unreserved set of JavaScript's `encodeURIComponent`; the provider
/// decodes the cookie value with the same convention.
const COOKIE_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Cookie that scopes the rendered page to one physical store: the
/// serialized `{"id": store_id}` marker, URL-encoded as a cookie value.
pub fn store_session_cookie(store_id: &str) -> String {
    let marker = serde_json::json!({ "id": store_id }).to_string();
    format!(
        "store-search-session-marker={}",
        utf8_percent_encode(&marker, COOKIE_COMPONENT)
    )
}

/// Client for the rendering/proxy service.
pub struct ScrapingBeeClient {
    http: Client,
    config: FetchConfig,
}

impl ScrapingBeeClient {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(concat!("shelfscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn timeout_for(&self, mode: FetchMode) -> Duration {
        match mode {
            FetchMode::Interactive => Duration::from_secs(self.config.sync_timeout_secs),
            FetchMode::Background => Duration::from_secs(self.config.background_timeout_secs),
        }
    }
}

#[async_trait]
impl PageFetcher for ScrapingBeeClient {
    async fn fetch_listing(&self, store_id: &str, mode: FetchMode) -> Result<String, FetchError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(FetchError::MissingApiKey)?;
        let cookies = store_session_cookie(store_id);

        debug!(store_id, ?mode, "Requesting rendered listing");

        // Single attempt per request/job; failures are reported, not retried.
        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&[
                ("api_key", api_key),
                ("url", self.config.target_url.as_str()),
                ("cookies", cookies.as_str()),
                ("wait_for", self.config.wait_selector.as_str()),
                (
                    "premium_proxy",
                    if self.config.premium_proxy {
                        "true"
                    } else {
                        "false"
                    },
                ),
            ])
            .timeout(self.timeout_for(mode))
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let markup = response.text().await.map_err(classify)?;

        debug!(store_id, size = markup.len(), "Rendered listing received");

        Ok(markup)
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_session_cookie_encoding() {
        assert_eq!(
            store_session_cookie("1234"),
            "store-search-session-marker=%7B%22id%22%3A%221234%22%7D"
        );
    }

    #[test]
    fn test_store_session_cookie_is_json_under_the_encoding() {
        let cookie = store_session_cookie("98765");
        let value = cookie
            .strip_prefix("store-search-session-marker=")
            .unwrap()
            .replace("%7B", "{")
            .replace("%7D", "}")
            .replace("%22", "\"")
            .replace("%3A", ":");
        assert_eq!(value, r#"{"id":"98765"}"#);
    }

    #[test]
    fn test_timeout_budgets_per_mode() {
        let client = ScrapingBeeClient::new(FetchConfig::default()).unwrap();
        assert_eq!(
            client.timeout_for(FetchMode::Interactive),
            Duration::from_secs(55)
        );
        assert_eq!(
            client.timeout_for(FetchMode::Background),
            Duration::from_secs(90)
        );
    }
}
