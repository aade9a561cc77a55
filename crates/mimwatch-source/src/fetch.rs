//! HTTP fetcher for the monitored page.

use async_trait::async_trait;
use mimwatch_core::{config::SourceConfig, error::WatchError, traits::PageSource};
use reqwest::Client;
use tracing::debug;

/// Fetches one fixed URL with the configured user agent and timeout.
pub struct PageFetcher {
    client: Client,
    url: String,
}

impl PageFetcher {
    pub fn new(config: &SourceConfig) -> Result<Self, WatchError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| WatchError::Source(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl PageSource for PageFetcher {
    fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<String, WatchError> {
        debug!("fetching {}", self.url);
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| WatchError::Source(format!("GET {} failed: {e}", self.url)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WatchError::Source(format!(
                "GET {} returned {status}",
                self.url
            )));
        }

        resp.text()
            .await
            .map_err(|e| WatchError::Source(format!("failed to read body of {}: {e}", self.url)))
    }
}
