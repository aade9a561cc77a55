//! Telegram Bot API channel.
//!
//! Uses `getUpdates` with an explicit offset for inbound commands and
//! `sendMessage` for replies and broadcasts.
//! Docs: <https://core.telegram.org/bots/api>

mod polling;
mod send;
pub(crate) mod types;


use mimwatch_core::{config::TelegramConfig, error::WatchError};
use std::time::Duration;

/// Telegram channel using the Bot API.
pub struct TelegramChannel {
    client: reqwest::Client,
    base_url: String,
    /// Seconds the server may hold a `getUpdates` call open.
    long_poll_secs: u64,
    /// Per-request timeout for `sendMessage` and friends.
    request_timeout: Duration,
}

impl TelegramChannel {
    /// Create a new Telegram channel from config.
    pub fn new(
        config: &TelegramConfig,
        request_timeout: Duration,
        long_poll_secs: u64,
    ) -> Result<Self, WatchError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| WatchError::Channel(format!("failed to build HTTP client: {e}")))?;
        let base_url = format!(
            "{}/bot{}",
            config.api_base.trim_end_matches('/'),
            config.bot_token
        );
        Ok(Self {
            client,
            base_url,
            long_poll_secs,
            request_timeout,
        })
    }
}
