use serde::{Deserialize, Serialize};

use super::defaults::default_api_base;

/// Telegram bot config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token from @BotFather. Required to start the daemon.
    #[serde(default)]
    pub bot_token: String,
    /// Bot API base URL, without the `/bot<token>` suffix.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_base: default_api_base(),
        }
    }
}
