mod channels;
mod defaults;

#[cfg(test)]
mod tests;

pub use channels::*;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::error::WatchError;
use defaults::*;

/// Top-level MiM Watcher configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// General daemon settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Also write a daily rolling log under `{data_dir}/logs/`.
    #[serde(default)]
    pub log_to_file: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            log_to_file: false,
        }
    }
}

/// The monitored page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Timeout for page fetches and Bot API calls.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl SourceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Timing of the two activities of the main loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Seconds between detection cycles, measured from the end of the last one.
    #[serde(default = "default_news_interval")]
    pub news_interval_secs: u64,
    /// Seconds slept between command polls.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Long-poll timeout passed to the transport when fetching updates.
    #[serde(default = "default_long_poll_timeout")]
    pub long_poll_timeout_secs: u64,
    /// Pause after an unexpected error in the loop body.
    #[serde(default = "default_error_backoff")]
    pub error_backoff_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            news_interval_secs: default_news_interval(),
            poll_interval_secs: default_poll_interval(),
            long_poll_timeout_secs: default_long_poll_timeout(),
            error_backoff_secs: default_error_backoff(),
        }
    }
}

impl ScheduleConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn error_backoff(&self) -> Duration {
        Duration::from_secs(self.error_backoff_secs)
    }
}

/// Memory config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// Health endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_api_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_api_host(),
            port: default_api_port(),
        }
    }
}

impl Config {
    /// Apply environment overrides on top of the file values.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a map. Values
    /// that fail to parse leave the file value in place and come back as
    /// warnings, since this runs before logging is set up.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rejected = Vec::new();

        if let Some(token) = lookup("TELEGRAM_BOT_TOKEN").filter(|t| !t.trim().is_empty()) {
            self.telegram.bot_token = token.trim().to_string();
        }
        if let Some(url) = lookup("MIM_URL").filter(|u| !u.trim().is_empty()) {
            self.source.url = url.trim().to_string();
        }
        if let Some(level) = lookup("LOG_LEVEL").filter(|l| !l.trim().is_empty()) {
            self.watch.log_level = level.trim().to_lowercase();
        }
        if let Some(raw) = lookup("NEWS_INTERVAL") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.schedule.news_interval_secs = secs,
                _ => rejected.push(format!("ignoring invalid NEWS_INTERVAL={raw:?}")),
            }
        }
        if let Some(raw) = lookup("PORT") {
            match raw.trim().parse::<u16>() {
                Ok(port) => self.api.port = port,
                Err(_) => rejected.push(format!("ignoring invalid PORT={raw:?}")),
            }
        }

        rejected
    }

    /// Reject configurations the daemon cannot run with.
    pub fn validate(&self) -> Result<(), WatchError> {
        if self.telegram.bot_token.trim().is_empty() {
            return Err(WatchError::Config(
                "telegram bot_token is empty. Set it in config.toml or the \
                 TELEGRAM_BOT_TOKEN env var"
                    .to_string(),
            ));
        }
        if self.schedule.news_interval_secs == 0 || self.schedule.poll_interval_secs == 0 {
            return Err(WatchError::Config(
                "schedule intervals must be greater than zero".to_string(),
            ));
        }
        if self.source.url.trim().is_empty() {
            return Err(WatchError::Config("source url is empty".to_string()));
        }
        Ok(())
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist. Environment overrides
/// are not applied here; see [`Config::apply_env_overrides`].
pub fn load(path: &str) -> Result<Config, WatchError> {
    let path = Path::new(path);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| WatchError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| WatchError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
