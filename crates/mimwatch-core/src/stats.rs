use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Process-wide counters reported by `/stats` and the health endpoint.
///
/// Counters only grow; the two timestamps are overwritten on each event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotStats {
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub total_news_sent: u64,
    #[serde(default)]
    pub total_commands_processed: u64,
    #[serde(default)]
    pub last_news_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_error_time: Option<DateTime<Utc>>,
}

impl BotStats {
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            total_news_sent: 0,
            total_commands_processed: 0,
            last_news_time: None,
            last_error_time: None,
        }
    }

    /// Carry stored counters into a new process started at `start_time`.
    pub fn resumed(stored: BotStats, start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            ..stored
        }
    }

    /// Seconds since the process started, never negative.
    pub fn uptime_secs(&self, now: DateTime<Utc>) -> u64 {
        (now - self.start_time).num_seconds().max(0) as u64
    }
}
