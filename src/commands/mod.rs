//! Built-in bot commands.
//!
//! Parsing and the handlers that only touch in-memory state live here. The
//! commands that need the page (`/last`, `/force`, the `/start` preview) are
//! driven by the gateway, which owns the fetcher and the transport.

mod status;
mod subscription;

#[cfg(test)]
mod tests;

pub use status::{handle_help, handle_next, handle_stats};
pub use subscription::{handle_start, handle_stop};

use chrono::{DateTime, Utc};
use mimwatch_core::{config::ScheduleConfig, AppState};

/// Grouped context for command execution.
pub struct CommandContext<'a> {
    pub state: &'a AppState,
    pub schedule: &'a ScheduleConfig,
    pub chat_id: i64,
    pub now: DateTime<Utc>,
    /// End of the last scheduled detection cycle, if one has run.
    pub last_check: Option<DateTime<Utc>>,
}

/// Known bot commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Help,
    Last,
    Next,
    Force,
    Stats,
    /// Anything else, carrying the trimmed original text.
    Unknown(String),
}

impl Command {
    /// Parse a command from message text.
    ///
    /// Only the first token counts; it is lowercased and stripped of any
    /// `@botname` suffix.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let Some(first) = text.split_whitespace().next() else {
            return Self::Unknown(String::new());
        };
        // Strip @botname suffix (e.g. "/start@mimwatch_bot" → "/start").
        let cmd = first.split('@').next().unwrap_or(first).to_lowercase();
        match cmd.as_str() {
            "/start" => Self::Start,
            "/stop" => Self::Stop,
            "/help" => Self::Help,
            "/last" => Self::Last,
            "/next" => Self::Next,
            "/force" => Self::Force,
            "/stats" => Self::Stats,
            _ => Self::Unknown(text.to_string()),
        }
    }
}
