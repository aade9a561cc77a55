use crate::{
    error::WatchError,
    message::{NewsItem, OutgoingMessage, Update},
    state::Snapshot,
};
use async_trait::async_trait;

/// Messaging channel: the transport to subscribers.
///
/// The gateway only needs two operations: deliver one message, and pull the
/// next batch of inbound updates after a cursor.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Register the bot's command menu with the platform. Best effort.
    async fn register_commands(&self) {}

    /// Send a single message. Errors are per-recipient and never retried.
    async fn send(&self, message: OutgoingMessage) -> Result<(), WatchError>;

    /// Fetch updates with `id >= offset` (all pending when `None`), oldest first.
    async fn poll(&self, offset: Option<i64>) -> Result<Vec<Update>, WatchError>;
}

/// Source of the monitored page.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// URL being monitored, used to resolve relative links.
    fn url(&self) -> &str;

    /// Fetch the raw page markup.
    async fn fetch(&self) -> Result<String, WatchError>;
}

/// Strategy that picks the latest news item out of the page markup.
pub trait Extractor: Send + Sync {
    fn extract_latest(&self, html: &str) -> Option<NewsItem>;
}

/// Storage backend for subscribers, seen history and counters.
#[async_trait]
pub trait Persistence: Send + Sync {
    async fn load(&self) -> Result<Snapshot, WatchError>;

    async fn save(&self, snapshot: &Snapshot) -> Result<(), WatchError>;
}
