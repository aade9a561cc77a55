use thiserror::Error;

/// Top-level error type for MiM Watcher.
#[derive(Debug, Error)]
pub enum WatchError {
    /// Fetching or reading the monitored page failed.
    #[error("source error: {0}")]
    Source(String),

    /// Error from the messaging transport.
    #[error("channel error: {0}")]
    Channel(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Persistence error.
    #[error("memory error: {0}")]
    Memory(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
