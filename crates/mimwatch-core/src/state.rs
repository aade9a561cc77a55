//! Shared application state owned by the gateway.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::registry::SubscriberRegistry;
use crate::seen::SeenSet;
use crate::stats::BotStats;

/// Everything the daemon persists between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub subscribers: Vec<i64>,
    /// Seen keys, most recent first.
    pub seen: Vec<String>,
    pub stats: Option<BotStats>,
}

/// Seen history, subscribers and counters, each behind its own lock.
///
/// No method holds a lock across an `.await`; callers snapshot what they need
/// and do network I/O afterwards.
#[derive(Debug)]
pub struct AppState {
    pub seen: SeenSet,
    pub registry: SubscriberRegistry,
    stats: Mutex<BotStats>,
}

impl AppState {
    /// Empty state for a process started at `start_time`.
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            seen: SeenSet::new(),
            registry: SubscriberRegistry::new(),
            stats: Mutex::new(BotStats::new(start_time)),
        }
    }

    /// Restore from a stored snapshot. Counters carry over; uptime restarts.
    pub fn restore(snapshot: Snapshot, start_time: DateTime<Utc>) -> Self {
        let stats = match snapshot.stats {
            Some(stored) => BotStats::resumed(stored, start_time),
            None => BotStats::new(start_time),
        };
        Self {
            seen: SeenSet::from_history(snapshot.seen),
            registry: SubscriberRegistry::from_chats(snapshot.subscribers),
            stats: Mutex::new(stats),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            subscribers: self.registry.list(),
            seen: self.seen.history(),
            stats: Some(self.stats()),
        }
    }

    /// Copy of the current counters.
    pub fn stats(&self) -> BotStats {
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn record_command(&self) {
        self.with_stats(|s| s.total_commands_processed += 1);
    }

    /// Count one broadcast call: adds `delivered` and stamps the time once.
    pub fn record_broadcast(&self, delivered: usize, at: DateTime<Utc>) {
        self.with_stats(|s| {
            s.total_news_sent += delivered as u64;
            s.last_news_time = Some(at);
        });
    }

    pub fn record_error(&self, at: DateTime<Utc>) {
        self.with_stats(|s| s.last_error_time = Some(at));
    }

    fn with_stats(&self, f: impl FnOnce(&mut BotStats)) {
        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut stats);
    }
}
