//! Bounded, ordered history of delivered item keys.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Maximum number of keys remembered.
pub const SEEN_CAPACITY: usize = 50;

/// Most-recent-first record of item keys that have already been broadcast.
///
/// Keys are unique and the history never exceeds [`SEEN_CAPACITY`]; the
/// oldest key falls off the tail when a new one is pushed at the head.
/// There is no removal: keys only leave by eviction.
#[derive(Debug, Default)]
pub struct SeenSet {
    keys: Mutex<VecDeque<String>>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a stored history (most recent first). Duplicates are
    /// dropped and the result is capped.
    pub fn from_history<I, S>(history: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut keys = VecDeque::with_capacity(SEEN_CAPACITY);
        for key in history {
            let key = key.into();
            if keys.len() == SEEN_CAPACITY {
                break;
            }
            if !keys.contains(&key) {
                keys.push_back(key);
            }
        }
        Self {
            keys: Mutex::new(keys),
        }
    }

    pub fn is_seen(&self, key: &str) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|k| k == key)
    }

    /// Record `key` as seen. Returns `true` only if it was not already present.
    ///
    /// Check and insert happen under one lock, so two concurrent callers with
    /// the same key get exactly one `true`.
    pub fn mark_seen(&self, key: &str) -> bool {
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        if keys.iter().any(|k| k == key) {
            return false;
        }
        keys.push_front(key.to_string());
        keys.truncate(SEEN_CAPACITY);
        true
    }

    pub fn len(&self) -> usize {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the history, most recent first.
    pub fn history(&self) -> Vec<String> {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}
