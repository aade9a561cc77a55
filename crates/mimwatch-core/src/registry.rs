//! The set of chats opted in to notifications.

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

/// Subscribed chat identifiers.
///
/// Every operation takes the lock for the duration of a single container
/// access. Broadcasts fan out over a [`list`](Self::list) snapshot, so a
/// concurrent add/remove never corrupts the set but may or may not be seen by
/// a broadcast already in flight.
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    chats: Mutex<BTreeSet<i64>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_chats<I: IntoIterator<Item = i64>>(chats: I) -> Self {
        Self {
            chats: Mutex::new(chats.into_iter().collect()),
        }
    }

    /// Subscribe a chat. Returns `false` if it was already subscribed.
    pub fn add(&self, chat_id: i64) -> bool {
        self.chats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(chat_id)
    }

    /// Unsubscribe a chat. Returns `false` if it was not subscribed.
    pub fn remove(&self, chat_id: i64) -> bool {
        self.chats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&chat_id)
    }

    pub fn contains(&self, chat_id: i64) -> bool {
        self.chats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&chat_id)
    }

    /// Snapshot of all subscribed chats, in ascending id order.
    pub fn list(&self) -> Vec<i64> {
        self.chats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.chats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_contains_remove() {
        let reg = SubscriberRegistry::new();
        assert!(reg.add(42));
        assert!(reg.contains(42));
        assert!(reg.remove(42));
        assert!(!reg.contains(42));
        assert!(!reg.remove(42), "removing an absent chat reports false");
    }

    #[test]
    fn test_add_twice_does_not_duplicate() {
        let reg = SubscriberRegistry::new();
        assert!(reg.add(7));
        assert!(!reg.add(7));
        assert_eq!(reg.list(), vec![7]);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_from_chats_collapses_duplicates() {
        let reg = SubscriberRegistry::from_chats([3, 1, 3, -100200]);
        assert_eq!(reg.list(), vec![-100200, 1, 3]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let reg = SubscriberRegistry::from_chats([1, 2]);
        let snapshot = reg.list();
        reg.add(3);
        reg.remove(1);
        assert_eq!(snapshot, vec![1, 2]);
        assert_eq!(reg.list(), vec![2, 3]);
    }
}
