//! # mimwatch-memory
//!
//! Persistent state for MiM Watcher (SQLite-backed): subscribers, seen
//! history and counters survive restarts.

pub mod store;

pub use store::Store;
