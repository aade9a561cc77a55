//! # mimwatch-channels
//!
//! Messaging platform integrations for MiM Watcher.

pub mod telegram;
