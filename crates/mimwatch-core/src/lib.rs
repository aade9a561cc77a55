//! # mimwatch-core
//!
//! Core types, traits, configuration, and error handling for MiM Watcher.
//!
//! The stateful pieces (seen history, subscriber registry, counters) live
//! here so the gateway, the command router and the health endpoint all share
//! one definition of the invariants.

pub mod config;
pub mod error;
pub mod message;
pub mod registry;
pub mod sanitize;
pub mod seen;
pub mod state;
pub mod stats;
pub mod traits;

pub use config::shellexpand;
pub use message::NewsItem;
pub use state::AppState;
