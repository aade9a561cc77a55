//! # mimwatch-source
//!
//! Everything that touches the monitored page: the HTTP fetcher and the
//! heuristic extractor that picks the latest news link out of the markup.

pub mod extract;
pub mod fetch;

pub use extract::MimExtractor;
pub use fetch::PageFetcher;
