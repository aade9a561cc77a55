//! Detection cycle: fetch → extract → dedupe → broadcast.

use super::Gateway;
use chrono::Utc;
use mimwatch_core::{error::WatchError, NewsItem};
use tracing::{error, info, warn};

/// Result of one detection cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionOutcome {
    /// A new item was marked seen and broadcast.
    Broadcast { item: NewsItem, delivered: usize },
    /// The latest item on the page was already seen.
    AlreadySeen(NewsItem),
    /// The page had no recognizable news item.
    NothingFound,
}

impl Gateway {
    /// Fetch the page and extract its latest item, without touching state.
    pub(super) async fn fetch_latest(&self) -> Result<Option<NewsItem>, WatchError> {
        let html = self.source.fetch().await?;
        Ok(self.extractor.extract_latest(&html))
    }

    /// Run one detection cycle. Shared by the timer and `/force`.
    ///
    /// The seen check and the insert are a single atomic step, so an item is
    /// broadcast at most once even if two cycles overlap.
    pub(super) async fn detection_cycle(&self) -> Result<DetectionOutcome, WatchError> {
        let Some(item) = self.fetch_latest().await? else {
            warn!("no valid news item found on {}", self.source.url());
            return Ok(DetectionOutcome::NothingFound);
        };

        if !self.state.seen.mark_seen(item.key()) {
            info!("no news, latest already seen: {}", item.title());
            return Ok(DetectionOutcome::AlreadySeen(item));
        }

        info!("new item found: {} ({})", item.title(), item.key());
        let delivered = self.broadcast(&item).await;
        self.persist().await;

        Ok(DetectionOutcome::Broadcast { item, delivered })
    }

    /// Timer-driven cycle. Errors are logged and stamped, never propagated.
    pub(super) async fn scheduled_detection(&self) {
        info!("starting scheduled news check");
        if let Err(e) = self.detection_cycle().await {
            error!("news check failed: {e}");
            self.state.record_error(Utc::now());
            self.persist().await;
        }
        self.mark_checked(Utc::now());
    }
}
