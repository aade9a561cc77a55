//! Gateway: the main loop connecting the transport, the page source and state.
//!
//! One cooperative loop alternates command polling with the periodic
//! detection cycle. The health endpoint runs beside it as its own task and
//! only reads shared state.

mod broadcast;
mod detection;
mod routing;


pub use detection::DetectionOutcome;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use mimwatch_core::{
    config::{ApiConfig, ScheduleConfig},
    traits::{Channel, Extractor, PageSource, Persistence},
    AppState,
};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// The central gateway that drives detection and command handling.
pub struct Gateway {
    pub(super) channel: Arc<dyn Channel>,
    pub(super) source: Arc<dyn PageSource>,
    pub(super) extractor: Arc<dyn Extractor>,
    pub(super) store: Arc<dyn Persistence>,
    pub(super) state: Arc<AppState>,
    pub(super) schedule: ScheduleConfig,
    pub(super) api_config: ApiConfig,
    /// End of the last scheduled detection cycle.
    last_check: Mutex<Option<DateTime<Utc>>>,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(
        channel: Arc<dyn Channel>,
        source: Arc<dyn PageSource>,
        extractor: Arc<dyn Extractor>,
        store: Arc<dyn Persistence>,
        state: Arc<AppState>,
        schedule: ScheduleConfig,
        api_config: ApiConfig,
    ) -> Self {
        Self {
            channel,
            source,
            extractor,
            store,
            state,
            schedule,
            api_config,
            last_check: Mutex::new(None),
        }
    }

    /// Run the main loop until interrupted.
    pub async fn run(&self) -> anyhow::Result<()> {
        self.run_until(tokio::signal::ctrl_c()).await
    }

    /// Run the main loop until `shutdown` resolves, then flush state.
    pub async fn run_until<F: Future>(&self, shutdown: F) -> anyhow::Result<()> {
        info!(
            "MiM Watcher running | source: {} | channel: {} | check every {}s | poll every {}s | subscribers: {}",
            self.source.url(),
            self.channel.name(),
            self.schedule.news_interval_secs,
            self.schedule.poll_interval_secs,
            self.state.registry.len(),
        );

        self.channel.register_commands().await;

        // Spawn health endpoint.
        let api_handle = if self.api_config.enabled {
            let api_cfg = self.api_config.clone();
            let api_state = self.state.clone();
            Some(tokio::spawn(async move {
                crate::api::serve(api_cfg, api_state).await;
            }))
        } else {
            None
        };

        tokio::pin!(shutdown);

        let mut cursor: Option<i64> = None;

        // Main loop with graceful shutdown.
        loop {
            tokio::select! {
                _ = self.iteration(&mut cursor) => {}
                _ = &mut shutdown => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        self.shutdown(api_handle).await;
        Ok(())
    }

    /// One pass of the loop body followed by its pause.
    pub(super) async fn iteration(&self, cursor: &mut Option<i64>) {
        let pause = match self.tick(cursor).await {
            Ok(()) => self.schedule.poll_interval(),
            Err(e) => {
                error!("unexpected error in main loop: {e:#}");
                self.state.record_error(Utc::now());
                self.persist().await;
                self.schedule.error_backoff()
            }
        };
        tokio::time::sleep(pause).await;
    }

    /// Poll commands, then run detection if it is due.
    ///
    /// A transport failure while polling does not hold back detection; it is
    /// reported once detection has had its turn.
    pub(super) async fn tick(&self, cursor: &mut Option<i64>) -> anyhow::Result<()> {
        let polled = self.poll_commands(cursor).await;

        if self.detection_due(Utc::now()) {
            self.scheduled_detection().await;
        }

        polled.context("polling commands")?;
        Ok(())
    }

    /// Whether the news interval has elapsed since the last scheduled cycle.
    pub(super) fn detection_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_check() {
            None => true,
            Some(last) => (now - last).num_seconds() >= self.schedule.news_interval_secs as i64,
        }
    }

    pub(super) fn last_check(&self) -> Option<DateTime<Utc>> {
        *self
            .last_check
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn mark_checked(&self, at: DateTime<Utc>) {
        *self
            .last_check
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(at);
    }

    /// Save the current state. Failures are logged, never fatal.
    pub(super) async fn persist(&self) {
        let snapshot = self.state.snapshot();
        if let Err(e) = self.store.save(&snapshot).await {
            warn!("failed to persist state: {e}");
        }
    }

    /// Graceful shutdown: flush state, stop the health endpoint.
    async fn shutdown(&self, api_handle: Option<JoinHandle<()>>) {
        self.persist().await;
        if let Some(h) = api_handle {
            h.abort();
        }
        info!("MiM Watcher shut down cleanly");
    }
}
