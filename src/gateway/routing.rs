//! Command polling and dispatch, plus the commands that need the page.

use super::{DetectionOutcome, Gateway};
use crate::commands::{self, Command, CommandContext};
use crate::texts;
use chrono::Utc;
use mimwatch_core::{error::WatchError, message::IncomingMessage};
use tracing::{debug, error, info};

impl Gateway {
    /// Pull the next batch of updates and handle them in arrival order.
    ///
    /// The cursor moves past every update, including the ones without a
    /// message, before that update is handled.
    pub(super) async fn poll_commands(&self, cursor: &mut Option<i64>) -> Result<(), WatchError> {
        let updates = self.channel.poll(*cursor).await?;
        for update in updates {
            let next = update.id + 1;
            *cursor = Some(cursor.map_or(next, |c| c.max(next)));

            match update.message {
                Some(message) => self.handle_message(&message).await,
                None => debug!("skipping update {} without message", update.id),
            }
        }
        Ok(())
    }

    /// Route one inbound message. Counted before dispatch.
    pub(super) async fn handle_message(&self, message: &IncomingMessage) {
        let chat_id = message.chat_id;
        let cmd = Command::parse(&message.text);
        self.state.record_command();
        info!(
            "command {cmd:?} from {chat_id} ({})",
            message.sender_name.as_deref().unwrap_or("unknown")
        );

        let last_check = self.last_check();
        let ctx = CommandContext {
            state: &self.state,
            schedule: &self.schedule,
            chat_id,
            now: Utc::now(),
            last_check,
        };

        match cmd {
            Command::Start => {
                let reply = commands::handle_start(&ctx);
                if reply.changed {
                    self.persist().await;
                }
                self.reply(chat_id, reply.text).await;
                if reply.changed {
                    self.send_preview(chat_id).await;
                }
            }
            Command::Stop => {
                let reply = commands::handle_stop(&ctx);
                if reply.changed {
                    self.persist().await;
                }
                self.reply(chat_id, reply.text).await;
            }
            Command::Help => self.reply(chat_id, commands::handle_help(&ctx)).await,
            Command::Next => self.reply(chat_id, commands::handle_next(&ctx)).await,
            Command::Stats => self.reply(chat_id, commands::handle_stats(&ctx)).await,
            Command::Last => self.handle_last(chat_id).await,
            Command::Force => self.handle_force(chat_id).await,
            Command::Unknown(text) => self.reply(chat_id, texts::unknown_command(&text)).await,
        }
    }

    /// Latest item for a new subscriber. Never undoes the subscription.
    async fn send_preview(&self, chat_id: i64) {
        self.reply(chat_id, texts::PREVIEW_SEARCHING).await;
        match self.fetch_latest().await {
            Ok(Some(item)) => {
                self.reply(chat_id, texts::preview(&item)).await;
                info!("preview sent to {chat_id}: {}", item.title());
            }
            Ok(None) => self.reply(chat_id, texts::PREVIEW_EMPTY).await,
            Err(e) => {
                error!("preview for {chat_id} failed: {e}");
                self.reply(chat_id, texts::PREVIEW_FAILED).await;
            }
        }
    }

    /// `/last`: ad-hoc fetch, leaves the seen history alone.
    async fn handle_last(&self, chat_id: i64) {
        self.reply(chat_id, texts::LAST_SEARCHING).await;
        match self.fetch_latest().await {
            Ok(Some(item)) => self.reply(chat_id, texts::last_item(&item)).await,
            Ok(None) => self.reply(chat_id, texts::LAST_NONE).await,
            Err(e) => {
                error!("/last failed: {e}");
                self.reply(chat_id, texts::LAST_FAILED).await;
            }
        }
    }

    /// `/force`: the scheduled cycle, run now. Does not reset the timer.
    async fn handle_force(&self, chat_id: i64) {
        self.reply(chat_id, texts::FORCE_RUNNING).await;
        let text = match self.detection_cycle().await {
            Ok(DetectionOutcome::Broadcast { item, delivered }) => {
                texts::force_broadcast(&item, delivered)
            }
            Ok(DetectionOutcome::AlreadySeen(item)) => texts::force_already_seen(&item),
            Ok(DetectionOutcome::NothingFound) => texts::force_nothing_found(),
            Err(e) => {
                error!("/force failed: {e}");
                self.state.record_error(Utc::now());
                self.persist().await;
                texts::FORCE_FAILED.to_string()
            }
        };
        self.reply(chat_id, text).await;
    }
}
