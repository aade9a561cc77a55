//! Message delivery: single sends and the subscriber fan-out.

use super::Gateway;
use crate::texts;
use chrono::{Local, Utc};
use mimwatch_core::{message::OutgoingMessage, NewsItem};
use tracing::{info, warn};

impl Gateway {
    /// Best-effort single send. Failures are logged and reported as `false`.
    pub(super) async fn deliver(&self, message: OutgoingMessage) -> bool {
        let chat_id = message.chat_id;
        match self.channel.send(message).await {
            Ok(()) => true,
            Err(e) => {
                warn!("delivery to {chat_id} failed: {e}");
                false
            }
        }
    }

    /// Reply to a chat with an HTML text.
    pub(super) async fn reply(&self, chat_id: i64, text: impl Into<String>) {
        self.deliver(OutgoingMessage::html(chat_id, text)).await;
    }

    /// Send `item` to every current subscriber and return the success count.
    ///
    /// Recipients come from a registry snapshot taken up front. Every
    /// recipient is attempted; counters are updated once for the whole call.
    pub(super) async fn broadcast(&self, item: &NewsItem) -> usize {
        let chats = self.state.registry.list();
        let text = texts::news_notification(item, Local::now().naive_local());

        let mut delivered = 0;
        for chat_id in &chats {
            if self
                .deliver(OutgoingMessage::html(*chat_id, text.clone()))
                .await
            {
                delivered += 1;
            }
        }

        self.state.record_broadcast(delivered, Utc::now());
        info!(
            "broadcast '{}' to {delivered}/{} subscribers",
            item.title(),
            chats.len()
        );
        delivered
    }
}
