//! `getUpdates` polling and Channel trait implementation.

use super::types::{TgResponse, TgUpdate};
use super::TelegramChannel;
use async_trait::async_trait;
use mimwatch_core::{
    error::WatchError,
    message::{IncomingMessage, OutgoingMessage, Update},
    traits::Channel,
};
use std::time::Duration;
use tracing::debug;

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn register_commands(&self) {
        self.set_commands().await;
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), WatchError> {
        self.send_message(&message).await
    }

    async fn poll(&self, offset: Option<i64>) -> Result<Vec<Update>, WatchError> {
        let mut url = format!("{}/getUpdates?timeout={}", self.base_url, self.long_poll_secs);
        if let Some(off) = offset {
            url.push_str(&format!("&offset={off}"));
        }

        // The server holds the call open for up to `long_poll_secs`.
        let timeout = self
            .request_timeout
            .max(Duration::from_secs(self.long_poll_secs + 5));

        let resp = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| WatchError::Channel(format!("telegram poll failed: {e}")))?;

        let body: TgResponse<Vec<TgUpdate>> = resp
            .json()
            .await
            .map_err(|e| WatchError::Channel(format!("telegram poll parse failed: {e}")))?;

        if !body.ok {
            return Err(WatchError::Channel(format!(
                "telegram API error: {}",
                body.description.unwrap_or_default()
            )));
        }

        let updates: Vec<Update> = body
            .result
            .unwrap_or_default()
            .into_iter()
            .map(convert_update)
            .collect();

        if !updates.is_empty() {
            debug!("telegram: received {} update(s)", updates.len());
        }
        Ok(updates)
    }
}

fn convert_update(update: TgUpdate) -> Update {
    let message = update.message.map(|msg| {
        let sender_name = msg.from.map(|user| {
            if let Some(un) = user.username {
                format!("@{un}")
            } else if let Some(ln) = user.last_name {
                format!("{} {ln}", user.first_name)
            } else {
                user.first_name
            }
        });

        IncomingMessage {
            chat_id: msg.chat.id,
            text: msg.text.unwrap_or_default().trim().to_string(),
            sender_name,
        }
    });

    Update {
        id: update.update_id,
        message,
    }
}
