//! Outbound Bot API calls: `sendMessage` and `setMyCommands`.

use super::types::TgResponse;
use super::TelegramChannel;
use mimwatch_core::{
    error::WatchError,
    message::{OutgoingMessage, ParseMode},
};
use tracing::{info, warn};

impl TelegramChannel {
    /// Send a text message to a specific chat.
    pub(super) async fn send_message(&self, message: &OutgoingMessage) -> Result<(), WatchError> {
        let url = format!("{}/sendMessage", self.base_url);
        let mut body = serde_json::json!({
            "chat_id": message.chat_id,
            "text": message.text,
            "disable_web_page_preview": message.disable_preview,
        });
        if message.parse_mode == ParseMode::Html {
            body["parse_mode"] = serde_json::Value::from("HTML");
        }

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| WatchError::Channel(format!("telegram send failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(WatchError::Channel(format!(
                "telegram send to {} got {status}: {error_text}",
                message.chat_id
            )));
        }

        let parsed: TgResponse<serde_json::Value> = resp
            .json()
            .await
            .map_err(|e| WatchError::Channel(format!("telegram send parse failed: {e}")))?;
        if !parsed.ok {
            return Err(WatchError::Channel(format!(
                "telegram send to {} rejected: {}",
                message.chat_id,
                parsed.description.unwrap_or_default()
            )));
        }

        Ok(())
    }

    /// Register bot commands with Telegram so users see an autocomplete menu.
    /// Best-effort: logs failures but does not propagate errors.
    pub(super) async fn set_commands(&self) {
        let commands = serde_json::json!({
            "commands": [
                { "command": "start", "description": "Iscriviti alle notifiche" },
                { "command": "stop", "description": "Cancella l'iscrizione" },
                { "command": "last", "description": "Mostra l'ultima notizia" },
                { "command": "next", "description": "Quando sarà il prossimo controllo" },
                { "command": "force", "description": "Forza il controllo notizie ora" },
                { "command": "stats", "description": "Statistiche del bot" },
                { "command": "help", "description": "Mostra tutti i comandi" },
            ]
        });

        let url = format!("{}/setMyCommands", self.base_url);
        match self
            .client
            .post(&url)
            .json(&commands)
            .timeout(self.request_timeout)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => {
                info!("registered Telegram bot commands");
            }
            Ok(resp) => {
                let body = resp.text().await.unwrap_or_default();
                warn!("failed to register Telegram bot commands: {body}");
            }
            Err(e) => {
                warn!("failed to register Telegram bot commands: {e}");
            }
        }
    }
}
