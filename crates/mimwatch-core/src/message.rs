use serde::{Deserialize, Serialize};

/// A news item found on the monitored page.
///
/// Identity is the trimmed site-relative link (`key`). Titles on the page get
/// edited, so two items with the same key are the same item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    title: String,
    url: String,
    key: String,
}

impl NewsItem {
    /// Build an item from the link text, its absolute URL and the raw `href`.
    pub fn new(title: impl Into<String>, url: impl Into<String>, raw_href: &str) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            key: raw_href.trim().to_string(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Absolute URL of the item.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Site-relative identifier used for deduplication.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for NewsItem {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for NewsItem {}

/// One entry of an inbound batch from the transport.
///
/// Every update carries a strictly increasing `id`; updates that are not text
/// messages (edits, joins, callbacks) have `message == None` but still move
/// the cursor.
#[derive(Debug, Clone)]
pub struct Update {
    pub id: i64,
    pub message: Option<IncomingMessage>,
}

/// An incoming chat message.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Chat the message came from; replies go back here.
    pub chat_id: i64,
    /// Message text, empty for non-text messages.
    pub text: String,
    /// Human-readable sender name, when the transport knows it.
    pub sender_name: Option<String>,
}

/// Markup mode of an outgoing text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    #[default]
    Html,
    Plain,
}

/// An outgoing message to a single chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub chat_id: i64,
    pub text: String,
    pub parse_mode: ParseMode,
    pub disable_preview: bool,
}

impl OutgoingMessage {
    /// HTML message with link previews enabled.
    pub fn html(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: ParseMode::Html,
            disable_preview: false,
        }
    }

    pub fn without_preview(mut self) -> Self {
        self.disable_preview = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_item_key_is_trimmed() {
        let item = NewsItem::new("Avviso", "https://x/news/a", "  /news/a \n");
        assert_eq!(item.key(), "/news/a");
        assert_eq!(item.url(), "https://x/news/a");
    }

    #[test]
    fn test_news_item_identity_ignores_title() {
        let a = NewsItem::new("Avviso 1", "https://x/news/a", "/news/a");
        let b = NewsItem::new("Avviso 1 (rettifica)", "https://x/news/a", "/news/a");
        let c = NewsItem::new("Avviso 1", "https://x/news/b", "/news/b");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_outgoing_builder() {
        let msg = OutgoingMessage::html(42, "<b>hi</b>");
        assert_eq!(msg.parse_mode, ParseMode::Html);
        assert!(!msg.disable_preview);
        assert!(msg.without_preview().disable_preview);
    }
}
