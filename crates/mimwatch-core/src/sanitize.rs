//! Escaping for text embedded in Telegram HTML messages.

/// Escape `&`, `<` and `>` for Telegram's HTML parse mode.
///
/// `&` is replaced first so the entities produced by the later replacements
/// are not escaped a second time.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
