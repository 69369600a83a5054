//! HTML span helpers for Telegram's `parse_mode: HTML`

/// Escape text for inclusion in an HTML-formatted message.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Bold span with escaped content.
pub fn bold(text: &str) -> String {
    format!("<b>{}</b>", escape(text))
}

/// Monospace span with escaped content.
pub fn code(text: &str) -> String {
    format!("<code>{}</code>", escape(text))
}
