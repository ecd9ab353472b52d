//! Telegram HTML helpers.

use crate::domain::Principal;

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Truncate to `max_len` characters, appending an ellipsis when clipped.
pub fn truncate_text(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let mut out = s.chars().take(max_len).collect::<String>();
    out.push_str("...");
    out
}

/// Profile text for the info-lookup card.
pub fn profile_html(p: &Principal) -> String {
    let mut text = format!(
        "<b>Name:</b> <code>{}</code>\n<b>ID:</b> <code>{}</code>\n",
        escape_html(&p.display_name),
        p.id
    );
    match &p.handle {
        Some(handle) => {
            text.push_str(&format!(
                "<b>Username:</b> <code>{}</code>\n",
                escape_html(handle)
            ));
        }
        None => {
            text.push_str(&format!(
                "<b>Mention:</b> <a href=\"tg://user?id={}\">{}</a>\n",
                p.id,
                escape_html(&p.display_name)
            ));
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use chrono::Utc;

    #[test]
    fn escapes_html_specials() {
        assert_eq!(
            escape_html("<b>&\"</b>"),
            "&lt;b&gt;&amp;&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn truncate_adds_ellipsis_only_when_clipped() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("0123456789", 4), "0123...");
    }

    #[test]
    fn profile_html_mentions_handleless_users() {
        let p = Principal {
            id: UserId(5),
            handle: None,
            display_name: "Bob <3".to_string(),
            last_seen: Utc::now(),
        };
        let html = profile_html(&p);
        assert!(html.contains("tg://user?id=5"));
        assert!(html.contains("Bob &lt;3"));
        assert!(!html.contains("Username"));
    }

    #[test]
    fn profile_html_shows_handle() {
        let p = Principal {
            id: UserId(5),
            handle: Some("bob".to_string()),
            display_name: "Bob".to_string(),
            last_seen: Utc::now(),
        };
        assert!(profile_html(&p).contains("<b>Username:</b> <code>bob</code>"));
    }
}
