//! Inbound event parsing.
//!
//! Inline queries and callback payloads arrive as raw text. These parsers
//! turn them into tagged variants so handlers dispatch on a `match` instead
//! of re-splitting strings at each call site.

use crate::domain::WhisperId;

/// A parsed inline query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InlineCommand {
    /// `wspr <target> <body>` — compose a whisper.
    Whisper {
        target: Option<String>,
        body: Option<String>,
    },
    /// `msg <target>` — look up a profile.
    Info { target: Option<String> },
    /// Anything else, including the empty query.
    Unrecognized,
}

/// A parsed callback button payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackAction {
    Reveal(WhisperId),
    Delete(WhisperId),
}

pub fn parse_inline_query(query: &str) -> InlineCommand {
    let (keyword, rest) = split_first_word(query);
    match keyword {
        "wspr" => {
            let (target, body) = split_first_word(rest);
            InlineCommand::Whisper {
                target: non_empty(target),
                body: non_empty(body),
            }
        }
        // The info form takes the whole remainder as the target, spaces and
        // all; an over-long target simply fails to resolve.
        "msg" => InlineCommand::Info {
            target: non_empty(rest.trim_end()),
        },
        _ => InlineCommand::Unrecognized,
    }
}

/// Parses `show_<id>` / `del_<id>` payloads. Anything else is `None`.
pub fn parse_callback_data(data: &str) -> Option<CallbackAction> {
    if let Some(raw) = data.strip_prefix("show_") {
        return parse_id(raw).map(CallbackAction::Reveal);
    }
    if let Some(raw) = data.strip_prefix("del_") {
        return parse_id(raw).map(CallbackAction::Delete);
    }
    None
}

/// Callback token bound to the reveal action for `id`.
pub fn reveal_token(id: WhisperId) -> String {
    format!("show_{id}")
}

/// Callback token bound to the delete action for `id`.
pub fn delete_token(id: WhisperId) -> String {
    format!("del_{id}")
}

fn parse_id(raw: &str) -> Option<WhisperId> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>().ok().map(WhisperId)
}

fn split_first_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
