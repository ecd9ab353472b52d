//! Typed reply payloads produced by the query service.
//!
//! The core stays transport-agnostic: the adapter crate renders these into
//! concrete Bot API calls (inline result articles, callback answers,
//! message edits).

use crate::formatting::escape_html;

/// A single button on an inline card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Button {
    /// Fires a callback query carrying `data`.
    Callback { label: String, data: String },
    /// Opens a URL or deep link.
    Url { label: String, url: String },
    /// Switches the current chat back into inline-compose mode with a
    /// prefilled query.
    SwitchInline { label: String, query: String },
}

/// One candidate answer card for an inline query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineCard {
    pub title: String,
    pub description: String,
    /// HTML body of the message posted if this card is chosen.
    pub message_html: String,
    /// Keyboard rows attached to the posted message.
    pub buttons: Vec<Vec<Button>>,
}

impl InlineCard {
    /// A plain notice card with no keyboard, posting its own text.
    pub fn notice(title: &str, text: &str) -> Self {
        Self {
            title: title.to_string(),
            description: text.to_string(),
            message_html: escape_html(text),
            buttons: Vec::new(),
        }
    }
}

/// Response to an inline query. Always non-empty: malformed input gets a
/// descriptive card, never silence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineReply {
    pub cards: Vec<InlineCard>,
    /// Transport cache hint, in seconds.
    pub cache_time: u32,
}

/// Response to a button press.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallbackReply {
    /// Toast / alert text shown only to the presser.
    pub text: Option<String>,
    pub show_alert: bool,
    /// Replacement HTML for the originally posted message. The edit is
    /// best-effort; failure is tolerated silently.
    pub edit_to: Option<String>,
}

impl CallbackReply {
    /// A bare acknowledgement with no visible text.
    pub fn ack() -> Self {
        Self::default()
    }

    /// An alert popup with the given text.
    pub fn alert(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            show_alert: true,
            edit_to: None,
        }
    }
}
