use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a pending whisper. Drawn at random from a large space and
/// collision-checked by the store on registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WhisperId(pub i64);

impl std::fmt::Display for WhisperId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user profile observed by the bot.
///
/// Upserted on every inbound interaction so inline targets typed by other
/// users can be resolved by handle later. Shaped for a document store keyed
/// by `id` with a secondary lookup on `handle`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    pub display_name: String,
    pub last_seen: DateTime<Utc>,
}

impl Principal {
    /// `@handle` when one exists, otherwise a synthesized `user<id>` label.
    pub fn label(&self) -> String {
        match &self.handle {
            Some(h) => format!("@{h}"),
            None => format!("user{}", self.id),
        }
    }

    /// Handle if known, numeric id otherwise. Suitable as the target part of
    /// an inline compose query.
    pub fn handle_or_id(&self) -> String {
        match &self.handle {
            Some(h) => h.clone(),
            None => self.id.to_string(),
        }
    }

    /// Deep link to the user: public `t.me` link for handles, `tg://` link
    /// for handle-less users.
    pub fn deep_link(&self) -> String {
        match &self.handle {
            Some(h) => format!("https://t.me/{h}"),
            None => format!("tg://user?id={}", self.id),
        }
    }
}

/// One undisclosed message.
///
/// Invariant: visible in full only to `recipient`, removable only by
/// `sender`. The `SecretStore` owns all instances.
#[derive(Clone, Debug)]
pub struct PendingSecret {
    pub id: WhisperId,
    pub recipient: UserId,
    pub sender: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
