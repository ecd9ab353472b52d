//! Telegram adapter (teloxide).
//!
//! Feeds inbound updates into the `wspr-core` service and renders its typed
//! replies over the Telegram Bot API.

use chrono::Utc;
use teloxide::types::User;

use wspr_core::domain::{Principal, UserId};

pub mod handlers;
pub mod render;
pub mod router;

/// Profile record for the interacting Telegram user.
pub(crate) fn principal_from(user: &User) -> Principal {
    Principal {
        id: UserId(user.id.0 as i64),
        handle: user.username.clone(),
        display_name: user.full_name(),
        last_seen: Utc::now(),
    }
}
