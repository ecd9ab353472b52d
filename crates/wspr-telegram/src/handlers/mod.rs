//! Telegram update handlers.
//!
//! Each endpoint records the interacting user, delegates to the core
//! service, and renders the typed reply it gets back. Outbound calls are
//! best-effort: a failed answer is logged, never propagated into the
//! dispatcher loop.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, InlineQuery, Message};

use crate::router::AppState;

mod callback;
mod commands;
mod inline;

pub async fn handle_inline_query(
    bot: Bot,
    q: InlineQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    inline::handle_inline_query(bot, q, state).await
}

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    callback::handle_callback(bot, q, state).await
}

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    if let Some(text) = msg.text() {
        if text.starts_with('/') {
            return commands::handle_command(bot, msg, state).await;
        }
    }
    Ok(())
}
