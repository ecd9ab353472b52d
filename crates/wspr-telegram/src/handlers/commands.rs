//! `/start` and `/help` command handlers.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, Message, ParseMode};

use crate::{principal_from, router::AppState};

pub(super) async fn handle_command(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let from = principal_from(user);
    state.service.observe(&from).await;

    let text = msg.text().unwrap_or_default();
    let command = text.split_whitespace().next().unwrap_or_default();
    // Accept the `/cmd@BotName` form used in groups.
    let command = command.split('@').next().unwrap_or(command);

    match command {
        "/start" => {
            let welcome = format!(
                "👋 Hello, {}!\n\n\
                 I deliver secret messages that only the intended recipient can read.\n\n\
                 <b>How to use me:</b>\n\
                 1. Type <code>@{} wspr @username your message</code> in any chat\n\
                 2. The recipient taps a button to reveal the message\n\
                 3. Only they can read it; only you can delete it\n\n\
                 You can also use <code>@{} msg @username</code> to look up a user.",
                wspr_core::formatting::escape_html(&from.display_name),
                state.bot_username,
                state.bot_username,
            );

            let keyboard = InlineKeyboardMarkup::new(vec![
                vec![InlineKeyboardButton::switch_inline_query_current_chat(
                    "Try a whisper",
                    "wspr ",
                )],
                vec![InlineKeyboardButton::switch_inline_query_current_chat(
                    "User info",
                    "msg ",
                )],
            ]);

            if let Err(e) = bot
                .send_message(msg.chat.id, welcome)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await
            {
                tracing::warn!(error = %e, "failed to send /start reply");
            }
        }
        "/help" => {
            let help = format!(
                "🔒 <b>Whisper bot help</b>\n\n\
                 Send private messages that only the intended recipient can view.\n\n\
                 <b>Inline forms:</b>\n\
                 <code>@{} wspr @username message</code> — send a whisper\n\
                 <code>@{} msg @username</code> — user info\n\n\
                 Only the intended recipient can reveal the message.\n\
                 The sender can delete it at any time.",
                state.bot_username, state.bot_username,
            );

            if let Err(e) = bot
                .send_message(msg.chat.id, help)
                .parse_mode(ParseMode::Html)
                .await
            {
                tracing::warn!(error = %e, "failed to send /help reply");
            }
        }
        _ => {}
    }

    Ok(())
}
