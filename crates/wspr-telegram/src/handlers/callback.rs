use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ParseMode};

use crate::{principal_from, router::AppState};

pub(super) async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let from = principal_from(&q.from);
    let data = q.data.clone().unwrap_or_default();
    let reply = state.service.handle_callback(from, &data).await;

    let mut answer = bot.answer_callback_query(q.id.clone());
    if let Some(text) = reply.text {
        answer = answer.text(text).show_alert(reply.show_alert);
    }
    if let Err(e) = answer.await {
        tracing::warn!(error = %e, "failed to answer callback query");
    }

    // Best-effort edit of the posted message (on delete). Whispers are
    // posted via inline results, so the edit usually goes through the
    // inline message id; a message too old to edit is tolerated silently.
    if let Some(new_text) = reply.edit_to {
        if let Some(inline_id) = &q.inline_message_id {
            let _ = bot
                .edit_message_text_inline(inline_id.clone(), new_text)
                .parse_mode(ParseMode::Html)
                .await;
        } else if let Some(msg) = &q.message {
            let _ = bot
                .edit_message_text(msg.chat.id, msg.id, new_text)
                .parse_mode(ParseMode::Html)
                .await;
        }
    }

    Ok(())
}
