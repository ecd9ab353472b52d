use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{InlineQuery, InlineQueryResult};

use crate::{principal_from, render, router::AppState};

pub(super) async fn handle_inline_query(
    bot: Bot,
    q: InlineQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let from = principal_from(&q.from);
    let reply = state.service.handle_inline_query(from, &q.query).await;

    let results: Vec<InlineQueryResult> = reply
        .cards
        .iter()
        .enumerate()
        .map(|(idx, card)| render::to_inline_result(idx, card))
        .collect();

    if let Err(e) = bot
        .answer_inline_query(q.id, results)
        .cache_time(reply.cache_time)
        .await
    {
        tracing::warn!(error = %e, "failed to answer inline query");
    }
    Ok(())
}
