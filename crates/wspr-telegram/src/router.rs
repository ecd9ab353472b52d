use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use wspr_core::{config::Config, service::WhisperService};

use crate::handlers;

pub struct AppState {
    pub cfg: Arc<Config>,
    pub service: WhisperService,
    pub bot_username: String,
}

pub async fn run_polling(cfg: Arc<Config>, service: WhisperService) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    let bot_username = match bot.get_me().await {
        Ok(me) => me.username().to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "get_me failed; usage text will omit the bot handle");
            String::new()
        }
    };
    tracing::info!(
        bot = %bot_username,
        retention_secs = cfg.retention.as_secs(),
        "whisper bot started"
    );

    // Periodic expiry sweep; the store never holds its lock across the wait.
    let sweeper = service
        .secrets()
        .spawn_sweeper(cfg.sweep_interval, cfg.retention);

    let state = Arc::new(AppState {
        cfg,
        service,
        bot_username,
    });

    let handler = dptree::entry()
        .branch(Update::filter_inline_query().endpoint(handlers::handle_inline_query))
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    sweeper.abort();
    Ok(())
}
