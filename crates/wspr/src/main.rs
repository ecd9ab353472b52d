use std::sync::Arc;

use wspr_core::{
    config::Config,
    directory::{InMemoryProfileStore, UserDirectory},
    service::WhisperService,
    store::SecretStore,
};

#[tokio::main]
async fn main() -> Result<(), wspr_core::Error> {
    wspr_core::logging::init("wspr")?;

    let cfg = Arc::new(Config::load()?);

    let profiles = Arc::new(InMemoryProfileStore::default());
    let service = WhisperService::new(UserDirectory::new(profiles), SecretStore::new());

    wspr_telegram::router::run_polling(cfg, service)
        .await
        .map_err(|e| wspr_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
