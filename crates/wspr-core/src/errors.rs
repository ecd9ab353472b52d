/// Core error type for the whisper bot.
///
/// Adapter crates map their specific errors into this type so the core can
/// handle failures consistently. Expected user-facing outcomes (not found,
/// denied, malformed input) are *not* errors; they are modeled as result
/// variants in `store` and `replies`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
