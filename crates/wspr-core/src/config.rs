use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

/// Typed configuration for the bot, loaded from the environment (with an
/// optional `.env` file that never overrides already-set variables).
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,

    /// How long a pending whisper stays revealable before the sweeper
    /// removes it.
    pub retention: Duration,

    /// Interval between expiry sweeps.
    pub sweep_interval: Duration,
}

const DEFAULT_RETENTION_DAYS: u64 = 7;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let retention_days = env_u64("WHISPER_RETENTION_DAYS").unwrap_or(DEFAULT_RETENTION_DAYS);
        let retention = Duration::from_secs(retention_days * 24 * 60 * 60);

        let sweep_interval = Duration::from_secs(
            env_u64("SWEEP_INTERVAL_SECS").unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS),
        );

        Ok(Self {
            telegram_bot_token,
            retention,
            sweep_interval,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}
