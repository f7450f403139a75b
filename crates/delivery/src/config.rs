//! Runtime settings, read from the environment (and a `.env` file if present).
//!
//! | Variable | Default | |
//! |---|---|---|
//! | `SHOP_STATUS_POLL_SECS` | 60 | timer period of [`ShopStatusWatcher`](crate::watch::ShopStatusWatcher) |
//! | `ACTOR_BUFFER_SIZE` | 32 | request channel capacity of each collection |
//!
//! Logging is controlled separately through `RUST_LOG`.

use std::{env, fmt::Display, str::FromStr, time::Duration};
use thiserror::Error;
use tracing::{debug, info};

const POLL_SECS_KEY: &str = "SHOP_STATUS_POLL_SECS";
const BUFFER_SIZE_KEY: &str = "ACTOR_BUFFER_SIZE";

const DEFAULT_POLL_SECS: u64 = 60;
const DEFAULT_BUFFER_SIZE: usize = 32;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub shop_status_poll_interval: Duration,
    pub actor_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shop_status_poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            actor_buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let poll_secs: u64 = try_load(&lookup, POLL_SECS_KEY, DEFAULT_POLL_SECS)?;
        let actor_buffer_size: usize = try_load(&lookup, BUFFER_SIZE_KEY, DEFAULT_BUFFER_SIZE)?;

        Ok(Self {
            shop_status_poll_interval: Duration::from_secs(poll_secs),
            actor_buffer_size,
        })
    }
}

/// Parses a positive number, falling back to `default` when the key is unset.
fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };

    let invalid = |reason: String| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason,
    };
    let value: T = raw.trim().parse().map_err(|e: T::Err| invalid(e.to_string()))?;
    if value <= T::default() {
        return Err(invalid("must be greater than zero".to_string()));
    }
    Ok(value)
}
