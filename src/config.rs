use std::{fmt::Display, str::FromStr};

use anyhow::anyhow;
use tracing::info;

pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
}

impl Config {
    /// Reads the environment, after pulling in a `.env` file if one exists.
    pub fn load() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        Ok(Self {
            database_url: try_load("DATABASE_URL", "sqlite://tweethub.db?mode=rwc")?,
            port: try_load("PORT", "3000")?,
            db_max_connections: try_load("DB_MAX_CONNECTIONS", "16")?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> anyhow::Result<T>
where
    T::Err: Display,
{
    dotenv::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| anyhow!("invalid {key} value: {e}"))
}
