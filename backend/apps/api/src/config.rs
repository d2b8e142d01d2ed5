//! Server Configuration
//!
//! Read once from the environment (after `.env` is loaded).

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::secret::SecretString;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset and empty values are treated alike
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bot_token = SecretString::from(
            var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN must be set")?,
        );

        let mut auth = AuthConfig::new(bot_token);
        if let Some(secs) = var("INIT_DATA_MAX_AGE_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .context("INIT_DATA_MAX_AGE_SECS must be a non-negative integer")?;
            auth = auth.with_init_data_max_age(Duration::from_secs(secs));
        }

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let frontend_origins: Vec<String> = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();
        if frontend_origins.is_empty() {
            bail!("FRONTEND_ORIGINS must list at least one origin");
        }

        Ok(Self {
            database_url,
            bind_addr,
            frontend_origins,
            auth,
        })
    }
}
