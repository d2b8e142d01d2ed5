//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::secret::SecretString;

/// Default scheme in `Authorization: tma <initData>`
pub const DEFAULT_AUTH_SCHEME: &str = "tma";

/// Default freshness window for `initData` (5 minutes)
pub const DEFAULT_INIT_DATA_MAX_AGE: Duration = Duration::from_secs(300);

/// Auth application configuration
///
/// Loaded once at startup and shared behind an `Arc`. `Debug` never prints
/// the bot token.
#[derive(Debug)]
pub struct AuthConfig {
    /// Telegram bot token, the shared secret for `initData` signatures
    pub bot_token: SecretString,
    /// Maximum accepted age of `initData`
    pub init_data_max_age: Duration,
    /// Authorization header scheme
    pub auth_scheme: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl AuthConfig {
    pub fn new(bot_token: impl Into<SecretString>) -> Self {
        Self {
            bot_token: bot_token.into(),
            init_data_max_age: DEFAULT_INIT_DATA_MAX_AGE,
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
        }
    }

    pub fn with_init_data_max_age(mut self, max_age: Duration) -> Self {
        self.init_data_max_age = max_age;
        self
    }

    pub fn with_auth_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.auth_scheme = scheme.into();
        self
    }

    /// Get freshness window in seconds
    pub fn init_data_max_age_secs(&self) -> i64 {
        i64::try_from(self.init_data_max_age.as_secs()).unwrap_or(i64::MAX)
    }
}
