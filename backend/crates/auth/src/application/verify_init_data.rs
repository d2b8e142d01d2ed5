//! Verify Init Data
//!
//! Binds the pure domain verifier to configuration and the wall clock.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::domain::services::{InitDataError, verify_init_data};
use crate::domain::value_object::telegram_user::TelegramUser;

/// `initData` verifier bound to the configured bot token and window
#[derive(Debug, Clone)]
pub struct InitDataVerifier {
    config: Arc<AuthConfig>,
}

impl InitDataVerifier {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Verify against the current time
    pub fn verify(&self, init_data: &str) -> Result<TelegramUser, InitDataError> {
        self.verify_at(init_data, Utc::now().timestamp())
    }

    /// Verify against an explicit Unix timestamp
    pub fn verify_at(&self, init_data: &str, now_unix: i64) -> Result<TelegramUser, InitDataError> {
        verify_init_data(
            init_data,
            self.config.bot_token.expose(),
            self.config.init_data_max_age_secs(),
            now_unix,
        )
    }
}
