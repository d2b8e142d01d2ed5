//! TelegramUser Value Object
//!
//! The identity embedded in the `user` field of `initData`. Only ever
//! constructed after the payload signature has been verified.

use serde::{Deserialize, Serialize};

use super::telegram_id::TelegramId;

/// Verified Telegram identity
///
/// Unknown JSON fields (`language_code`, `is_premium`, `photo_url`, ...) are
/// ignored. `id` and `first_name` are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramUser {
    pub id: TelegramId,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}
