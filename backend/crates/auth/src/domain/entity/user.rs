//! User Entity
//!
//! The local account bound to a Telegram identity. Teams, events and
//! registrations reference users by `user_id`.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    UserId, telegram_id::TelegramId, telegram_user::TelegramUser,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Telegram user ID (unique)
    pub telegram_id: TelegramId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user from a verified Telegram identity
    pub fn new(identity: &TelegramUser) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            telegram_id: identity.id,
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            username: identity.username.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the Telegram profile changed since it was stored
    pub fn profile_differs(&self, identity: &TelegramUser) -> bool {
        self.first_name != identity.first_name
            || self.last_name != identity.last_name
            || self.username != identity.username
    }

    /// Copy name fields from the Telegram profile
    pub fn sync_profile(&mut self, identity: &TelegramUser) {
        self.first_name = identity.first_name.clone();
        self.last_name = identity.last_name.clone();
        self.username = identity.username.clone();
        self.updated_at = Utc::now();
    }
}
