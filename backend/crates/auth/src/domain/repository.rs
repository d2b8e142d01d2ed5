//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::telegram_id::TelegramId;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    ///
    /// Fails with `AuthError::UserAlreadyExists` when the Telegram ID is
    /// already bound to a user.
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by Telegram ID
    async fn find_by_telegram_id(&self, telegram_id: TelegramId) -> AuthResult<Option<User>>;

    /// Update profile fields
    async fn update(&self, user: &User) -> AuthResult<()>;
}
