//! Init User Use Case
//!
//! Explicit registration step of the Mini App: verify `initData`, then find
//! or create the local user and keep its Telegram profile fields current.
//! This is the only path that creates users.

use std::sync::Arc;

use crate::application::verify_init_data::InitDataVerifier;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::telegram_user::TelegramUser;
use crate::error::{AuthError, AuthResult};

/// Init user use case
pub struct InitUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    verifier: InitDataVerifier,
}

impl<U> InitUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, verifier: InitDataVerifier) -> Self {
        Self {
            user_repo,
            verifier,
        }
    }

    pub async fn execute(&self, init_data: &str) -> AuthResult<User> {
        let identity = self.verifier.verify(init_data)?;
        self.find_or_create(&identity).await
    }

    async fn find_or_create(&self, identity: &TelegramUser) -> AuthResult<User> {
        if let Some(mut user) = self.user_repo.find_by_telegram_id(identity.id).await? {
            if user.profile_differs(identity) {
                user.sync_profile(identity);
                self.user_repo.update(&user).await?;
                tracing::info!(
                    user_id = %user.user_id,
                    telegram_id = %user.telegram_id,
                    "User profile synced from Telegram"
                );
            }
            return Ok(user);
        }

        let user = User::new(identity);
        match self.user_repo.create(&user).await {
            Ok(()) => {
                tracing::info!(
                    user_id = %user.user_id,
                    telegram_id = %user.telegram_id,
                    "User created"
                );
                Ok(user)
            }
            // Lost a race with a concurrent init for the same Telegram ID.
            Err(AuthError::UserAlreadyExists) => self
                .user_repo
                .find_by_telegram_id(identity.id)
                .await?
                .ok_or_else(|| AuthError::Internal("User vanished after conflict".to_string())),
            Err(e) => Err(e),
        }
    }
}
