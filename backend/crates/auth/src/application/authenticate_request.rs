//! Authenticate Request Use Case
//!
//! Turns an `Authorization: <scheme> <initData>` header value into the local
//! user. Read-only: never creates users.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::verify_init_data::InitDataVerifier;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Authenticate request use case
pub struct AuthenticateRequestUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
    verifier: InitDataVerifier,
}

impl<U> AuthenticateRequestUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        let verifier = InitDataVerifier::new(config.clone());
        Self {
            user_repo,
            config,
            verifier,
        }
    }

    /// Authenticate using the raw `Authorization` header value, if any
    pub async fn execute(&self, authorization: Option<&str>) -> AuthResult<User> {
        let init_data = authorization
            .and_then(|value| strip_scheme(value, &self.config.auth_scheme))
            .ok_or(AuthError::MissingCredentials)?;

        let identity = self.verifier.verify(init_data)?;

        self.user_repo
            .find_by_telegram_id(identity.id)
            .await?
            .ok_or(AuthError::UnknownUser)
    }
}

/// Strip `"<scheme> "` from a header value (case-sensitive)
fn strip_scheme<'a>(value: &'a str, scheme: &str) -> Option<&'a str> {
    value.strip_prefix(scheme)?.strip_prefix(' ')
}
