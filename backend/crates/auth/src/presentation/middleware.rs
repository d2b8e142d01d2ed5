//! Auth Middleware
//!
//! `Authorization: tma <initData>` authentication for protected routes.
//!
//! ```text
//! route_layer(from_fn_with_state(state, require_tma_auth::<R>))
//!     -> AuthenticatedUser in request extensions
//!     -> CurrentUser extractor in handlers
//! ```

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::AuthenticateRequestUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct TmaAuthState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// The local user resolved from a verified `initData`
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Middleware that requires valid `initData` bound to a known local user
///
/// Every failure is rendered as the same 401 by `AuthError`.
pub async fn require_tma_auth<R>(
    State(state): State<TmaAuthState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    // Non-UTF-8 values count as missing.
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let use_case = AuthenticateRequestUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.execute(authorization.as_deref()).await?;

    tracing::debug!(user_id = %user.user_id, "Request authenticated");

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

/// Extractor for the authenticated user
///
/// Rejects with `AuthError::NotAuthenticated` if the route is not behind
/// `require_tma_auth`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .map(|AuthenticatedUser(user)| CurrentUser(user.clone()))
            .ok_or(AuthError::NotAuthenticated)
    }
}
