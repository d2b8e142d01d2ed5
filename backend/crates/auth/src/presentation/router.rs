//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{TmaAuthState, require_tma_auth};

/// Create the Auth router with PostgreSQL repository
///
/// Meant to be nested under `/api`: serves `POST /auth/init` and `GET /me`.
pub fn auth_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    auth_router_generic(Arc::new(repo), Arc::new(config))
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: repo.clone(),
        config: config.clone(),
    };

    let protected = with_tma_auth(
        Router::new().route("/me", get(handlers::current_user)),
        repo,
        config,
    );

    Router::new()
        .route("/auth/init", post(handlers::init_user::<R>))
        .with_state(state)
        .merge(protected)
}

/// Put every route of `router` behind `require_tma_auth`
///
/// Unmatched paths still fall through to 404 instead of 401.
pub fn with_tma_auth<R>(router: Router, repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = TmaAuthState { repo, config };
    router.route_layer(middleware::from_fn_with_state(state, require_tma_auth::<R>))
}
