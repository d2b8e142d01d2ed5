//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{InitDataVerifier, InitUserUseCase};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{DataResponse, InitRequest, InitResponse, UserDto};
use crate::presentation::extract::AppJson;
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// POST /api/auth/init
pub async fn init_user<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<InitRequest>,
) -> AuthResult<Json<DataResponse<InitResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let verifier = InitDataVerifier::new(state.config.clone());
    let use_case = InitUserUseCase::new(state.repo.clone(), verifier);

    let user = use_case.execute(&req.init_data).await?;

    Ok(Json(DataResponse::new(InitResponse {
        user: UserDto::from(&user),
    })))
}

/// GET /api/me
pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<DataResponse<UserDto>> {
    Json(DataResponse::new(UserDto::from(&user)))
}
