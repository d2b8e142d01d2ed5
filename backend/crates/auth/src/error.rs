//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! Every authentication failure leaves the server as the same 401 response.
//! The variant only shows up in logs.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::services::InitDataError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message returned for every authentication failure
const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// `Authorization` header absent or without the expected scheme
    #[error("Missing or invalid Authorization header")]
    MissingCredentials,

    /// `initData` rejected (bad signature, stale, malformed, bad user JSON)
    #[error("Invalid init data")]
    VerificationFailed(#[source] InitDataError),

    /// Valid `initData`, but no local user bound to the Telegram ID yet
    #[error("User not found, call /api/auth/init first")]
    UnknownUser,

    /// Handler reached without an authenticated user in the request
    #[error("User not authenticated")]
    NotAuthenticated,

    /// A user with this Telegram ID already exists
    #[error("User already exists")]
    UserAlreadyExists,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<InitDataError> for AuthError {
    fn from(err: InitDataError) -> Self {
        AuthError::VerificationFailed(err)
    }
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingCredentials
            | AuthError::VerificationFailed(_)
            | AuthError::UnknownUser
            | AuthError::NotAuthenticated => ErrorKind::Unauthorized,
            AuthError::UserAlreadyExists => ErrorKind::Conflict,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Classification used in log records
    pub fn log_reason(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "missing_credentials",
            AuthError::VerificationFailed(_) => "verification_failed",
            AuthError::UnknownUser => "unknown_user",
            AuthError::NotAuthenticated => "not_authenticated",
            AuthError::UserAlreadyExists => "user_already_exists",
            AuthError::Database(_) => "database",
            AuthError::Internal(_) => "internal",
        }
    }

    /// Convert to AppError
    ///
    /// Authentication failures collapse into one message so clients cannot
    /// tell which check failed.
    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            ErrorKind::Unauthorized => AppError::unauthorized(UNAUTHORIZED_MESSAGE),
            ErrorKind::InternalServerError => AppError::internal("Internal server error"),
            kind => AppError::new(kind, self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        let reason = self.log_reason();
        match self {
            AuthError::Database(e) => {
                tracing::error!(reason, error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(reason, message = %msg, "Auth internal error");
            }
            AuthError::VerificationFailed(e) => {
                tracing::warn!(reason, detail = %e.reason(), "Rejected init data");
            }
            AuthError::UnknownUser => {
                tracing::warn!(reason, "Valid init data for unregistered user");
            }
            AuthError::NotAuthenticated => {
                // A protected handler was mounted without the auth middleware.
                tracing::error!(reason, "Handler requires an authenticated user");
            }
            _ => {
                tracing::debug!(reason, error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
