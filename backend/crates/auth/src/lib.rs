//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - initData verifier, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Telegram Mini App `initData` verification (HMAC-SHA256, replay window)
//! - `Authorization: tma <initData>` middleware for protected routes
//! - Explicit user registration via `POST /api/auth/init`
//!
//! ## Security Model
//! - Signatures compared in constant time
//! - Bot token held in a zeroized, redacted `SecretString`
//! - Every authentication failure is the same 401; the reason is only logged
//! - The middleware never creates users

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::verify_init_data::InitDataVerifier;
pub use domain::services::{InitDataError, RejectReason, sign_init_data};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::middleware::{AuthenticatedUser, CurrentUser, require_tma_auth};
pub use presentation::router::{auth_router, with_tma_auth};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgUserRepository as UserStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
