//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate_request;
pub mod config;
pub mod init_user;
pub mod verify_init_data;

// Re-exports
pub use authenticate_request::AuthenticateRequestUseCase;
pub use config::AuthConfig;
pub use init_user::InitUserUseCase;
pub use verify_init_data::InitDataVerifier;
