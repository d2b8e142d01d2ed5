//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the `initData`
//! verification service.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::user::User;
pub use repository::UserRepository;
pub use services::{InitDataError, RejectReason, sign_init_data, verify_init_data};
