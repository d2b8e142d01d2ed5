//! Value Object Module

pub mod init_data;
pub mod telegram_id;
pub mod telegram_user;

pub use kernel::id::UserId;
