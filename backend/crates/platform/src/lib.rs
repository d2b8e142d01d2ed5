//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Cryptographic utilities (HMAC-SHA256, hex, constant-time comparison)
//! - Secret handling (zeroized, never printed)

pub mod crypto;
pub mod secret;
