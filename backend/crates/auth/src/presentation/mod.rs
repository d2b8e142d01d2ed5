//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AuthenticatedUser, CurrentUser, TmaAuthState, require_tma_auth};
pub use router::{auth_router, auth_router_generic, with_tma_auth};
