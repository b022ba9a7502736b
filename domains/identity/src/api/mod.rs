//! API layer for the Identity domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::IdentityState;
pub use routes::routes;
