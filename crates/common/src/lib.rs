//! Shared utilities, configuration, and error handling for Tollgate
//!
//! This crate provides common functionality used across the Tollgate application:
//! - Configuration management following 12-factor principles
//! - Error types and the `{status, code, message}` error boundary
//! - Password hashing
//! - Validated request extractors

pub mod config;
pub mod crypto;
pub mod error;
pub mod extractors;

pub use crypto::{Argon2PasswordEncoder, PasswordEncoder};
pub use error::{error_response, status_name, Error, ErrorPayload, Result};
pub use extractors::ValidatedJson;
