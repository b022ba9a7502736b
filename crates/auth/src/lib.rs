//! Authentication and access control for Tollgate
//!
//! Provides bearer token signing and verification, the request
//! authentication filter, the admin interceptor, the `Auth<Principal>`
//! extractor and audit logging for admin-sensitive operations.

mod audit;
mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod jwt;
mod middleware;
mod policy;
mod types;

pub use audit::{
    audit_admin, AdminAudit, AdminOperation, AuditRecord, AuditSink, AuditedOperation,
    TracingAuditSink,
};
pub use backend::AuthBackend;
pub use claims::{TokenClaims, VerifiedClaims};
pub use config::AuthConfig;
pub use context::IdentityContext;
pub use error::AuthError;
pub use extractors::{Auth, AuthConfigurationError, ParameterSpec, PrincipalResolver};
pub use jwt::{bearer, strip_scheme, CodecInitError, TokenCodec, TokenError, BEARER_PREFIX};
pub use middleware::{authenticate, require_admin};
pub use policy::PathPolicy;
pub use types::{InvalidRole, Principal, Role};
