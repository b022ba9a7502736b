//! Concrete authentication backend
//!
//! Wraps the token codec and path policy and owns the per-request
//! authentication decision used by the filter middleware.

use std::sync::Arc;

use axum::http::HeaderValue;

use crate::config::AuthConfig;
use crate::context::IdentityContext;
use crate::error::AuthError;
use crate::jwt::{strip_scheme, CodecInitError, TokenCodec, TokenError};
use crate::policy::PathPolicy;

/// Concrete authentication backend.
///
/// Cheap to clone; the codec and policy are immutable after startup and
/// shared by every request.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthBackend {
    codec: Arc<TokenCodec>,
    policy: Arc<PathPolicy>,
}

impl AuthBackend {
    /// Build the backend, failing fast on unusable secret material
    pub fn new(config: &AuthConfig, policy: PathPolicy) -> Result<Self, CodecInitError> {
        Ok(Self::from_parts(TokenCodec::new(config)?, policy))
    }

    pub fn from_parts(codec: TokenCodec, policy: PathPolicy) -> Self {
        Self {
            codec: Arc::new(codec),
            policy: Arc::new(policy),
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn policy(&self) -> &PathPolicy {
        &self.policy
    }

    /// Authenticate a non-allowlisted request and enforce the admin prefix.
    ///
    /// Returns the identity to attach to the request, or the single
    /// rejection that ends it.
    pub fn authenticate(
        &self,
        authorization: Option<&HeaderValue>,
        path: &str,
    ) -> Result<IdentityContext, AuthError> {
        let token = strip_scheme(authorization).map_err(|e| {
            tracing::warn!(path = %path, "Authentication failed: missing bearer credential");
            AuthError::from(e)
        })?;

        let claims = self.codec.extract_claims(&token).map_err(|e| {
            match &e {
                TokenError::Expired => {
                    tracing::warn!(path = %path, "Authentication failed: token expired")
                }
                TokenError::Malformed => {
                    tracing::warn!(path = %path, "Authentication failed: malformed token")
                }
                TokenError::Unexpected(detail) => {
                    tracing::error!(path = %path, error = %detail, "Unexpected token verification failure")
                }
                _ => {
                    tracing::warn!(path = %path, "Authentication failed: invalid signature or claims")
                }
            }
            AuthError::from(e)
        })?;

        let identity = IdentityContext::from(claims);

        if self.policy.is_admin_path(path) && !identity.is_admin() {
            tracing::warn!(
                user_id = %identity.user_id,
                role = %identity.role,
                path = %path,
                "Access denied: admin role required"
            );
            return Err(AuthError::InsufficientRole);
        }

        Ok(identity)
    }
}
