//! Request-scoped identity for authenticated callers

use crate::claims::VerifiedClaims;
use crate::types::{Principal, Role};

/// Identity attributes the filter attaches to a request.
///
/// Lives in the request's extensions, so it is dropped with the request on
/// every exit path and never shared between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

impl IdentityContext {
    pub fn new(user_id: i64, email: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            email: email.into(),
            role,
        }
    }

    /// Check if the caller holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Typed principal for handler parameters
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.user_id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

impl From<VerifiedClaims> for IdentityContext {
    fn from(claims: VerifiedClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
        }
    }
}
