//! JWT claims types

use serde::{Deserialize, Serialize};

use crate::types::Role;

/// Raw claims as signed into every bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (stringified user ID)
    pub sub: String,
    /// Email
    pub email: String,
    /// Role enum name
    #[serde(rename = "userRole")]
    pub user_role: String,
    /// Issued at
    pub iat: i64,
    /// Expires at
    pub exp: i64,
}

/// Claims after signature, expiry and shape checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedClaims {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
    pub issued_at: i64,
    pub expires_at: i64,
}
