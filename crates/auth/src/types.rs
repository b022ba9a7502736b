//! Role and principal types for auth decisions

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Caller role, ordered by privilege.
///
/// `Ord` follows declaration order, so `User < Admin` and a privilege check
/// is a single comparison.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Enum name as carried in tokens and responses
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// Check whether this role grants at least `required`
    pub fn satisfies(&self, required: Role) -> bool {
        *self >= required
    }

    pub fn is_admin(&self) -> bool {
        self.satisfies(Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role name that matches no `Role` variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid UserRole")]
pub struct InvalidRole;

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("USER") {
            Ok(Role::User)
        } else if s.eq_ignore_ascii_case("ADMIN") {
            Ok(Role::Admin)
        } else {
            Err(InvalidRole)
        }
    }
}

/// The authenticated caller handed to business logic.
///
/// Built per request from validated claims and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: i64,
    pub email: String,
    pub role: Role,
}
