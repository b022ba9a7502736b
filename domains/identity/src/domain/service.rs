//! Identity Issuance Service
//!
//! Registers users, authenticates them against their stored credential and
//! issues bearer tokens. Also owns credential rotation and role changes.

use std::sync::Arc;

use chrono::Utc;
use tollgate_auth::{Role, TokenCodec};
use tollgate_common::{Error, PasswordEncoder, Result};

use crate::domain::entities::{NewUser, User, UserProfile};
use crate::repository::UserDirectory;

/// Business-rule failures of the identity service. All are client errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("Email already exists")]
    DuplicateIdentity,

    #[error("User not registered")]
    UnregisteredIdentity,

    #[error("Wrong password")]
    CredentialMismatch,

    #[error("New password must differ from the current password")]
    WeakOrReusedPassword,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid UserRole")]
    InvalidRole,
}

impl From<IdentityError> for Error {
    fn from(error: IdentityError) -> Self {
        Error::InvalidRequest(error.to_string())
    }
}

#[derive(Clone)]
pub struct IdentityService {
    directory: Arc<dyn UserDirectory>,
    encoder: Arc<dyn PasswordEncoder>,
    codec: Arc<TokenCodec>,
}

impl std::fmt::Debug for IdentityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityService").finish_non_exhaustive()
    }
}

impl IdentityService {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        encoder: Arc<dyn PasswordEncoder>,
        codec: TokenCodec,
    ) -> Self {
        Self {
            directory,
            encoder,
            codec: Arc::new(codec),
        }
    }

    /// Register a user and return a token carrying the requested role.
    ///
    /// The duplicate check runs before any hashing or persistence.
    pub async fn signup(&self, email: &str, raw_password: &str, role_name: &str) -> Result<String> {
        if self.directory.exists_by_email(email).await? {
            tracing::warn!(email = %email, "Signup rejected: email already registered");
            return Err(IdentityError::DuplicateIdentity.into());
        }

        let role: Role = role_name
            .parse()
            .map_err(|_| Error::from(IdentityError::InvalidRole))?;

        let password_hash = self.encoder.encode(raw_password)?;
        let user = self
            .directory
            .insert(NewUser {
                email: email.to_string(),
                password_hash,
                role,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User signed up");

        self.issue(&user)
    }

    /// Authenticate by email and password; the token carries the stored role
    pub async fn signin(&self, email: &str, raw_password: &str) -> Result<String> {
        let user = self
            .directory
            .find_by_email(email)
            .await?
            .ok_or(IdentityError::UnregisteredIdentity)?;

        if !self.encoder.matches(raw_password, &user.password_hash) {
            tracing::warn!(user_id = %user.id, "Signin rejected: credential mismatch");
            return Err(IdentityError::CredentialMismatch.into());
        }

        tracing::info!(user_id = %user.id, "User signed in");

        self.issue(&user)
    }

    /// Replace the stored credential.
    ///
    /// Format rules are checked at the request boundary. Here the new
    /// password must not match the current hash, then the old one must.
    pub async fn change_credential(
        &self,
        user_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let user = self
            .directory
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityError::UserNotFound)?;

        if self.encoder.matches(new_password, &user.password_hash) {
            return Err(IdentityError::WeakOrReusedPassword.into());
        }

        if !self.encoder.matches(old_password, &user.password_hash) {
            tracing::warn!(user_id = %user_id, "Credential change rejected: old password mismatch");
            return Err(IdentityError::CredentialMismatch.into());
        }

        let password_hash = self.encoder.encode(new_password)?;
        if !self.directory.update_password(user_id, &password_hash).await? {
            return Err(IdentityError::UserNotFound.into());
        }

        tracing::info!(user_id = %user_id, "Credential changed");
        Ok(())
    }

    pub async fn get_user(&self, user_id: i64) -> Result<UserProfile> {
        self.directory
            .find_by_id(user_id)
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| IdentityError::UserNotFound.into())
    }

    /// Admin-only: set the role of `user_id`
    pub async fn change_role(&self, user_id: i64, role_name: &str) -> Result<User> {
        let role: Role = role_name
            .parse()
            .map_err(|_| Error::from(IdentityError::InvalidRole))?;

        let user = self
            .directory
            .update_role(user_id, role)
            .await?
            .ok_or(IdentityError::UserNotFound)?;

        tracing::info!(user_id = %user.id, role = %user.role, "User role changed");
        Ok(user)
    }

    fn issue(&self, user: &User) -> Result<String> {
        self.codec
            .create(user.id, &user.email, user.role, Utc::now())
            .map_err(|e| Error::Internal(format!("Failed to issue token: {}", e)))
    }
}
