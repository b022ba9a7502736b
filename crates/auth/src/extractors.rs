//! Axum extractors that bind the authenticated caller to handler parameters
//!
//! The `Auth<_>` wrapper is the capability marker. A handler asks for the
//! caller with `Auth(principal): Auth<Principal>`; marker and type must be
//! used together, and a mismatch is reported as a configuration error rather
//! than silently ignored.

use std::any::{Any, TypeId};

use axum::{extract::FromRequestParts, http::request::Parts};
use tollgate_common::Error;

use crate::context::IdentityContext;
use crate::types::Principal;

/// Handler parameter pairs the `Auth` marker with a non-`Principal` type, or
/// `Principal` without the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Auth marker and Principal type must be used together")]
pub struct AuthConfigurationError;

impl From<AuthConfigurationError> for Error {
    fn from(error: AuthConfigurationError) -> Self {
        Error::Authentication(error.to_string())
    }
}

/// Shape of a handler parameter as seen by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec {
    pub marked: bool,
    pub type_id: TypeId,
    pub type_name: &'static str,
}

impl ParameterSpec {
    /// Parameter declared as `Auth<T>`
    pub fn marked<T: 'static>() -> Self {
        Self {
            marked: true,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Parameter declared as bare `T`
    pub fn unmarked<T: 'static>() -> Self {
        Self {
            marked: false,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    fn is_principal(&self) -> bool {
        self.type_id == TypeId::of::<Principal>()
    }
}

/// Binds the filter's identity context to `Principal` parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct PrincipalResolver;

impl PrincipalResolver {
    /// True iff the parameter carries the marker and is a `Principal`.
    ///
    /// Exactly one of the two is a configuration error; neither is `false`.
    pub fn supports(&self, parameter: &ParameterSpec) -> Result<bool, AuthConfigurationError> {
        match (parameter.marked, parameter.is_principal()) {
            (true, true) => Ok(true),
            (false, false) => Ok(false),
            _ => {
                tracing::error!(
                    parameter = parameter.type_name,
                    marked = parameter.marked,
                    "Auth marker and Principal type used separately"
                );
                Err(AuthConfigurationError)
            }
        }
    }

    /// Build the principal from the identity the filter attached.
    ///
    /// Does not re-verify anything; without an attached identity the request
    /// never passed the filter and is unauthenticated.
    pub fn resolve(&self, parts: &Parts) -> Result<Principal, Error> {
        parts
            .extensions
            .get::<IdentityContext>()
            .map(IdentityContext::principal)
            .ok_or_else(|| Error::Authentication("Authentication required".to_string()))
    }
}

/// Capability marker for authenticated handler parameters
#[derive(Debug, Clone)]
pub struct Auth<T>(pub T);

impl<S, T> FromRequestParts<S> for Auth<T>
where
    S: Send + Sync,
    T: Send + 'static,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let resolver = PrincipalResolver;
        if !resolver.supports(&ParameterSpec::marked::<T>())? {
            return Err(AuthConfigurationError.into());
        }

        let principal: Box<dyn Any> = Box::new(resolver.resolve(parts)?);
        principal
            .downcast::<T>()
            .map(|value| Auth(*value))
            .map_err(|_| AuthConfigurationError.into())
    }
}

/// A bare `Principal` parameter is missing its marker
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        _parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        PrincipalResolver.supports(&ParameterSpec::unmarked::<Principal>())?;
        Err(AuthConfigurationError.into())
    }
}
