//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tollgate_common::error_response;

use crate::jwt::TokenError;

/// Request rejection raised by the authentication filter.
///
/// The response depends only on the kind; no token or verification detail
/// reaches the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingCredential,
    ExpiredToken,
    MalformedToken,
    InvalidSignatureOrClaims,
    InsufficientRole,
    UnexpectedFailure,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MalformedToken => StatusCode::BAD_REQUEST,
            AuthError::MissingCredential
            | AuthError::ExpiredToken
            | AuthError::InvalidSignatureOrClaims => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientRole => StatusCode::FORBIDDEN,
            AuthError::UnexpectedFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "Authentication required",
            AuthError::ExpiredToken => "Authentication required: token has expired",
            AuthError::MalformedToken => "Authentication required: malformed token",
            AuthError::InvalidSignatureOrClaims => "Authentication required: invalid token",
            AuthError::InsufficientRole => "Access denied",
            AuthError::UnexpectedFailure => "An error occurred while processing the request",
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::MissingCredential => AuthError::MissingCredential,
            TokenError::Expired => AuthError::ExpiredToken,
            TokenError::Malformed => AuthError::MalformedToken,
            TokenError::InvalidSignatureOrClaims => AuthError::InvalidSignatureOrClaims,
            TokenError::Unexpected(_) => AuthError::UnexpectedFailure,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), self.message())
    }
}
