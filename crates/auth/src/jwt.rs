//! Bearer token signing, verification and header parsing
//!
//! Tokens are HS256 JWTs. The secret is decoded once in [`TokenCodec::new`];
//! after that the codec is immutable and shared across requests.

use std::collections::HashMap;

use axum::http::HeaderValue;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use crate::claims::{TokenClaims, VerifiedClaims};
use crate::config::AuthConfig;
use crate::types::Role;

/// Scheme literal expected in the `Authorization` header
pub const BEARER_PREFIX: &str = "Bearer ";

/// Minimum decoded secret length (256 bits)
pub const MIN_SECRET_BYTES: usize = 32;

/// Codec construction failures, raised at startup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecInitError {
    #[error("JWT secret key is missing")]
    MissingSecret,

    #[error("JWT secret key is not valid base64: {0}")]
    InvalidEncoding(String),

    #[error("JWT secret key must decode to at least {MIN_SECRET_BYTES} bytes, got {0}")]
    SecretTooShort(usize),

    #[error("Token TTL must be positive")]
    NonPositiveTtl,

    #[error("Token TTL puts expiry outside the representable date range")]
    TtlOutOfRange,
}

/// Token parse and verification failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Not Found Token")]
    MissingCredential,

    #[error("Token has expired")]
    Expired,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature or claims are invalid")]
    InvalidSignatureOrClaims,

    #[error("Unexpected token failure: {0}")]
    Unexpected(String),
}

/// Stateless signer/verifier for bearer tokens
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Decode the configured secret and build the codec
    pub fn new(config: &AuthConfig) -> Result<Self, CodecInitError> {
        let encoded = config.secret_key_b64.trim();
        if encoded.is_empty() {
            return Err(CodecInitError::MissingSecret);
        }

        let secret = STANDARD
            .decode(encoded)
            .map_err(|e| CodecInitError::InvalidEncoding(e.to_string()))?;
        if secret.len() < MIN_SECRET_BYTES {
            return Err(CodecInitError::SecretTooShort(secret.len()));
        }

        if config.token_ttl <= Duration::zero() {
            return Err(CodecInitError::NonPositiveTtl);
        }
        if Utc::now().checked_add_signed(config.token_ttl).is_none() {
            return Err(CodecInitError::TtlOutOfRange);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            ttl: config.token_ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `id` that expires `ttl` after `now`
    pub fn create(
        &self,
        id: i64,
        email: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            tracing::error!(ttl = %self.ttl, "Token expiry overflows the date range");
            TokenError::Unexpected("token expiry out of range".to_string())
        })?;

        let claims = TokenClaims {
            sub: id.to_string(),
            email: email.to_string(),
            user_role: role.as_str().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "JWT signing failed");
            TokenError::Unexpected(e.to_string())
        })
    }

    /// Verify `token` against the wall clock
    pub fn extract_claims(&self, token: &str) -> Result<VerifiedClaims, TokenError> {
        self.extract_claims_at(token, Utc::now())
    }

    /// Verify `token` as of `now`.
    ///
    /// Signature and structure are checked before expiry, so a corrupted
    /// token is never reported as expired.
    pub fn extract_claims_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifiedClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;

        // Claims are taken as a loose map first: a body that verifies but has the
        // wrong shape is a claims failure, not a structural one.
        let token_data =
            decode::<HashMap<String, serde_json::Value>>(token, &self.decoding_key, &validation)
                .map_err(|e| classify_decode_error(e.kind()))?;

        let raw: TokenClaims = serde_json::from_value(serde_json::Value::Object(
            token_data.claims.into_iter().collect(),
        ))
        .map_err(|e| {
            tracing::debug!(error = %e, "JWT claims have unexpected shape");
            TokenError::InvalidSignatureOrClaims
        })?;

        if raw.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }

        let user_id = raw
            .sub
            .parse::<i64>()
            .map_err(|_| TokenError::InvalidSignatureOrClaims)?;
        let role = raw
            .user_role
            .parse::<Role>()
            .map_err(|_| TokenError::InvalidSignatureOrClaims)?;

        Ok(VerifiedClaims {
            user_id,
            email: raw.email,
            role,
            issued_at: raw.iat,
            expires_at: raw.exp,
        })
    }
}

fn classify_decode_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Utf8(_) | ErrorKind::Json(_) => {
            TokenError::Malformed
        }
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::MissingAlgorithm
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::ImmatureSignature
        | ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::InvalidSubject => TokenError::InvalidSignatureOrClaims,
        other => TokenError::Unexpected(format!("{:?}", other)),
    }
}

/// Prepend the bearer scheme to a compact token
pub fn bearer(token: &str) -> String {
    format!("{}{}", BEARER_PREFIX, token)
}

/// Extract the raw token from an `Authorization` header value.
///
/// Absent, non-UTF-8, empty, or non-bearer headers are all a missing credential.
pub fn strip_scheme(header: Option<&HeaderValue>) -> Result<String, TokenError> {
    let header_str = header
        .and_then(|value| value.to_str().ok())
        .ok_or(TokenError::MissingCredential)?;

    match header_str.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        _ => Err(TokenError::MissingCredential),
    }
}
