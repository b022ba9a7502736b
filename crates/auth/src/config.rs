//! Authentication configuration

use chrono::Duration;

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Base64-encoded HMAC secret
    pub secret_key_b64: String,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(secret_key_b64: impl Into<String>, token_ttl: Duration) -> Self {
        Self {
            secret_key_b64: secret_key_b64.into(),
            token_ttl,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret_key_b64", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
