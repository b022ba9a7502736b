//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use std::env;

/// Default bearer token lifetime in minutes
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

/// Upper bound on the token lifetime (100 years)
pub const MAX_TOKEN_TTL_MINUTES: i64 = 525_600 * 100;

#[derive(Clone)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,

    /// Base64-encoded symmetric signing secret
    pub jwt_secret_key: String,
    pub token_ttl_minutes: i64,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret_key", &"[REDACTED]")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("rust_log", &self.rust_log)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let token_ttl_minutes = match env::var("TOKEN_TTL_MINUTES") {
            Ok(raw) => parse_token_ttl_minutes(&raw)?,
            Err(_) => DEFAULT_TOKEN_TTL_MINUTES,
        };

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,

            jwt_secret_key: env::var("JWT_SECRET_KEY")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET_KEY is required"))?,
            token_ttl_minutes,

            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "tollgate=debug".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        };

        Ok(config)
    }
}

fn parse_token_ttl_minutes(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|minutes| (1..=MAX_TOKEN_TTL_MINUTES).contains(minutes))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "TOKEN_TTL_MINUTES must be an integer between 1 and {}",
                MAX_TOKEN_TTL_MINUTES
            )
        })
}
