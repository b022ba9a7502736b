//! Tollgate application composition root
//!
//! Wires the identity domain behind the authentication filter.

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use chrono::Duration;
use sqlx::PgPool;
use tollgate_auth::{authenticate, AdminAudit, AuthBackend, AuthConfig, CodecInitError, PathPolicy};
use tollgate_common::{config::Config, Argon2PasswordEncoder, PasswordEncoder};
use tollgate_identity::{IdentityService, IdentityState, PgUserDirectory, UserDirectory};

/// Create the main application router backed by Postgres
pub async fn create_app(config: Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let token_ttl = Duration::try_minutes(config.token_ttl_minutes).ok_or_else(|| {
        anyhow::anyhow!(
            "TOKEN_TTL_MINUTES is out of range: {}",
            config.token_ttl_minutes
        )
    })?;
    let auth_config = AuthConfig::new(config.jwt_secret_key.clone(), token_ttl);

    let app = build_router(
        Arc::new(PgUserDirectory::new(pool)),
        Arc::new(Argon2PasswordEncoder::new()),
        &auth_config,
        AdminAudit::tracing(),
    )?;

    Ok(app)
}

/// Assemble the router from its collaborators.
///
/// Every route except `/health` sits behind the authentication filter.
/// Fails if the signing secret is unusable.
pub fn build_router(
    directory: Arc<dyn UserDirectory>,
    encoder: Arc<dyn PasswordEncoder>,
    auth_config: &AuthConfig,
    audit: AdminAudit,
) -> Result<Router, CodecInitError> {
    let backend = AuthBackend::new(auth_config, PathPolicy::default())?;

    let state = IdentityState {
        service: IdentityService::new(directory, encoder, backend.codec().clone()),
        auth: backend.clone(),
        audit,
    };

    let app = tollgate_identity::routes(state)
        .layer(from_fn_with_state(backend, authenticate))
        .route("/health", get(health_check));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
