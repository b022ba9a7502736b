//! Request authentication filter and admin interceptor
//!
//! `authenticate` runs in front of every route:
//!
//! ```text
//! allowlisted path            -> continue, no token parsing
//! bearer token verifies       -> attach IdentityContext, continue
//! admin path, role != ADMIN   -> 403
//! anything else               -> 400 / 401 / 500 by failure kind
//! ```
//!
//! `require_admin` is layered on admin routes only and re-checks the role
//! from the attached identity.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tollgate_common::Error;

use crate::backend::AuthBackend;
use crate::context::IdentityContext;

/// Authentication filter.
///
/// Register with `axum::middleware::from_fn_with_state(backend, authenticate)`.
/// On rejection the response is returned directly and `next` never runs.
pub async fn authenticate(
    State(backend): State<AuthBackend>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();

    if backend.policy().is_allowlisted(&path) {
        tracing::debug!(path = %path, "Allowlisted path, skipping authentication");
        return next.run(request).await;
    }

    let identity = match backend.authenticate(request.headers().get(AUTHORIZATION), &path) {
        Ok(identity) => identity,
        Err(rejection) => return rejection.into_response(),
    };

    tracing::debug!(user_id = %identity.user_id, role = %identity.role, path = %path, "Request authenticated");
    request.extensions_mut().insert(identity);

    next.run(request).await
}

/// Secondary admin check for admin routes.
///
/// Register with `route_layer(axum::middleware::from_fn(require_admin))`
/// behind `authenticate`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, Error> {
    let identity = request
        .extensions()
        .get::<IdentityContext>()
        .ok_or_else(|| Error::InvalidRequest("Invalid UserRole".to_string()))?;

    if !identity.is_admin() {
        tracing::warn!(
            user_id = %identity.user_id,
            role = %identity.role,
            path = %request.uri().path(),
            "Interceptor denied non-admin access"
        );
        return Err(Error::Authorization("Admin privileges required".to_string()));
    }

    tracing::info!(
        user_id = %identity.user_id,
        timestamp = %Utc::now().timestamp_millis(),
        path = %request.uri().path(),
        "Interceptor - admin API access"
    );

    Ok(next.run(request).await)
}
