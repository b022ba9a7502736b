//! Route definitions for the Identity domain API

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post, put},
    Router,
};
use tollgate_auth::{audit_admin, require_admin, AdminOperation};

use super::handlers::{admin, auth, users};
use super::middleware::IdentityState;

/// Token issuance routes; allowlisted by the authentication filter
fn auth_routes() -> Router<IdentityState> {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/signin", post(auth::signin))
}

fn user_routes() -> Router<IdentityState> {
    Router::new()
        .route("/users", put(users::change_password))
        .route("/users/{user_id}", get(users::get_user))
}

/// Admin routes: role re-checked by `require_admin`, then audited
fn admin_routes(state: &IdentityState) -> Router<IdentityState> {
    Router::new()
        .route(
            "/admin/users/{user_id}",
            patch(admin::change_user_role).route_layer(from_fn_with_state(
                state.audit.operation(AdminOperation::ChangeUserRole),
                audit_admin,
            )),
        )
        .route_layer(from_fn(require_admin))
}

/// Create all Identity domain API routes
pub fn routes(state: IdentityState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(admin_routes(&state))
        .with_state(state)
}
