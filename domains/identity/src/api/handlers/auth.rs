//! Token issuance handlers
//!
//! - POST /auth/signup - Register and receive a bearer token
//! - POST /auth/signin - Authenticate and receive a bearer token

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tollgate_auth::bearer;
use tollgate_common::{Result, ValidatedJson};
use validator::Validate;

use crate::api::middleware::IdentityState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,

    /// Role name, matched case-insensitively
    #[validate(length(min = 1))]
    pub user_role: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Scheme-prefixed token, ready for the `Authorization` header
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub bearer_token: String,
}

impl TokenResponse {
    fn new(token: &str) -> Self {
        Self {
            bearer_token: bearer(token),
        }
    }
}

/// **POST /auth/signup**
pub async fn signup(
    State(state): State<IdentityState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<Json<TokenResponse>> {
    let token = state
        .service
        .signup(&request.email, &request.password, &request.user_role)
        .await?;

    Ok(Json(TokenResponse::new(&token)))
}

/// **POST /auth/signin**
pub async fn signin(
    State(state): State<IdentityState>,
    ValidatedJson(request): ValidatedJson<SigninRequest>,
) -> Result<Json<TokenResponse>> {
    let token = state
        .service
        .signin(&request.email, &request.password)
        .await?;

    Ok(Json(TokenResponse::new(&token)))
}
