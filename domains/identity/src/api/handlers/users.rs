//! User handlers
//!
//! - GET /users/{user_id} - Public profile
//! - PUT /users - Change the caller's password

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tollgate_auth::{Auth, Principal};
use tollgate_common::{Result, ValidatedJson};
use validator::Validate;

use crate::api::middleware::IdentityState;
use crate::domain::entities::UserProfile;
use crate::domain::validation::validate_new_password;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub old_password: String,

    #[validate(custom(
        function = "validate_new_password",
        message = "New password must be at least 8 characters and contain a digit and an uppercase letter"
    ))]
    pub new_password: String,
}

/// **GET /users/{user_id}**
pub async fn get_user(
    State(state): State<IdentityState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserProfile>> {
    Ok(Json(state.service.get_user(user_id).await?))
}

/// **PUT /users**
pub async fn change_password(
    Auth(principal): Auth<Principal>,
    State(state): State<IdentityState>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<StatusCode> {
    state
        .service
        .change_credential(principal.id, &request.old_password, &request.new_password)
        .await?;

    Ok(StatusCode::OK)
}
