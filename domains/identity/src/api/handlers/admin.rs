//! Admin handlers
//!
//! - PATCH /admin/users/{user_id} - Change a user's role

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tollgate_common::{Result, ValidatedJson};
use validator::Validate;

use crate::api::middleware::IdentityState;

#[derive(Debug, Deserialize, Validate)]
pub struct ChangeRoleRequest {
    #[validate(length(min = 1))]
    pub role: String,
}

/// **PATCH /admin/users/{user_id}**
///
/// Reached only by admins; the route is audited.
pub async fn change_user_role(
    State(state): State<IdentityState>,
    Path(user_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<ChangeRoleRequest>,
) -> Result<StatusCode> {
    state.service.change_role(user_id, &request.role).await?;
    Ok(StatusCode::OK)
}
