//! Identity domain state and auth backend integration

use axum::extract::FromRef;
use tollgate_auth::{AdminAudit, AuthBackend};

use crate::domain::service::IdentityService;

/// Application state for the Identity domain
#[derive(Debug, Clone)]
pub struct IdentityState {
    pub service: IdentityService,
    pub auth: AuthBackend,
    pub audit: AdminAudit,
}

impl FromRef<IdentityState> for AuthBackend {
    fn from_ref(state: &IdentityState) -> Self {
        state.auth.clone()
    }
}
