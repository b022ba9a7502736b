//! Audit logging for admin-sensitive operations
//!
//! Audit only: enforcement belongs to the filter and `require_admin`. The
//! decorator records before the wrapped call runs and hands back the call's
//! output untouched, errors included.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};

use crate::context::IdentityContext;

/// Operations that require ADMIN and are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminOperation {
    ChangeUserRole,
}

impl AdminOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminOperation::ChangeUserRole => "change_user_role",
        }
    }
}

/// One audited admin invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub operation: AdminOperation,
    /// `None` when no identity was attached
    pub user_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub path: String,
}

/// Destination for audit records
pub trait AuditSink: Send + Sync {
    fn record(&self, record: &AuditRecord);
}

/// Writes audit records to the `tracing` log
#[derive(Debug, Clone, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    #[mutants::skip] // Only emits a log line
    fn record(&self, record: &AuditRecord) {
        tracing::info!(
            operation = record.operation.as_str(),
            user_id = ?record.user_id,
            timestamp = %record.timestamp.timestamp_millis(),
            path = %record.path,
            "Admin API access"
        );
    }
}

/// Decorator for the registered set of admin-sensitive operations
#[derive(Clone)]
pub struct AdminAudit {
    sink: Arc<dyn AuditSink>,
    operations: Arc<HashSet<AdminOperation>>,
}

impl std::fmt::Debug for AdminAudit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAudit")
            .field("operations", &self.operations)
            .finish_non_exhaustive()
    }
}

impl AdminAudit {
    pub fn new(
        sink: Arc<dyn AuditSink>,
        operations: impl IntoIterator<Item = AdminOperation>,
    ) -> Self {
        Self {
            sink,
            operations: Arc::new(operations.into_iter().collect()),
        }
    }

    /// Audit every known admin operation to the tracing log
    pub fn tracing() -> Self {
        Self::new(
            Arc::new(TracingAuditSink),
            [AdminOperation::ChangeUserRole],
        )
    }

    pub fn is_registered(&self, operation: AdminOperation) -> bool {
        self.operations.contains(&operation)
    }

    /// Record the invocation, then run `call` and return its output as-is
    pub async fn around<F, T>(
        &self,
        operation: AdminOperation,
        identity: Option<&IdentityContext>,
        path: &str,
        call: F,
    ) -> T
    where
        F: Future<Output = T>,
    {
        if self.is_registered(operation) {
            self.sink.record(&AuditRecord {
                operation,
                user_id: identity.map(|identity| identity.user_id),
                timestamp: Utc::now(),
                path: path.to_string(),
            });
        }

        call.await
    }

    /// Middleware state that audits `operation`
    pub fn operation(&self, operation: AdminOperation) -> AuditedOperation {
        AuditedOperation {
            audit: self.clone(),
            operation,
        }
    }
}

/// An [`AdminAudit`] bound to a single route's operation
#[derive(Debug, Clone)]
pub struct AuditedOperation {
    audit: AdminAudit,
    operation: AdminOperation,
}

/// Audit middleware.
///
/// Register per route with
/// `route_layer(from_fn_with_state(audit.operation(op), audit_admin))`.
pub async fn audit_admin(
    State(audited): State<AuditedOperation>,
    request: Request,
    next: Next,
) -> Response {
    let identity = request.extensions().get::<IdentityContext>().cloned();
    let path = request.uri().path().to_owned();

    audited
        .audit
        .around(audited.operation, identity.as_ref(), &path, next.run(request))
        .await
}
