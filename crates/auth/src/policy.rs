//! Path-based access policy

/// Which paths skip authentication and which require the admin role.
///
/// Prefixes match whole path segments: `/auth` covers `/auth` and
/// `/auth/signin` but not `/authors`.
#[derive(Debug, Clone)]
pub struct PathPolicy {
    allowlist: Vec<String>,
    admin_prefix: String,
}

impl PathPolicy {
    pub fn new<I, S>(allowlist: I, admin_prefix: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowlist: allowlist.into_iter().map(Into::into).collect(),
            admin_prefix: admin_prefix.into(),
        }
    }

    /// Issuance endpoints that bypass the filter entirely
    pub fn is_allowlisted(&self, path: &str) -> bool {
        self.allowlist
            .iter()
            .any(|prefix| matches_prefix(path, prefix))
    }

    /// Paths that require `Role::Admin`
    pub fn is_admin_path(&self, path: &str) -> bool {
        matches_prefix(path, &self.admin_prefix)
    }
}

impl Default for PathPolicy {
    fn default() -> Self {
        Self::new(["/auth"], "/admin")
    }
}

fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
