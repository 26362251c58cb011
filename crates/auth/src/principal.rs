use serde::Serialize;

use labelbase_core::DocumentId;

use crate::{PermissionRecord, Role};

/// A fully resolved principal for authorization decisions.
///
/// This is the credential-stripped projection of an admin user: no password
/// hash, no activation flag. It is resolved once per request and never cached
/// across requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Principal {
    pub id: DocumentId,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub permissions: Vec<PermissionRecord>,
}

impl Principal {
    /// Flatten the permission relation to the set of granted names.
    pub fn permission_names(&self) -> Vec<String> {
        self.permissions.iter().map(|p| p.title.clone()).collect()
    }
}
