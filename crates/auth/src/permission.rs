use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use labelbase_core::DocumentId;

/// Permission identifier.
///
/// Permissions are modeled as opaque uppercase names (e.g. `CATEGORY_CREATE`).
/// They are reference data: attached to admin users by relation and checked by
/// name at the authorization gate, never computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const CATEGORY_CREATE: Permission = Permission(Cow::Borrowed("CATEGORY_CREATE"));
    pub const INGREDIENT_CREATE: Permission = Permission(Cow::Borrowed("INGREDIENT_CREATE"));
    pub const PACKAGE_SIZE_CREATE: Permission = Permission(Cow::Borrowed("PACKAGE_SIZE_CREATE"));
    pub const PRODUCT_CREATE: Permission = Permission(Cow::Borrowed("PRODUCT_CREATE"));
    pub const PRODUCT_VIEW: Permission = Permission(Cow::Borrowed("PRODUCT_VIEW"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored permission document: named capability plus a human description.
///
/// Globally unique by `title`. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRecord {
    pub id: DocumentId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl PermissionRecord {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new(),
            title: title.into().to_uppercase(),
            description: description.into(),
            created_at: Utc::now(),
        }
    }
}

/// The permissions seeded into a fresh store.
pub fn seed_permissions() -> Vec<PermissionRecord> {
    vec![
        PermissionRecord::new("CATEGORY_CREATE", "Create product categories"),
        PermissionRecord::new("INGREDIENT_CREATE", "Create ingredients"),
        PermissionRecord::new("PACKAGE_SIZE_CREATE", "Create package sizes"),
        PermissionRecord::new("PRODUCT_CREATE", "Create products"),
        PermissionRecord::new("PRODUCT_VIEW", "View the product catalog"),
    ]
}
