use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use labelbase_core::DocumentId;

/// Which role path a product list went through.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductViewScope {
    SuperAdmin,
    AdminManager,
}

/// The closed set of auditable activities, each with a structured payload.
///
/// The tag (`activity_type`), human description, and metadata bag stored on
/// the record are all derived from the kind, so callers cannot produce
/// inconsistent records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    CategoryView { count: usize },
    CategoryCreate { category_id: DocumentId, category_name: String },
    IngredientView { count: usize },
    IngredientCreate { ingredient_id: DocumentId, ingredient_name: String },
    PackageSizeView { count: usize },
    PackageSizeCreate { package_size_id: DocumentId, size_name: String },
    ProductView { count: usize, scope: ProductViewScope },
    ProductCreate { product_id: DocumentId, product_name: String },
}

impl ActivityKind {
    /// Classification tag stored on the record.
    pub fn activity_type(&self) -> &'static str {
        match self {
            ActivityKind::CategoryView { .. } => "CATEGORY_VIEW",
            ActivityKind::CategoryCreate { .. } => "CATEGORY_CREATE",
            ActivityKind::IngredientView { .. } => "INGREDIENT_VIEW",
            ActivityKind::IngredientCreate { .. } => "INGREDIENT_CREATE",
            ActivityKind::PackageSizeView { .. } => "PACKAGE_SIZE_VIEW",
            ActivityKind::PackageSizeCreate { .. } => "PACKAGE_SIZE_CREATE",
            ActivityKind::ProductView { .. } => "PRODUCT_VIEW",
            ActivityKind::ProductCreate { .. } => "PRODUCT_CREATE",
        }
    }

    /// Human-readable description stored on the record.
    pub fn description(&self) -> String {
        match self {
            ActivityKind::CategoryView { .. } => "Viewed all categories".to_string(),
            ActivityKind::CategoryCreate { category_name, .. } => {
                format!("Created category: {category_name}")
            }
            ActivityKind::IngredientView { .. } => "Viewed all ingredients".to_string(),
            ActivityKind::IngredientCreate { ingredient_name, .. } => {
                format!("Created ingredient: {ingredient_name}")
            }
            ActivityKind::PackageSizeView { .. } => "Viewed all package sizes".to_string(),
            ActivityKind::PackageSizeCreate { size_name, .. } => {
                format!("Created package size: {size_name}")
            }
            ActivityKind::ProductView { scope, .. } => match scope {
                ProductViewScope::SuperAdmin => "Viewed all products (Super Admin)".to_string(),
                ProductViewScope::AdminManager => {
                    "Viewed all products (Admin/Manager)".to_string()
                }
            },
            ActivityKind::ProductCreate { product_name, .. } => {
                format!("Created product: {product_name}")
            }
        }
    }

    /// Structured metadata stored on the record.
    pub fn metadata(&self) -> Value {
        match self {
            ActivityKind::CategoryView { count }
            | ActivityKind::IngredientView { count }
            | ActivityKind::PackageSizeView { count }
            | ActivityKind::ProductView { count, .. } => json!({ "count": count }),
            ActivityKind::CategoryCreate { category_id, category_name } => {
                json!({ "categoryId": category_id, "categoryName": category_name })
            }
            ActivityKind::IngredientCreate { ingredient_id, ingredient_name } => {
                json!({ "ingredientId": ingredient_id, "ingredientName": ingredient_name })
            }
            ActivityKind::PackageSizeCreate { package_size_id, size_name } => {
                json!({ "packageSizeId": package_size_id, "sizeName": size_name })
            }
            ActivityKind::ProductCreate { product_id, product_name } => {
                json!({ "productId": product_id, "productName": product_name })
            }
        }
    }
}

/// Request client fingerprint attached to audit records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClientInfo {
    pub ip_address: String,
    pub user_agent: String,
}

/// An immutable audit record. Write-once: never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: DocumentId,
    pub user_id: DocumentId,
    pub activity_type: String,
    pub description: String,
    pub metadata: Value,
    pub ip_address: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
}

impl ActivityRecord {
    pub fn new(user_id: DocumentId, kind: &ActivityKind, client: ClientInfo) -> Self {
        Self {
            id: DocumentId::new(),
            user_id,
            activity_type: kind.activity_type().to_string(),
            description: kind.description(),
            metadata: kind.metadata(),
            ip_address: client.ip_address,
            user_agent: client.user_agent,
            created_at: Utc::now(),
        }
    }
}
