use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use labelbase_core::{DocumentId, DomainError};

/// A per-platform price entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformPrice {
    pub platform: String,
    pub price: f64,
}

/// An ingredient usage within a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientEntry {
    pub ingredient: DocumentId,
    pub ingredient_quantity: String,
}

/// The central catalog entity.
///
/// # Invariants
/// - `barcode` is globally unique when present (storage index is the
///   guarantor; the create handler does not pre-check it).
/// - `product_review` is a zero-or-one reference; reviews are created by an
///   external pipeline, never by this system.
///
/// There is no update or delete path for products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DocumentId,
    pub product_name: String,
    pub brand: String,
    pub product_description: String,
    pub barcode: Option<String>,
    pub category: Vec<DocumentId>,
    pub product_images: Vec<String>,
    pub prices: Vec<PlatformPrice>,
    pub package_size: Option<DocumentId>,
    pub other_available_package_size: Vec<DocumentId>,
    pub ingredients: Vec<IngredientEntry>,
    pub product_review: Option<DocumentId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw product fields as submitted; collections default to empty.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub brand: Option<String>,
    pub product_description: Option<String>,
    pub barcode: Option<String>,
    pub category: Option<Vec<DocumentId>>,
    pub product_images: Option<Vec<String>>,
    pub prices: Option<Vec<PlatformPrice>>,
    pub package_size: Option<DocumentId>,
    pub other_available_package_size: Option<Vec<DocumentId>>,
    pub ingredients: Option<Vec<IngredientEntry>>,
}

impl Product {
    /// Validate a new product. Only the name is mandatory; the name keeps its
    /// submitted casing (products are not case-normalized).
    pub fn new(product_name: &str, draft: ProductDraft) -> Result<Self, DomainError> {
        let product_name = product_name.trim();
        if product_name.is_empty() {
            return Err(DomainError::validation("Product name is required"));
        }

        let now = Utc::now();
        Ok(Self {
            id: DocumentId::new(),
            product_name: product_name.to_string(),
            brand: draft.brand.unwrap_or_default(),
            product_description: draft.product_description.unwrap_or_default(),
            barcode: draft.barcode.filter(|b| !b.trim().is_empty()),
            category: draft.category.unwrap_or_default(),
            product_images: draft.product_images.unwrap_or_default(),
            prices: draft.prices.unwrap_or_default(),
            package_size: draft.package_size,
            other_available_package_size: draft.other_available_package_size.unwrap_or_default(),
            ingredients: draft.ingredients.unwrap_or_default(),
            product_review: None,
            created_at: now,
            updated_at: now,
        })
    }
}
