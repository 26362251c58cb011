//! Request DTOs and response projections.
//!
//! Request bodies tolerate missing fields (defaulted to empty) so validation
//! errors surface as domain messages, not deserialization failures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use labelbase_auth::{AdminUser, Role};
use labelbase_catalog::{
    HealthFlag, IngredientEntry, PackageSize, PlatformPrice, Product, ProductReview,
};
use labelbase_core::DocumentId;
use labelbase_store::{
    CategoryStore, IngredientStore, MemoryBackend, PackageSizeStore, ProductReviewStore,
    StoreError,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub phone_number: Option<String>,
    pub role: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryCreateRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientCreateRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub common_uses: Option<Vec<String>>,
    pub health_flag: Option<HealthFlag>,
    pub health_tags: Option<Vec<String>>,
    pub sources: Option<Vec<String>>,
    pub references: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSizeCreateRequest {
    #[serde(default)]
    pub size_name: String,
    pub size_value: Option<String>,
    pub size_unit: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateRequest {
    #[serde(default)]
    pub product_name: String,
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

/// Public projection of an admin user. The credential hash and permission
/// relation stay server-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: DocumentId,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
}

impl From<&AdminUser> for PublicUser {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryRef {
    pub id: DocumentId,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct IngredientRef {
    pub id: DocumentId,
    pub name: String,
}

/// An ingredient usage with the referenced ingredient's name populated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientEntryView {
    pub ingredient: IngredientRef,
    pub ingredient_quantity: String,
}

/// A product with its references expanded for the list payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: DocumentId,
    pub product_name: String,
    pub brand: String,
    pub product_description: String,
    pub barcode: Option<String>,
    pub category: Vec<CategoryRef>,
    pub product_images: Vec<String>,
    pub prices: Vec<PlatformPrice>,
    pub package_size: Option<PackageSize>,
    pub other_available_package_size: Vec<PackageSize>,
    pub ingredients: Vec<IngredientEntryView>,
    pub product_review: Option<ProductReview>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Expand a stored product's category, package-size, ingredient, and review
/// references.
///
/// Dangling references are dropped rather than failing the whole listing.
pub async fn expand_product(
    db: &MemoryBackend,
    product: Product,
) -> Result<ProductView, StoreError> {
    let mut category = Vec::with_capacity(product.category.len());
    for id in &product.category {
        if let Some(c) = CategoryStore::find_by_id(db, *id).await? {
            category.push(CategoryRef { id: c.id, name: c.name });
        }
    }

    let package_size = match product.package_size {
        Some(id) => PackageSizeStore::find_by_id(db, id).await?,
        None => None,
    };

    let mut other_available_package_size =
        Vec::with_capacity(product.other_available_package_size.len());
    for id in &product.other_available_package_size {
        if let Some(ps) = PackageSizeStore::find_by_id(db, *id).await? {
            other_available_package_size.push(ps);
        }
    }

    let mut ingredients = Vec::with_capacity(product.ingredients.len());
    for entry in &product.ingredients {
        if let Some(i) = IngredientStore::find_by_id(db, entry.ingredient).await? {
            ingredients.push(IngredientEntryView {
                ingredient: IngredientRef { id: i.id, name: i.name },
                ingredient_quantity: entry.ingredient_quantity.clone(),
            });
        }
    }

    let product_review = match product.product_review {
        Some(_) => ProductReviewStore::find_by_product(db, product.id).await?,
        None => None,
    };

    Ok(ProductView {
        id: product.id,
        product_name: product.product_name,
        brand: product.brand,
        product_description: product.product_description,
        barcode: product.barcode,
        category,
        product_images: product.product_images,
        prices: product.prices,
        package_size,
        other_available_package_size,
        ingredients,
        product_review,
        created_at: product.created_at,
        updated_at: product.updated_at,
    })
}
