//! Async repository traits, one per collection.
//!
//! Implementations own the unique indexes. All reads used for authorization
//! happen per request; nothing here is cached by callers.

use async_trait::async_trait;

use labelbase_auth::{AdminUser, PermissionRecord};
use labelbase_catalog::{Category, Ingredient, PackageSize, Product, ProductReview};
use labelbase_core::DocumentId;

use crate::StoreError;

#[async_trait]
pub trait AdminUserStore: Send + Sync {
    /// Insert a new user. Unique index: `email`.
    async fn insert(&self, user: AdminUser) -> Result<AdminUser, StoreError>;

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<AdminUser>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, StoreError>;
}

#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Resolve permission documents for a user's relation list. Unknown ids
    /// are skipped, not errors.
    async fn get_many(&self, ids: &[DocumentId]) -> Result<Vec<PermissionRecord>, StoreError>;

    async fn find_by_title(&self, title: &str) -> Result<Option<PermissionRecord>, StoreError>;

    async fn all(&self) -> Result<Vec<PermissionRecord>, StoreError>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Insert a new category. Unique index: `name` (already lowercased).
    async fn insert(&self, category: Category) -> Result<Category, StoreError>;

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Category>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, StoreError>;

    /// All categories, sorted by name ascending.
    async fn list(&self) -> Result<Vec<Category>, StoreError>;
}

#[async_trait]
pub trait IngredientStore: Send + Sync {
    /// Insert a new ingredient. Unique index: `name` (already lowercased).
    async fn insert(&self, ingredient: Ingredient) -> Result<Ingredient, StoreError>;

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Ingredient>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Ingredient>, StoreError>;

    /// All ingredients, sorted by name ascending.
    async fn list(&self) -> Result<Vec<Ingredient>, StoreError>;
}

#[async_trait]
pub trait PackageSizeStore: Send + Sync {
    async fn insert(&self, package_size: PackageSize) -> Result<PackageSize, StoreError>;

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<PackageSize>, StoreError>;

    /// All package sizes, sorted by size name ascending.
    async fn list(&self) -> Result<Vec<PackageSize>, StoreError>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new product. Unique index: `barcode` (when present).
    async fn insert(&self, product: Product) -> Result<Product, StoreError>;

    /// All products, newest first.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;
}

#[async_trait]
pub trait ProductReviewStore: Send + Sync {
    /// Insert a review. Unique index: `product_id` (one-to-one with product).
    async fn insert(&self, review: ProductReview) -> Result<ProductReview, StoreError>;

    async fn find_by_product(
        &self,
        product_id: DocumentId,
    ) -> Result<Option<ProductReview>, StoreError>;
}
