//! In-memory document store.
//!
//! Collections are `RwLock<HashMap>`s; unique-index checks happen inside the
//! write lock, so two racing duplicate inserts cannot both succeed.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use labelbase_audit::{ActivityRecord, ActivityStore, AppendError};
use labelbase_auth::{AdminUser, PermissionRecord};
use labelbase_catalog::{Category, Ingredient, PackageSize, Product, ProductReview};
use labelbase_core::DocumentId;

use crate::traits::{
    AdminUserStore, CategoryStore, IngredientStore, PackageSizeStore, PermissionStore,
    ProductReviewStore, ProductStore,
};
use crate::StoreError;

const POISONED: &str = "store lock poisoned";

#[derive(Default)]
pub struct MemoryBackend {
    admin_users: RwLock<HashMap<DocumentId, AdminUser>>,
    permissions: RwLock<HashMap<DocumentId, PermissionRecord>>,
    categories: RwLock<HashMap<DocumentId, Category>>,
    ingredients: RwLock<HashMap<DocumentId, Ingredient>>,
    package_sizes: RwLock<HashMap<DocumentId, PackageSize>>,
    products: RwLock<HashMap<DocumentId, Product>>,
    product_reviews: RwLock<HashMap<DocumentId, ProductReview>>,
    activities: RwLock<Vec<ActivityRecord>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed immutable reference data (the permission collection).
    pub fn with_permissions(seed: Vec<PermissionRecord>) -> Result<Self, StoreError> {
        let backend = Self::new();
        {
            let mut permissions = backend
                .permissions
                .write()
                .map_err(|_| StoreError::Unavailable(POISONED.to_string()))?;
            for record in seed {
                if permissions.values().any(|p| p.title == record.title) {
                    return Err(StoreError::duplicate("permissions", "title"));
                }
                permissions.insert(record.id, record);
            }
        }
        Ok(backend)
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<std::sync::RwLockReadGuard<'_, T>, StoreError> {
    lock.read()
        .map_err(|_| StoreError::Unavailable(POISONED.to_string()))
}

fn write<T>(lock: &RwLock<T>) -> Result<std::sync::RwLockWriteGuard<'_, T>, StoreError> {
    lock.write()
        .map_err(|_| StoreError::Unavailable(POISONED.to_string()))
}

#[async_trait]
impl AdminUserStore for MemoryBackend {
    async fn insert(&self, user: AdminUser) -> Result<AdminUser, StoreError> {
        let mut users = write(&self.admin_users)?;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::duplicate("admin_users", "email"));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<AdminUser>, StoreError> {
        Ok(read(&self.admin_users)?.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, StoreError> {
        Ok(read(&self.admin_users)?
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl PermissionStore for MemoryBackend {
    async fn get_many(&self, ids: &[DocumentId]) -> Result<Vec<PermissionRecord>, StoreError> {
        let permissions = read(&self.permissions)?;
        Ok(ids
            .iter()
            .filter_map(|id| permissions.get(id).cloned())
            .collect())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<PermissionRecord>, StoreError> {
        Ok(read(&self.permissions)?
            .values()
            .find(|p| p.title == title)
            .cloned())
    }

    async fn all(&self) -> Result<Vec<PermissionRecord>, StoreError> {
        let mut all: Vec<_> = read(&self.permissions)?.values().cloned().collect();
        all.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(all)
    }
}

#[async_trait]
impl CategoryStore for MemoryBackend {
    async fn insert(&self, category: Category) -> Result<Category, StoreError> {
        let mut categories = write(&self.categories)?;
        if categories.values().any(|c| c.name == category.name) {
            return Err(StoreError::duplicate("categories", "name"));
        }
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Category>, StoreError> {
        Ok(read(&self.categories)?.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, StoreError> {
        Ok(read(&self.categories)?
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let mut all: Vec<_> = read(&self.categories)?.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}

#[async_trait]
impl IngredientStore for MemoryBackend {
    async fn insert(&self, ingredient: Ingredient) -> Result<Ingredient, StoreError> {
        let mut ingredients = write(&self.ingredients)?;
        if ingredients.values().any(|i| i.name == ingredient.name) {
            return Err(StoreError::duplicate("ingredients", "name"));
        }
        ingredients.insert(ingredient.id, ingredient.clone());
        Ok(ingredient)
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Ingredient>, StoreError> {
        Ok(read(&self.ingredients)?.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Ingredient>, StoreError> {
        Ok(read(&self.ingredients)?
            .values()
            .find(|i| i.name == name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Ingredient>, StoreError> {
        let mut all: Vec<_> = read(&self.ingredients)?.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}

#[async_trait]
impl PackageSizeStore for MemoryBackend {
    async fn insert(&self, package_size: PackageSize) -> Result<PackageSize, StoreError> {
        write(&self.package_sizes)?.insert(package_size.id, package_size.clone());
        Ok(package_size)
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<PackageSize>, StoreError> {
        Ok(read(&self.package_sizes)?.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<PackageSize>, StoreError> {
        let mut all: Vec<_> = read(&self.package_sizes)?.values().cloned().collect();
        all.sort_by(|a, b| a.size_name.cmp(&b.size_name));
        Ok(all)
    }
}

#[async_trait]
impl ProductStore for MemoryBackend {
    async fn insert(&self, product: Product) -> Result<Product, StoreError> {
        let mut products = write(&self.products)?;
        if let Some(barcode) = &product.barcode {
            if products
                .values()
                .any(|p| p.barcode.as_deref() == Some(barcode.as_str()))
            {
                return Err(StoreError::duplicate("products", "barcode"));
            }
        }
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let mut all: Vec<_> = read(&self.products)?.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(all)
    }
}

#[async_trait]
impl ProductReviewStore for MemoryBackend {
    async fn insert(&self, review: ProductReview) -> Result<ProductReview, StoreError> {
        let mut reviews = write(&self.product_reviews)?;
        if reviews.values().any(|r| r.product_id == review.product_id) {
            return Err(StoreError::duplicate("product_reviews", "product_id"));
        }
        reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn find_by_product(
        &self,
        product_id: DocumentId,
    ) -> Result<Option<ProductReview>, StoreError> {
        Ok(read(&self.product_reviews)?
            .values()
            .find(|r| r.product_id == product_id)
            .cloned())
    }
}

#[async_trait]
impl ActivityStore for MemoryBackend {
    async fn append(&self, record: ActivityRecord) -> Result<ActivityRecord, AppendError> {
        self.activities
            .write()
            .map_err(|_| AppendError(POISONED.to_string()))?
            .push(record.clone());
        Ok(record)
    }

    async fn list_by_user(
        &self,
        user_id: DocumentId,
    ) -> Result<Vec<ActivityRecord>, AppendError> {
        let activities = self
            .activities
            .read()
            .map_err(|_| AppendError(POISONED.to_string()))?;
        let mut out: Vec<_> = activities
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(out)
    }
}
