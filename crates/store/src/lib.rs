//! `labelbase-store` — the document-store boundary.
//!
//! The application treats storage as an opaque document store reached through
//! async repository traits. Unique indexes live here: the pre-checks handlers
//! perform are advisory, the index is the true guarantor.

pub mod database;
pub mod error;
pub mod memory;
pub mod traits;

pub use database::Database;
pub use error::StoreError;
pub use memory::MemoryBackend;
pub use traits::{
    AdminUserStore, CategoryStore, IngredientStore, PackageSizeStore, PermissionStore,
    ProductReviewStore, ProductStore,
};
