//! `labelbase-catalog` — catalog domain entities and validation.
//!
//! Flat reference data (categories, ingredients, package sizes) plus the
//! composite product record and its read-only review join target.

pub mod category;
pub mod ingredient;
pub mod package_size;
pub mod product;
pub mod review;

pub use category::Category;
pub use ingredient::{HealthFlag, Ingredient, IngredientDraft};
pub use package_size::PackageSize;
pub use product::{IngredientEntry, PlatformPrice, Product, ProductDraft};
pub use review::{ProductReview, RatingSummary};
