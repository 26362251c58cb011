use axum::{Router, routing::get};

pub mod auth;
pub mod category;
pub mod common;
pub mod ingredient;
pub mod package_size;
pub mod product;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/api/auth", auth::router())
        .nest("/api/category", category::router())
        .nest("/api/ingredient", ingredient::router())
        .nest("/api/package-size", package_size::router())
        .nest("/api/product", product::router())
}
