//! Product endpoints.
//!
//! Listing is role-scoped: super admins pass unconditionally, admins and
//! managers must hold `PRODUCT_VIEW`. The audit record tags which path the
//! request went through.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    routing::get,
};

use labelbase_audit::{ActivityKind, ProductViewScope};
use labelbase_auth::{Permission, Requirement, Role};
use labelbase_catalog::{Product, ProductDraft};
use labelbase_core::DomainError;
use labelbase_store::ProductStore;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::identity;

pub fn router() -> Router {
    Router::new().route("/", get(list_products).post(create_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let principal = match common::require_principal(&headers, &services).await {
        Ok(principal) => principal,
        Err(resp) => return resp,
    };

    let scope = match principal.role {
        Role::SuperAdmin => ProductViewScope::SuperAdmin,
        Role::Admin | Role::Manager => {
            let requirement = Requirement::AnyOf(vec![Permission::PRODUCT_VIEW]);
            if let Err(resp) = common::require(&principal, &requirement) {
                return resp;
            }
            ProductViewScope::AdminManager
        }
    };

    let db = match services.db.connect().await {
        Ok(db) => db.clone(),
        Err(err) => return errors::internal("Failed to fetch products", err),
    };
    let products = match ProductStore::list(db.as_ref()).await {
        Ok(products) => products,
        Err(err) => return errors::internal("Failed to fetch products", err),
    };

    let count = products.len();
    let mut items = Vec::with_capacity(count);
    for product in products {
        match dto::expand_product(db.as_ref(), product).await {
            Ok(view) => items.push(view),
            Err(err) => return errors::internal("Failed to fetch products", err),
        }
    }

    services
        .audit
        .record(
            principal.id,
            ActivityKind::ProductView { count, scope },
            identity::client_info(&headers),
        )
        .await;

    errors::ok(items, "Products Fetched Successfully")
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Json(body): Json<dto::ProductCreateRequest>,
) -> axum::response::Response {
    let principal = match common::require_principal(&headers, &services).await {
        Ok(principal) => principal,
        Err(resp) => return resp,
    };
    let requirement = Requirement::AnyOf(vec![Permission::PRODUCT_CREATE]);
    if let Err(resp) = common::require(&principal, &requirement) {
        return resp;
    }

    let draft = ProductDraft {
        brand: body.brand,
        product_description: body.product_description,
        barcode: body.barcode,
        category: body.category,
        product_images: body.product_images,
        prices: body.prices,
        package_size: body.package_size,
        other_available_package_size: body.other_available_package_size,
        ingredients: body.ingredients,
    };
    let product = match Product::new(&body.product_name, draft) {
        Ok(product) => product,
        Err(DomainError::Validation(msg)) => return errors::failure(StatusCode::BAD_REQUEST, msg),
        Err(err) => return errors::internal("Failed to create product", err),
    };

    let db = match services.db.connect().await {
        Ok(db) => db.clone(),
        Err(err) => return errors::internal("Failed to create product", err),
    };

    // No barcode pre-check: the unique index on the insert is the only
    // guard, and an index rejection surfaces as a generic failure.
    let product = match ProductStore::insert(db.as_ref(), product).await {
        Ok(product) => product,
        Err(err) => return errors::internal("Failed to create product", err),
    };

    services
        .audit
        .record(
            principal.id,
            ActivityKind::ProductCreate {
                product_id: product.id,
                product_name: product.product_name.clone(),
            },
            identity::client_info(&headers),
        )
        .await;

    errors::ok(product, "Product created successfully")
}
