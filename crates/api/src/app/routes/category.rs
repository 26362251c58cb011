//! Category endpoints.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    routing::get,
};

use labelbase_audit::ActivityKind;
use labelbase_auth::{Permission, Requirement};
use labelbase_catalog::Category;
use labelbase_core::DomainError;
use labelbase_store::{CategoryStore, StoreError};

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::identity;

pub fn router() -> Router {
    Router::new().route("/", get(list_categories).post(create_category))
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let principal = match common::require_principal(&headers, &services).await {
        Ok(principal) => principal,
        Err(resp) => return resp,
    };

    let db = match services.db.connect().await {
        Ok(db) => db.clone(),
        Err(err) => return errors::internal("Failed to fetch categories", err),
    };
    let categories = match CategoryStore::list(db.as_ref()).await {
        Ok(categories) => categories,
        Err(err) => return errors::internal("Failed to fetch categories", err),
    };

    services
        .audit
        .record(
            principal.id,
            ActivityKind::CategoryView {
                count: categories.len(),
            },
            identity::client_info(&headers),
        )
        .await;

    errors::ok(categories, "Categories fetched successfully")
}

pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Json(body): Json<dto::CategoryCreateRequest>,
) -> axum::response::Response {
    let principal = match common::require_principal(&headers, &services).await {
        Ok(principal) => principal,
        Err(resp) => return resp,
    };
    let requirement = Requirement::AnyOf(vec![Permission::CATEGORY_CREATE]);
    if let Err(resp) = common::require(&principal, &requirement) {
        return resp;
    }

    let category = match Category::new(&body.name, body.description.as_deref()) {
        Ok(category) => category,
        Err(DomainError::Validation(msg)) => return errors::failure(StatusCode::BAD_REQUEST, msg),
        Err(err) => return errors::internal("Failed to create category", err),
    };

    let db = match services.db.connect().await {
        Ok(db) => db.clone(),
        Err(err) => return errors::internal("Failed to create category", err),
    };

    // Friendly pre-check; the unique index on the insert is the guarantor.
    match CategoryStore::find_by_name(db.as_ref(), &category.name).await {
        Ok(Some(_)) => return errors::failure(StatusCode::BAD_REQUEST, "Category already exists"),
        Ok(None) => {}
        Err(err) => return errors::internal("Failed to create category", err),
    }

    let category = match CategoryStore::insert(db.as_ref(), category).await {
        Ok(category) => category,
        Err(StoreError::Duplicate { .. }) => {
            return errors::failure(StatusCode::BAD_REQUEST, "Category already exists");
        }
        Err(err) => return errors::internal("Failed to create category", err),
    };

    services
        .audit
        .record(
            principal.id,
            ActivityKind::CategoryCreate {
                category_id: category.id,
                category_name: category.name.clone(),
            },
            identity::client_info(&headers),
        )
        .await;

    errors::ok(category, "Category created successfully")
}
