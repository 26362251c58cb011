//! Package size endpoints.
//!
//! Package sizes carry no unique index, so creation has no duplicate
//! pre-check: identical size names are allowed to coexist.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    routing::get,
};

use labelbase_audit::ActivityKind;
use labelbase_auth::{Permission, Requirement};
use labelbase_catalog::PackageSize;
use labelbase_core::DomainError;
use labelbase_store::PackageSizeStore;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::identity;

pub fn router() -> Router {
    Router::new().route("/", get(list_package_sizes).post(create_package_size))
}

pub async fn list_package_sizes(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let principal = match common::require_principal(&headers, &services).await {
        Ok(principal) => principal,
        Err(resp) => return resp,
    };

    let db = match services.db.connect().await {
        Ok(db) => db.clone(),
        Err(err) => return errors::internal("Failed to fetch package sizes", err),
    };
    let package_sizes = match PackageSizeStore::list(db.as_ref()).await {
        Ok(package_sizes) => package_sizes,
        Err(err) => return errors::internal("Failed to fetch package sizes", err),
    };

    services
        .audit
        .record(
            principal.id,
            ActivityKind::PackageSizeView {
                count: package_sizes.len(),
            },
            identity::client_info(&headers),
        )
        .await;

    errors::ok(package_sizes, "Package sizes fetched successfully")
}

pub async fn create_package_size(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Json(body): Json<dto::PackageSizeCreateRequest>,
) -> axum::response::Response {
    let principal = match common::require_principal(&headers, &services).await {
        Ok(principal) => principal,
        Err(resp) => return resp,
    };
    let requirement = Requirement::AnyOf(vec![Permission::PACKAGE_SIZE_CREATE]);
    if let Err(resp) = common::require(&principal, &requirement) {
        return resp;
    }

    let package_size = match PackageSize::new(
        &body.size_name,
        body.size_value.as_deref(),
        body.size_unit.as_deref(),
    ) {
        Ok(package_size) => package_size,
        Err(DomainError::Validation(msg)) => return errors::failure(StatusCode::BAD_REQUEST, msg),
        Err(err) => return errors::internal("Failed to create package size", err),
    };

    let db = match services.db.connect().await {
        Ok(db) => db.clone(),
        Err(err) => return errors::internal("Failed to create package size", err),
    };
    let package_size = match PackageSizeStore::insert(db.as_ref(), package_size).await {
        Ok(package_size) => package_size,
        Err(err) => return errors::internal("Failed to create package size", err),
    };

    services
        .audit
        .record(
            principal.id,
            ActivityKind::PackageSizeCreate {
                package_size_id: package_size.id,
                size_name: package_size.size_name.clone(),
            },
            identity::client_info(&headers),
        )
        .await;

    errors::ok(package_size, "Package size created successfully")
}
