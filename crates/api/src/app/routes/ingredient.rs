//! Ingredient endpoints.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    routing::get,
};

use labelbase_audit::ActivityKind;
use labelbase_auth::{Permission, Requirement};
use labelbase_catalog::{Ingredient, IngredientDraft};
use labelbase_core::DomainError;
use labelbase_store::{IngredientStore, StoreError};

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::identity;

pub fn router() -> Router {
    Router::new().route("/", get(list_ingredients).post(create_ingredient))
}

pub async fn list_ingredients(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let principal = match common::require_principal(&headers, &services).await {
        Ok(principal) => principal,
        Err(resp) => return resp,
    };

    let db = match services.db.connect().await {
        Ok(db) => db.clone(),
        Err(err) => return errors::internal("Failed to fetch ingredients", err),
    };
    let ingredients = match IngredientStore::list(db.as_ref()).await {
        Ok(ingredients) => ingredients,
        Err(err) => return errors::internal("Failed to fetch ingredients", err),
    };

    services
        .audit
        .record(
            principal.id,
            ActivityKind::IngredientView {
                count: ingredients.len(),
            },
            identity::client_info(&headers),
        )
        .await;

    errors::ok(ingredients, "Ingredients fetched successfully")
}

pub async fn create_ingredient(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Json(body): Json<dto::IngredientCreateRequest>,
) -> axum::response::Response {
    let principal = match common::require_principal(&headers, &services).await {
        Ok(principal) => principal,
        Err(resp) => return resp,
    };
    let requirement = Requirement::AnyOf(vec![Permission::INGREDIENT_CREATE]);
    if let Err(resp) = common::require(&principal, &requirement) {
        return resp;
    }

    let draft = IngredientDraft {
        description: body.description,
        common_uses: body.common_uses,
        health_flag: body.health_flag,
        health_tags: body.health_tags,
        sources: body.sources,
        references: body.references,
    };
    let ingredient = match Ingredient::new(&body.name, draft) {
        Ok(ingredient) => ingredient,
        Err(DomainError::Validation(msg)) => return errors::failure(StatusCode::BAD_REQUEST, msg),
        Err(err) => return errors::internal("Failed to create ingredient", err),
    };

    let db = match services.db.connect().await {
        Ok(db) => db.clone(),
        Err(err) => return errors::internal("Failed to create ingredient", err),
    };

    // Friendly pre-check; the unique index on the insert is the guarantor.
    match IngredientStore::find_by_name(db.as_ref(), &ingredient.name).await {
        Ok(Some(_)) => {
            return errors::failure(StatusCode::BAD_REQUEST, "Ingredient already exists");
        }
        Ok(None) => {}
        Err(err) => return errors::internal("Failed to create ingredient", err),
    }

    let ingredient = match IngredientStore::insert(db.as_ref(), ingredient).await {
        Ok(ingredient) => ingredient,
        Err(StoreError::Duplicate { .. }) => {
            return errors::failure(StatusCode::BAD_REQUEST, "Ingredient already exists");
        }
        Err(err) => return errors::internal("Failed to create ingredient", err),
    };

    // The audit trail keeps the name as submitted, not the stored
    // lowercase form.
    services
        .audit
        .record(
            principal.id,
            ActivityKind::IngredientCreate {
                ingredient_id: ingredient.id,
                ingredient_name: body.name.clone(),
            },
            identity::client_info(&headers),
        )
        .await;

    errors::ok(ingredient, "Ingredient created successfully")
}
