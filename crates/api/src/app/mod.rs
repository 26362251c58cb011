//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the composition root (storage handle, token codec, audit)
//! - `routes/`: HTTP routes and handlers, one file per collection
//! - `dto.rs`: request DTOs and response projections
//! - `errors.rs`: the uniform response envelope

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(jwt_secret: String) -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services(jwt_secret.as_bytes()).await?);
    Ok(build_app_with(services))
}

/// Router over an existing service set; tests use this to keep a handle on
/// the storage backend.
pub fn build_app_with(services: Arc<services::AppServices>) -> Router {
    Router::new().merge(routes::router()).layer(
        ServiceBuilder::new()
            .layer(Extension(services.clone()))
            .layer(axum::middleware::from_fn_with_state(
                services,
                middleware::gatekeeper,
            )),
    )
}
