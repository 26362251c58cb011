//! Edge gatekeeper for browser-facing paths.
//!
//! API routes authenticate themselves; this middleware only guards the
//! dashboard-style prefixes, redirecting anonymous visitors to the login page
//! with the original URI preserved as the callback.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;

use crate::app::services::AppServices;
use crate::identity;

const PROTECTED_PREFIXES: &[&str] = &["/dashboard", "/admin", "/settings"];

pub async fn gatekeeper(
    State(services): State<Arc<AppServices>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if !PROTECTED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return next.run(request).await;
    }

    let authenticated = identity::bearer_token(request.headers())
        .and_then(|token| services.tokens.decode(token, Utc::now()).ok())
        .is_some();
    if authenticated {
        return next.run(request).await;
    }

    let target = format!(
        "/login?callbackUrl={}",
        urlencoding::encode(&request.uri().to_string())
    );
    Redirect::temporary(&target).into_response()
}
