//! Shared handler plumbing: principal resolution plus the permission gate.

use axum::http::HeaderMap;
use axum::response::Response;

use labelbase_auth::{Decision, Principal, Requirement, Role, authorize};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::identity;

/// Roles that skip permission checks on every gated endpoint.
pub const PRIVILEGED: &[Role] = &[Role::SuperAdmin];

/// Resolve the caller or answer 401.
pub async fn require_principal(
    headers: &HeaderMap,
    services: &AppServices,
) -> Result<Principal, Response> {
    identity::resolve_principal(headers, services)
        .await
        .ok_or_else(errors::unauthorized)
}

/// Gate the caller on `requirement`, answering 403 with the structured denial
/// payload when it fails.
pub fn require(principal: &Principal, requirement: &Requirement) -> Result<Decision, Response> {
    let decision = authorize(Some(principal), requirement, PRIVILEGED);
    if decision.allowed {
        Ok(decision)
    } else {
        Err(errors::forbidden(decision.denial_details(requirement)))
    }
}
