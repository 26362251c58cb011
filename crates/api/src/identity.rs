//! Per-request identity resolution.

use axum::http::{HeaderMap, header};
use chrono::Utc;

use labelbase_audit::ClientInfo;
use labelbase_auth::Principal;
use labelbase_store::{AdminUserStore, PermissionStore};

use crate::app::services::AppServices;

/// Extract the bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolve the calling principal.
///
/// The token only names the subject; permissions are re-read from storage on
/// every request so a grant or revocation takes effect immediately. Unknown
/// permission ids on the user relation are skipped. Any failure along the way
/// reads as anonymous to the caller.
pub async fn resolve_principal(headers: &HeaderMap, services: &AppServices) -> Option<Principal> {
    let token = bearer_token(headers)?;
    let claims = services.tokens.decode(token, Utc::now()).ok()?;

    let db = services.db.connect().await.ok()?;
    let user = AdminUserStore::find_by_id(db.as_ref(), claims.sub).await.ok()??;
    let permissions = PermissionStore::get_many(db.as_ref(), &user.permissions)
        .await
        .ok()?;

    Some(Principal {
        id: user.id,
        full_name: user.full_name,
        email: user.email,
        role: user.role,
        permissions,
    })
}

/// Client fingerprint for audit records: first hop of `x-forwarded-for`, then
/// `x-real-ip`, then `"unknown"`.
pub fn client_info(headers: &HeaderMap) -> ClientInfo {
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|v| v.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string());

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    ClientInfo {
        ip_address,
        user_agent,
    }
}
