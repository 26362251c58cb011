//! The uniform response envelope.
//!
//! Every endpoint answers `{ success, data?, error?, msg?, details? }`.
//! Handlers never leak internal failure text: storage and hashing errors are
//! logged and mapped to a stable public message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::json;

use labelbase_auth::DenialDetails;

/// `200 { success: true, data, msg }`.
pub fn ok<T: Serialize>(data: T, msg: &str) -> axum::response::Response {
    success(StatusCode::OK, data, msg)
}

/// `201 { success: true, data, msg }`.
pub fn created<T: Serialize>(data: T, msg: &str) -> axum::response::Response {
    success(StatusCode::CREATED, data, msg)
}

pub fn success<T: Serialize>(status: StatusCode, data: T, msg: &str) -> axum::response::Response {
    (
        status,
        Json(json!({ "success": true, "data": data, "msg": msg })),
    )
        .into_response()
}

/// A failure with a caller-facing error string.
pub fn failure(status: StatusCode, error: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(json!({ "success": false, "error": error.into() })),
    )
        .into_response()
}

/// `401` for requests with no resolvable principal.
pub fn unauthorized() -> axum::response::Response {
    failure(StatusCode::UNAUTHORIZED, "Unauthorized")
}

/// `403` carrying the structured denial payload under `details`.
pub fn forbidden(details: DenialDetails) -> axum::response::Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "success": false,
            "msg": "Insufficient permissions",
            "details": details,
        })),
    )
        .into_response()
}

/// `500` with a stable public message; the cause goes to the log only.
pub fn internal(public: &str, cause: impl std::fmt::Display) -> axum::response::Response {
    tracing::error!(error = %cause, "{public}");
    failure(StatusCode::INTERNAL_SERVER_ERROR, public)
}
