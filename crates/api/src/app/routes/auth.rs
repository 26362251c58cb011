//! Public authentication endpoints: account application and login.

use std::sync::Arc;

use axum::{Json, Router, extract::Extension, http::StatusCode, routing::post};
use chrono::Utc;

use labelbase_auth::{
    AdminUser, Application, ApplicationError, Role, SessionClaims, hash_password, verify_password,
};
use labelbase_store::{AdminUserStore, StoreError};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/apply", post(apply))
        .route("/login", post(login))
}

/// Submit an application for a new admin account.
///
/// Accepted accounts are created dormant; a super admin activates them out of
/// band. The email pre-check is advisory, the unique index on the insert is
/// what actually prevents duplicates.
pub async fn apply(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ApplyRequest>,
) -> axum::response::Response {
    let role = match body.role.as_deref() {
        Some(raw) => match raw.parse::<Role>() {
            Ok(role) => Some(role),
            Err(_) => {
                return errors::failure(
                    StatusCode::BAD_REQUEST,
                    ApplicationError::InvalidRole.to_string(),
                );
            }
        },
        None => None,
    };

    let application = match Application::new(
        &body.full_name,
        &body.email,
        &body.password,
        body.phone_number.as_deref(),
        role,
        body.notes.as_deref(),
    ) {
        Ok(application) => application,
        Err(err) => return errors::failure(StatusCode::BAD_REQUEST, err.to_string()),
    };

    let db = match services.db.connect().await {
        Ok(db) => db.clone(),
        Err(err) => return errors::internal("Failed to submit application", err),
    };

    match AdminUserStore::find_by_email(db.as_ref(), &application.email).await {
        Ok(Some(_)) => {
            return errors::failure(
                StatusCode::CONFLICT,
                "An account with this email already exists.",
            );
        }
        Ok(None) => {}
        Err(err) => return errors::internal("Failed to submit application", err),
    }

    let password_hash = match hash_password(&application.password) {
        Ok(hash) => hash,
        Err(err) => return errors::internal("Failed to submit application", err),
    };

    let user = AdminUser::from_application(&application, password_hash);
    let user = match AdminUserStore::insert(db.as_ref(), user).await {
        Ok(user) => user,
        Err(StoreError::Duplicate { .. }) => {
            return errors::failure(
                StatusCode::CONFLICT,
                "An account with this email already exists.",
            );
        }
        Err(err) => return errors::internal("Failed to submit application", err),
    };

    tracing::info!(user = %user.id, role = %user.role, "admin application received");
    errors::created(
        serde_json::json!({ "user": dto::PublicUser::from(&user) }),
        "Application submitted successfully. A super admin will review and activate your account.",
    )
}

/// Exchange credentials for a session token.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let db = match services.db.connect().await {
        Ok(db) => db.clone(),
        Err(err) => return errors::internal("Failed to log in", err),
    };

    let user = match AdminUserStore::find_by_email(db.as_ref(), body.email.trim()).await {
        Ok(Some(user)) => user,
        Ok(None) => return errors::failure(StatusCode::UNAUTHORIZED, "User not found"),
        Err(err) => return errors::internal("Failed to log in", err),
    };

    // Dormant accounts are refused before the password is even checked.
    if !user.is_active {
        return errors::failure(
            StatusCode::UNAUTHORIZED,
            "Your account is not yet activated. Please wait for a super admin to approve your application.",
        );
    }

    if verify_password(&body.password, &user.password_hash).is_err() {
        return errors::failure(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }

    let claims = SessionClaims::new(user.id, user.role, Utc::now(), services.session_ttl());
    let token = match services.tokens.encode(&claims) {
        Ok(token) => token,
        Err(err) => return errors::internal("Failed to log in", err),
    };

    errors::ok(
        serde_json::json!({ "token": token, "user": dto::PublicUser::from(&user) }),
        "Login successful",
    )
}
