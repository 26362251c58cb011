//! Black-box tests over the full router: token auth, the permission gate,
//! validation, uniqueness, and the audit trail.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode, header};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use labelbase_api::app::{build_app_with, services};
use labelbase_audit::ActivityStore;
use labelbase_auth::{
    AdminUser, Application, Role, SessionClaims, hash_password,
};
use labelbase_core::DocumentId;
use labelbase_store::{AdminUserStore, PermissionStore};

async fn harness() -> (Router, Arc<services::AppServices>) {
    let services = Arc::new(services::build_services(b"test-secret").await.unwrap());
    let app = build_app_with(services.clone());
    (app, services)
}

/// Insert a user directly into storage and mint a session token for them.
async fn seed_user(
    services: &services::AppServices,
    role: Role,
    permissions: &[&str],
    active: bool,
) -> (DocumentId, String) {
    let db = services.db.connect().await.unwrap().clone();
    let email = format!("{}@example.com", DocumentId::new());

    let application =
        Application::new("Test User", &email, "pw", None, None, None).unwrap();
    let mut user = AdminUser::from_application(&application, hash_password("pw").unwrap());
    user.role = role;
    user.is_active = active;
    for title in permissions {
        let record = PermissionStore::find_by_title(db.as_ref(), title)
            .await
            .unwrap()
            .expect("permission is seeded");
        user.permissions.push(record.id);
    }
    let user = AdminUserStore::insert(db.as_ref(), user).await.unwrap();

    let claims = SessionClaims::new(user.id, user.role, Utc::now(), Duration::hours(1));
    let token = services.tokens.encode(&claims).unwrap();
    (user.id, token)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let (app, _) = harness().await;
    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn anonymous_api_requests_are_unauthorized() {
    let (app, _) = harness().await;
    let response = app.oneshot(get("/api/category", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn garbage_tokens_read_as_anonymous() {
    let (app, _) = harness().await;
    let response = app
        .oneshot(get("/api/category", Some("not-a-jwt")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_permission_denies_and_persists_nothing() {
    let (app, services) = harness().await;
    let (manager_id, manager) = seed_user(&services, Role::Manager, &[], true).await;
    let (_, admin) = seed_user(&services, Role::SuperAdmin, &[], true).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/category",
            Some(&manager),
            json!({ "name": "Dairy" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["msg"], "Insufficient permissions");
    assert_eq!(body["details"]["required"][0], "CATEGORY_CREATE");
    assert!(body["details"]["userPermissions"].as_array().unwrap().is_empty());

    // Nothing was written and nothing was audited.
    let response = app
        .oneshot(get("/api/category", Some(&admin)))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let db = services.db.connect().await.unwrap().clone();
    let trail = ActivityStore::list_by_user(db.as_ref(), manager_id)
        .await
        .unwrap();
    assert!(trail.is_empty());
}

#[tokio::test]
async fn category_names_normalize_and_duplicates_are_rejected() {
    let (app, services) = harness().await;
    let (_, admin) = seed_user(&services, Role::SuperAdmin, &[], true).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/category",
            Some(&admin),
            json!({ "name": "  Dairy ", "description": "milk & co" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "dairy");

    // A different casing of the same name collides.
    let response = app
        .oneshot(post_json(
            "/api/category",
            Some(&admin),
            json!({ "name": "DAIRY" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Category already exists");
}

#[tokio::test]
async fn blank_names_fail_validation() {
    let (app, services) = harness().await;
    let (_, admin) = seed_user(&services, Role::SuperAdmin, &[], true).await;

    let response = app
        .oneshot(post_json(
            "/api/ingredient",
            Some(&admin),
            json!({ "name": "   " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Ingredient name is required");
}

#[tokio::test]
async fn super_admin_bypasses_permission_checks() {
    let (app, services) = harness().await;
    let (_, admin) = seed_user(&services, Role::SuperAdmin, &[], true).await;

    let response = app
        .oneshot(post_json(
            "/api/ingredient",
            Some(&admin),
            json!({ "name": "Sugar", "healthFlag": "bad" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "sugar");
    assert_eq!(body["data"]["healthFlag"], "bad");
}

#[tokio::test]
async fn granted_permission_allows_create_and_audits_it() {
    let (app, services) = harness().await;
    let (manager_id, manager) =
        seed_user(&services, Role::Manager, &["CATEGORY_CREATE"], true).await;

    let mut request = post_json(
        "/api/category",
        Some(&manager),
        json!({ "name": "snacks" }),
    );
    request
        .headers_mut()
        .insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
    request
        .headers_mut()
        .insert(header::USER_AGENT, "integration-test".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let db = services.db.connect().await.unwrap().clone();
    let trail = ActivityStore::list_by_user(db.as_ref(), manager_id)
        .await
        .unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].activity_type, "CATEGORY_CREATE");
    assert_eq!(trail[0].description, "Created category: snacks");
    assert_eq!(trail[0].metadata["categoryName"], "snacks");
    assert_eq!(trail[0].ip_address, "203.0.113.7");
    assert_eq!(trail[0].user_agent, "integration-test");
}

#[tokio::test]
async fn application_creates_a_dormant_account() {
    let (app, _) = harness().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/apply",
            None,
            json!({
                "fullName": "Applicant",
                "email": "applicant@example.com",
                "password": "pw",
                "role": "admin"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["isActive"], false);
    assert_eq!(body["data"]["user"]["role"], "admin");

    // The dormant account cannot log in yet.
    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            None,
            json!({ "email": "applicant@example.com", "password": "pw" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("not yet activated"));
}

#[tokio::test]
async fn application_rejects_missing_fields_and_bad_roles() {
    let (app, _) = harness().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/apply",
            None,
            json!({ "email": "x@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Full name, email, and password are required.");

    let response = app
        .oneshot(post_json(
            "/api/auth/apply",
            None,
            json!({
                "fullName": "X",
                "email": "x@example.com",
                "password": "pw",
                "role": "super-admin"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid role specified.");
}

#[tokio::test]
async fn duplicate_application_email_conflicts() {
    let (app, _) = harness().await;
    let payload = json!({
        "fullName": "Applicant",
        "email": "dupe@example.com",
        "password": "pw"
    });

    let response = app
        .clone()
        .oneshot(post_json("/api/auth/apply", None, payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(post_json("/api/auth/apply", None, payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "An account with this email already exists.");
}

#[tokio::test]
async fn login_issues_a_usable_token() {
    let (app, services) = harness().await;
    let db = services.db.connect().await.unwrap().clone();

    let application =
        Application::new("Active User", "active@example.com", "pw", None, None, None).unwrap();
    let mut user = AdminUser::from_application(&application, hash_password("pw").unwrap());
    user.is_active = true;
    AdminUserStore::insert(db.as_ref(), user).await.unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            None,
            json!({ "email": "active@example.com", "password": "pw" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let token = body["data"]["token"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["user"]["isActive"], true);

    let response = app
        .oneshot(get("/api/category", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_rejects_wrong_passwords_and_unknown_users() {
    let (app, services) = harness().await;
    let db = services.db.connect().await.unwrap().clone();

    let application =
        Application::new("Active User", "known@example.com", "pw", None, None, None).unwrap();
    let mut user = AdminUser::from_application(&application, hash_password("pw").unwrap());
    user.is_active = true;
    AdminUserStore::insert(db.as_ref(), user).await.unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            None,
            json!({ "email": "known@example.com", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid credentials");

    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            None,
            json!({ "email": "nobody@example.com", "password": "pw" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "User not found");
}

#[tokio::test]
async fn product_listing_is_role_scoped() {
    let (app, services) = harness().await;
    let (_, blocked) = seed_user(&services, Role::Manager, &[], true).await;
    let (_, viewer) = seed_user(&services, Role::Admin, &["PRODUCT_VIEW"], true).await;

    let response = app
        .clone()
        .oneshot(get("/api/product", Some(&blocked)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["details"]["required"][0], "PRODUCT_VIEW");

    let response = app
        .oneshot(get("/api/product", Some(&viewer)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn product_listing_expands_references() {
    let (app, services) = harness().await;
    let (_, admin) = seed_user(&services, Role::SuperAdmin, &[], true).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/category",
            Some(&admin),
            json!({ "name": "snacks" }),
        ))
        .await
        .unwrap();
    let category_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/package-size",
            Some(&admin),
            json!({ "sizeName": "Family Pack", "sizeValue": "500", "sizeUnit": "g" }),
        ))
        .await
        .unwrap();
    let size_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/ingredient",
            Some(&admin),
            json!({ "name": "Oats" }),
        ))
        .await
        .unwrap();
    let ingredient_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/product",
            Some(&admin),
            json!({
                "productName": "Oat Bar",
                "barcode": "5901234123457",
                "category": [category_id],
                "packageSize": size_id,
                "ingredients": [{ "ingredient": ingredient_id, "ingredientQuantity": "40 g" }],
                "prices": [{ "platform": "web", "price": 3.5 }]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/product", Some(&admin))).await.unwrap();
    let body = body_json(response).await;
    let product = &body["data"][0];
    assert_eq!(product["productName"], "Oat Bar");
    assert_eq!(product["category"][0]["name"], "snacks");
    assert_eq!(product["packageSize"]["sizeName"], "Family Pack");
    assert_eq!(product["ingredients"][0]["ingredient"]["name"], "oats");
    assert_eq!(product["ingredients"][0]["ingredientQuantity"], "40 g");
    assert!(product["productReview"].is_null());
}

#[tokio::test]
async fn view_endpoints_audit_the_count() {
    let (app, services) = harness().await;
    let (admin_id, admin) = seed_user(&services, Role::SuperAdmin, &[], true).await;

    let response = app
        .oneshot(get("/api/package-size", Some(&admin)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let db = services.db.connect().await.unwrap().clone();
    let trail = ActivityStore::list_by_user(db.as_ref(), admin_id)
        .await
        .unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].activity_type, "PACKAGE_SIZE_VIEW");
    assert_eq!(trail[0].metadata["count"], 0);
    assert_eq!(trail[0].ip_address, "unknown");
}

#[tokio::test]
async fn dashboard_paths_redirect_anonymous_visitors() {
    let (app, _) = harness().await;
    let response = app
        .oneshot(get("/dashboard/reports?page=2", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    // The original URI survives as a single encoded query value.
    assert_eq!(
        location,
        "/login?callbackUrl=%2Fdashboard%2Freports%3Fpage%3D2"
    );
}

#[tokio::test]
async fn ingredient_audit_keeps_the_submitted_casing() {
    let (app, services) = harness().await;
    let (admin_id, admin) = seed_user(&services, Role::SuperAdmin, &[], true).await;

    let response = app
        .oneshot(post_json(
            "/api/ingredient",
            Some(&admin),
            json!({ "name": "Sea Salt" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "sea salt");

    // Stored lowercase, audited as typed.
    let db = services.db.connect().await.unwrap().clone();
    let trail = ActivityStore::list_by_user(db.as_ref(), admin_id)
        .await
        .unwrap();
    assert_eq!(trail[0].description, "Created ingredient: Sea Salt");
    assert_eq!(trail[0].metadata["ingredientName"], "Sea Salt");
}
