//! End-to-end authentication flow through the real router:
//! bearer layer -> session extensions -> extractor -> handler authorization.
//!
//! The token verifier is stubbed at the `TokenVerifier` seam, so these
//! tests exercise everything except the actual JWT cryptography.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use institution_api::app::build_router;
use institution_api::config::{AppEnv, Config};
use institution_api::repos::institution_repo::InstitutionRepo;
use institution_api::services::auth::AuthService;
use institution_api::services::auth::public_paths::PublicPaths;
use institution_api::services::auth::verifier::{ClaimMap, TokenVerifier, VerifyError};
use institution_api::state::AppState;

struct StubVerifier {
    claims: Option<Value>,
    calls: AtomicUsize,
}

impl StubVerifier {
    fn ok(claims: Value) -> Arc<Self> {
        Arc::new(Self {
            claims: Some(claims),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            claims: None,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl TokenVerifier for StubVerifier {
    async fn resolve(&self, _token: &str) -> Result<ClaimMap, VerifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.claims {
            Some(v) => Ok(v.as_object().cloned().expect("stub claims must be an object")),
            None => Err(VerifyError::MalformedClaims),
        }
    }
}

fn test_config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().expect("test addr"),
        app_env: AppEnv::Development,
        cors_allowed_origins: vec![],
        request_timeout_seconds: 5,
        max_body_bytes: 64 * 1024,
        auth_issuer: "https://idp.example.com/realms/test".to_string(),
        auth_audience: "institution-api".to_string(),
        access_token_leeway_seconds: 0,
        access_jwt_public_key_pem: String::new(),
        auth_public_path_suffixes: vec!["/v1/institutions".to_string()],
    }
}

fn test_app(verifier: Arc<StubVerifier>) -> (Router, Arc<InstitutionRepo>) {
    let auth = Arc::new(AuthService::new(
        verifier,
        PublicPaths::new(vec!["/v1/institutions".to_string()]),
    ));
    let institutions = Arc::new(InstitutionRepo::seeded());
    let state = AppState::new(auth, institutions.clone());

    (build_router(state, &test_config()), institutions)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn get_with_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_is_reachable_without_credentials() {
    let (app, _) = test_app(StubVerifier::failing());

    let response = app.oneshot(get("/health")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn institution_listing_bypasses_authentication() {
    let verifier = StubVerifier::failing();
    let (app, _) = test_app(verifier.clone());

    // Even a garbage token must not matter on the public path.
    let response = app
        .oneshot(get_with_bearer("/api/v1/institutions", "garbage"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);

    let body = body_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn protected_route_without_token_is_unauthorized() {
    let (app, _) = test_app(StubVerifier::failing());

    let response = app.oneshot(get("/api/v1/me")).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn verification_failure_degrades_to_anonymous_not_server_error() {
    let (app, _) = test_app(StubVerifier::failing());

    let response = app
        .oneshot(get_with_bearer("/api/v1/me", "expired-token"))
        .await
        .expect("response");

    // Anonymous fallback, rejected by the handler; never a 5xx from the layer.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_reports_identity_and_permission_order() {
    let (app, _) = test_app(StubVerifier::ok(json!({
        "sub": "u1",
        "preferred_username": "alice",
        "email": "alice@example.com",
        "resource_access": {
            "realm-management": { "roles": ["a", "b"] },
            "account": { "roles": ["c"] }
        }
    })));

    let response = app
        .oneshot(get_with_bearer("/api/v1/me", "valid"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["authenticated"], json!(true));
    assert_eq!(body["username"], "alice");
    assert_eq!(body["subject_id"], "u1");
    assert_eq!(body["name"], Value::Null);
    assert_eq!(body["permissions"], json!(["a", "b", "c", "authenticated"]));
}

#[tokio::test]
async fn authenticated_caller_can_read_a_single_institution() {
    let (app, institutions) = test_app(StubVerifier::ok(json!({ "sub": "u1" })));
    let id = institutions.list().expect("seed")[0].id;

    let response = app
        .clone()
        .oneshot(get_with_bearer(&format!("/api/v1/institutions/{id}"), "valid"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    // Without a token the same route rejects.
    let response = app
        .oneshot(get(&format!("/api/v1/institutions/{id}")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_operations_require_the_manage_role() {
    let (app, institutions) = test_app(StubVerifier::ok(json!({
        "sub": "u1",
        "resource_access": { "account": { "roles": ["view-profile"] } }
    })));
    let id = institutions.list().expect("seed")[0].id;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/v1/institutions/{id}"))
        .header(header::AUTHORIZATION, "Bearer valid")
        .body(Body::empty())
        .expect("request");

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn manage_role_allows_rename_and_delete() {
    let (app, institutions) = test_app(StubVerifier::ok(json!({
        "sub": "admin",
        "resource_access": { "realm-management": { "roles": ["manage-institutions"] } }
    })));
    let id = institutions.list().expect("seed")[0].id;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/v1/institutions/{id}"))
        .header(header::AUTHORIZATION, "Bearer valid")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"Renamed Bank"}"#))
        .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Renamed Bank");

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/v1/institutions/{id}"))
        .header(header::AUTHORIZATION, "Bearer valid")
        .body(Body::empty())
        .expect("request");

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(institutions.get(id).expect("get").is_none());
}

#[tokio::test]
async fn rename_validates_the_payload() {
    let (app, institutions) = test_app(StubVerifier::ok(json!({
        "sub": "admin",
        "resource_access": { "realm-management": { "roles": ["manage-institutions"] } }
    })));
    let id = institutions.list().expect("seed")[0].id;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/v1/institutions/{id}"))
        .header(header::AUTHORIZATION, "Bearer valid")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"   "}"#))
        .expect("request");

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
