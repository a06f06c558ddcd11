//! Identity store and session gate behavior, including gate checks through
//! the real router.

#![allow(clippy::unwrap_used)]

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use tradepost_server::config::ServerConfig;
use tradepost_server::routes;
use tradepost_server::services::{IdentityError, IdentityService};
use tradepost_server::state::AppState;

// ============================================================================
// Identity store properties (service level)
// ============================================================================

#[tokio::test]
async fn issued_tokens_resolve_to_the_issuing_user() {
    let pool = common::memory_pool().await;
    let identity = IdentityService::new(&pool);

    identity.register("alice", "secret1").await.unwrap();
    let token = identity.login("alice", "secret1").await.unwrap();

    let resolved = identity.resolve(token.as_str()).await.unwrap();
    assert_eq!(resolved.username, "alice");
}

#[tokio::test]
async fn never_issued_tokens_do_not_resolve() {
    let pool = common::memory_pool().await;
    let identity = IdentityService::new(&pool);
    identity.register("alice", "secret1").await.unwrap();
    identity.login("alice", "secret1").await.unwrap();

    let err = identity.resolve("not-a-real-token").await.unwrap_err();
    assert!(matches!(err, IdentityError::InvalidToken));

    let err = identity.resolve("").await.unwrap_err();
    assert!(matches!(err, IdentityError::InvalidToken));
}

#[tokio::test]
async fn relogin_overwrites_the_previous_token() {
    let pool = common::memory_pool().await;
    let identity = IdentityService::new(&pool);
    identity.register("alice", "secret1").await.unwrap();

    let first = identity.login("alice", "secret1").await.unwrap();
    let second = identity.login("alice", "secret1").await.unwrap();
    assert_ne!(first, second);

    // last login wins: the old token stops resolving, the new one works
    assert!(matches!(
        identity.resolve(first.as_str()).await.unwrap_err(),
        IdentityError::InvalidToken
    ));
    assert_eq!(
        identity.resolve(second.as_str()).await.unwrap().username,
        "alice"
    );
}

#[tokio::test]
async fn duplicate_usernames_are_rejected() {
    let pool = common::memory_pool().await;
    let identity = IdentityService::new(&pool);

    identity.register("alice", "secret1").await.unwrap();
    let err = identity.register("alice", "other").await.unwrap_err();
    assert!(matches!(err, IdentityError::UsernameTaken));
}

#[tokio::test]
async fn login_requires_an_exact_credential_match() {
    let pool = common::memory_pool().await;
    let identity = IdentityService::new(&pool);
    identity.register("alice", "secret1").await.unwrap();

    for (username, password) in [("alice", "wrong"), ("bob", "secret1"), ("ALICE", "secret1")] {
        let err = identity.login(username, password).await.unwrap_err();
        assert!(matches!(err, IdentityError::InvalidCredentials));
    }
}

// ============================================================================
// Session gate through the router
// ============================================================================

fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: "sqlite::memory:".to_owned(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        frontend_origin: "http://localhost:3000".to_owned(),
        sentry_dsn: None,
    }
}

async fn test_app() -> Router {
    let pool = common::memory_pool().await;
    routes::routes().with_state(AppState::new(test_config(), pool))
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn authed_request(method: &str, uri: &str, token: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_owned()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register alice and return a fresh token, via the HTTP surface.
async fn register_and_login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            r#"{"username":"alice","password":"secret1"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/login",
            r#"{"username":"alice","password":"secret1"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn protected_routes_reject_missing_and_malformed_credentials() {
    let app = test_app().await;
    let token = register_and_login(&app).await;

    // no header at all
    let response = app
        .clone()
        .oneshot(json_request("POST", "/carts", r#"{"item_id":7}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // wrong scheme, trailing garbage, unknown token
    for auth in [
        "Basic abc".to_owned(),
        format!("Bearer {token} extra"),
        "Bearer".to_owned(),
        "Bearer 00000000-0000-0000-0000-000000000000".to_owned(),
    ] {
        let request = Request::builder()
            .method("POST")
            .uri("/carts")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, auth)
            .body(Body::from(r#"{"item_id":7}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn bearer_scheme_is_case_insensitive_on_the_wire() {
    let app = test_app().await;
    let token = register_and_login(&app).await;

    let request = Request::builder()
        .method("POST")
        .uri("/carts")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("bearer {token}"))
        .body(Body::from(r#"{"item_id":7}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn full_flow_over_http() {
    let app = test_app().await;
    let token = register_and_login(&app).await;

    // add two items to the cart
    let response = app
        .clone()
        .oneshot(authed_request("POST", "/carts", &token, r#"{"item_id":7}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let cart_id = body["cart"]["id"].as_i64().unwrap();
    assert_eq!(body["cart"]["status"], "open");
    assert_eq!(body["line"]["item_id"], 7);

    let response = app
        .clone()
        .oneshot(authed_request("POST", "/carts", &token, r#"{"item_id":9}"#))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["cart"]["id"].as_i64().unwrap(), cart_id);
    assert_eq!(body["cart"]["lines"].as_array().unwrap().len(), 2);

    // credential material never leaks through the user listing
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/users").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    let user = body.as_array().unwrap().first().unwrap();
    assert!(user.get("password").is_none());
    assert!(user.get("token").is_none());

    // checkout, then checkout again
    let checkout_body = format!(r#"{{"cart_id":{cart_id}}}"#);
    let response = app
        .clone()
        .oneshot(authed_request("POST", "/orders", &token, &checkout_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["cart_id"].as_i64().unwrap(), cart_id);

    let response = app
        .clone()
        .oneshot(authed_request("POST", "/orders", &token, &checkout_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "cart not found or not open");
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict_over_http() {
    let app = test_app().await;
    register_and_login(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            r#"{"username":"alice","password":"again"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn stale_tokens_are_rejected_at_the_gate() {
    let app = test_app().await;
    let old_token = register_and_login(&app).await;

    // second login rotates the token
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/login",
            r#"{"username":"alice","password":"secret1"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(authed_request("POST", "/carts", &old_token, r#"{"item_id":1}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn item_creation_defaults_and_validates_status() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/items", r#"{"name":"Lamp"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "active");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/items",
            r#"{"name":"Rug","status":"archived"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "archived");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/items",
            r#"{"name":"Vase","status":"glowing"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
