//! Integration tests for the drinks API router
//!
//! Drives the assembled router with in-memory state. Authenticated happy
//! paths need a provider-signed token, so these tests cover the public
//! surface and the rejection paths that fail before any network access.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use barista_api::{
    api,
    config::Config,
    persistence::{DrinkStore, RecipePart},
    server::AppState,
};
use std::sync::Arc;
use tower::ServiceExt;

async fn test_state() -> AppState {
    AppState {
        config: Arc::new(Config::default()),
        store: DrinkStore::for_testing().await.expect("in-memory store"),
    }
}

fn app(state: AppState) -> Router {
    api::routes().with_state(state)
}

fn espresso_recipe() -> Vec<RecipePart> {
    vec![RecipePart {
        name: "espresso".to_string(),
        color: "#4b2e19".to_string(),
        parts: 1,
    }]
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn test_list_drinks_empty() {
    let response = app(test_state().await)
        .oneshot(Request::builder().uri("/drinks").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["drinks"], serde_json::json!([]));
}

#[tokio::test]
async fn test_list_drinks_uses_short_projection() {
    let state = test_state().await;
    state
        .store
        .create("Espresso", &espresso_recipe())
        .await
        .unwrap();

    let response = app(state)
        .oneshot(Request::builder().uri("/drinks").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let drink = &body["drinks"][0];
    assert_eq!(drink["title"], "Espresso");

    let part = &drink["recipe"][0];
    assert_eq!(part["color"], "#4b2e19");
    assert_eq!(part["parts"], 1);
    // Ingredient names stay private to the detail endpoint
    assert!(part.get("name").is_none());
}

#[tokio::test]
async fn test_health_check() {
    let response = app(test_state().await)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_drinks_detail_requires_token() {
    let response = app(test_state().await)
        .oneshot(
            Request::builder()
                .uri("/drinks-detail")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 401);
}

#[tokio::test]
async fn test_malformed_bearer_token_is_rejected() {
    let response = app(test_state().await)
        .oneshot(
            Request::builder()
                .uri("/drinks-detail")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 401);
}

#[tokio::test]
async fn test_non_bearer_scheme_is_rejected() {
    let response = app(test_state().await)
        .oneshot(
            Request::builder()
                .uri("/drinks-detail")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_drink_requires_token() {
    let payload = serde_json::json!({
        "title": "Latte",
        "recipe": [{"name": "espresso", "color": "#4b2e19", "parts": 1}],
    });

    let response = app(test_state().await)
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/drinks")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_drink_requires_token() {
    let response = app(test_state().await)
        .oneshot(
            Request::builder()
                .method(Method::PATCH)
                .uri("/drinks/1")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_drink_requires_token() {
    let response = app(test_state().await)
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri("/drinks/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_listing_survives_protected_rejections() {
    // The same router keeps serving public routes after auth rejections
    let state = test_state().await;
    state
        .store
        .create("Espresso", &espresso_recipe())
        .await
        .unwrap();
    let router = app(state);

    let rejected = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/drinks-detail")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);

    let listed = router
        .oneshot(Request::builder().uri("/drinks").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(listed.status(), StatusCode::OK);
    let body = body_json(listed).await;
    assert_eq!(body["drinks"].as_array().unwrap().len(), 1);
}
