mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;
use ultrabot_web::{config::Environment, create_app, AppState, SESSION_COOKIE_NAME};

use common::{sqlite_db, test_config};

async fn app() -> axum::Router {
    create_app(AppState::from_parts(
        sqlite_db().await,
        test_config(Environment::Production),
    ))
}

#[tokio::test]
async fn health_without_connect_info() {
    let response = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let response = app()
        .await
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/stats")
                .header(header::ORIGIN, "https://dashboard.ultrabot.gg")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn api_routes_do_not_set_session_cookie() {
    let response = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/api/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .any(|c| c.to_str().unwrap().starts_with(SESSION_COOKIE_NAME)));
}
