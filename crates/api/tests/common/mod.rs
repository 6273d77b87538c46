#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use gameshelf_api::config::ServerConfig;
use gameshelf_api::router::build_app_router;
use gameshelf_api::state::AppState;
use gameshelf_core::i18n::{Catalog, Locale};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        default_locale: Locale::En,
    }
}

/// Build the full application router, middleware included, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        translator: Arc::new(Catalog::builtin().expect("built-in catalog")),
    };
    build_app_router(state, &config)
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    get_with_headers(app, uri, &[]).await
}

pub async fn get_with_headers(app: Router, uri: &str, headers: &[(&str, &str)]) -> Response {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

/// Send `body` verbatim with a JSON content type.
pub async fn send_raw(app: Router, method: Method, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send_raw(app, Method::POST, uri, &body.to_string()).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response {
    send_raw(app, Method::PATCH, uri, &body.to_string()).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn content_type(response: &Response) -> &str {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// A valid game creation payload.
pub fn game_payload(title: &str) -> Value {
    json!({
        "title": title,
        "genre": "Action",
        "releaseDate": "2010-09-14",
        "platform": "Xbox"
    })
}

/// Create a resource through the API and return its `data` member.
pub async fn create(pool: &PgPool, uri: &str, payload: Value) -> Value {
    let response = post_json(build_test_app(pool.clone()), uri, payload).await;
    assert_eq!(response.status(), 201, "creating via {uri}");
    body_json(response).await["data"].clone()
}

pub async fn create_game(pool: &PgPool, title: &str) -> Value {
    create(pool, "/api/v1/games", game_payload(title)).await
}
