#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use codenote_api::config::ServerConfig;
use codenote_api::router::build_app_router;
use codenote_api::state::AppState;

/// Dev-default CORS origin, 30-second timeout and a small body limit so the
/// limit is cheap to exceed.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: String::new(),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout: Duration::from_secs(30),
        shutdown_timeout: Duration::from_secs(30),
        max_body_bytes: TEST_MAX_BODY_BYTES,
        db_max_connections: 5,
    }
}

pub const TEST_MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the full application router, with the production middleware stack,
/// on top of the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState {
        pool,
        config: Arc::new(test_config()),
    })
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
