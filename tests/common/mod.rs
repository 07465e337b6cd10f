#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use movies::{AppState, app, config::Config, db, validation::ValidationRules};
use tower::ServiceExt;

pub fn test_config(rules: ValidationRules) -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        route_prefix: "/movie".to_string(),
        rules,
    }
}

/// Router over a fresh, migrated in-memory database.
pub async fn build_test_app() -> Router {
    build_test_app_with(test_config(ValidationRules::default())).await
}

pub async fn build_test_app_with(config: Config) -> Router {
    let db = db::connect_and_migrate(&config.database_url, config.max_connections).await.unwrap();
    app(AppState::new(config, db))
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("POST", uri, body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("PUT", uri, body)).await
}

pub async fn patch_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("PATCH", uri, body)).await
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Creates a movie and returns its id.
pub async fn create_movie(app: &Router, title: &str, genre: &str, duration: i32) -> i64 {
    let resp = post_json(
        app,
        "/movie",
        serde_json::json!({ "title": title, "genre": genre, "duration": duration }),
    )
    .await;
    assert_eq!(resp.status(), axum::http::StatusCode::CREATED);
    body_json(resp).await["id"].as_i64().unwrap()
}
