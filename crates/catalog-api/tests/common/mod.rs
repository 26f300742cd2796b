//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use catalog_api::{ApiContext, RouterOptions, build_router};

pub const HOST: &str = "shop.test";

/// Router over the in-memory store and cache
pub fn app() -> Router {
    build_router(ApiContext::in_memory(), &RouterOptions::default())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).unwrap()
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        location,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn json(app: &Router, method: Method, uri: &str, body: &Value) -> TestResponse {
    raw(app, method, uri, body.to_string()).await
}

pub async fn raw(app: &Router, method: Method, uri: &str, body: impl Into<Body>) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    send(app, request).await
}

/// Same-origin form submission
pub async fn form(app: &Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::post(uri)
        .header(header::HOST, HOST)
        .header(header::ORIGIN, format!("http://{HOST}"))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn create_category(app: &Router, name: &str) -> Value {
    let response = json(
        app,
        Method::POST,
        "/categories/",
        &serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json()
}

pub async fn create_product(app: &Router, name: &str, price: &str, category: &str) -> Value {
    let response = json(
        app,
        Method::POST,
        "/products/",
        &serde_json::json!({ "name": name, "price": price, "category": category }),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json()
}
