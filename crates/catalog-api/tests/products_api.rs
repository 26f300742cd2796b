mod common;

use axum::Router;
use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use common::{app, create_category, create_product, get, json, raw};

async fn seeded() -> Router {
    let app = app();
    create_category(&app, "Books").await;
    create_category(&app, "Games").await;
    create_product(&app, "Dune", "9.99", "Books").await;
    create_product(&app, "Chess", "25.00", "Games").await;
    create_product(&app, "Atlas", "40.00", "Books").await;
    app
}

fn names(listing: &Value) -> Vec<&str> {
    listing
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_create_returns_full_object() {
    let app = app();
    create_category(&app, "Books").await;

    let response = json(
        &app,
        Method::POST,
        "/products/",
        &json!({ "name": "Dune", "description": "Spice", "price": 19.99, "category": "Books" }),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Dune");
    assert_eq!(body["description"], "Spice");
    assert_eq!(body["price"], "19.99");
    assert_eq!(body["category"], "Books");
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());
}

#[tokio::test]
async fn test_create_requires_name_price_and_category() {
    let app = app();
    create_category(&app, "Books").await;

    for body in [
        json!({ "price": "1.00", "category": "Books" }),
        json!({ "name": "Dune", "category": "Books" }),
        json!({ "name": "Dune", "price": "1.00" }),
        json!({ "name": "", "price": "1.00", "category": "Books" }),
    ] {
        let response = json(&app, Method::POST, "/products/", &body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json(),
            json!({ "error": "Name, price, and category are required" })
        );
    }
}

#[tokio::test]
async fn test_zero_price_is_accepted() {
    let app = app();
    create_category(&app, "Books").await;

    let product = create_product(&app, "Pamphlet", "0", "Books").await;
    assert_eq!(product["price"], "0.00");
}

#[tokio::test]
async fn test_unknown_category_creates_nothing() {
    let app = app();
    create_category(&app, "Books").await;

    let response = json(
        &app,
        Method::POST,
        "/products/",
        &json!({ "name": "Dune", "price": "9.99", "category": "Nope" }),
    )
    .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/products/").await.json(), json!([]));
}

#[tokio::test]
async fn test_filter_by_category() {
    let app = seeded().await;

    let listing = get(&app, "/products/?category=Books").await.json();
    assert_eq!(names(&listing), ["Dune", "Atlas"]);

    let listing = get(&app, "/products/?category=Toys").await.json();
    assert!(names(&listing).is_empty());
}

#[tokio::test]
async fn test_price_bounds_are_closed_interval() {
    let app = seeded().await;

    let listing = get(&app, "/products/?price_min=9.99&price_max=25").await.json();
    assert_eq!(names(&listing), ["Dune", "Chess"]);

    let listing = get(&app, "/products/?price_min=25.00").await.json();
    assert_eq!(names(&listing), ["Chess", "Atlas"]);
}

#[tokio::test]
async fn test_filters_compose_and_blank_values_are_ignored() {
    let app = seeded().await;

    let listing = get(&app, "/products/?category=Books&price_max=10").await.json();
    assert_eq!(names(&listing), ["Dune"]);

    let listing = get(&app, "/products/?category=&price_min=").await.json();
    assert_eq!(names(&listing), ["Dune", "Chess", "Atlas"]);
}

#[tokio::test]
async fn test_bad_price_bound() {
    let app = seeded().await;

    let response = get(&app, "/products/?price_min=cheap").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "Invalid price_min" }));
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let app = seeded().await;
    let before = get(&app, "/products/1/").await.json();

    let response = json(&app, Method::PUT, "/products/1/", &json!({ "price": "12.50" })).await;
    assert_eq!(response.status, StatusCode::OK);

    let after = response.json();
    assert_eq!(after["price"], "12.50");
    assert_eq!(after["name"], before["name"]);
    assert_eq!(after["category"], before["category"]);
    assert_eq!(after["created_at"], before["created_at"]);
}

#[tokio::test]
async fn test_update_reassigns_category_by_name() {
    let app = seeded().await;

    let response = json(&app, Method::PUT, "/products/1/", &json!({ "category": "Games" })).await;
    assert_eq!(response.json()["category"], "Games");

    let response = json(&app, Method::PUT, "/products/1/", &json!({ "category": "Toys" })).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/products/1/").await.json()["category"], "Games");
}

#[tokio::test]
async fn test_delete_then_not_found() {
    let app = seeded().await;

    let response = raw(&app, Method::DELETE, "/products/2/", "").await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_empty());

    assert_eq!(get(&app, "/products/2/").await.status, StatusCode::NOT_FOUND);
    let response = raw(&app, Method::DELETE, "/products/2/", "").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_method() {
    let app = app();

    let response = raw(&app, Method::PATCH, "/products/", "{}").await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.json(), json!({ "error": "Method not allowed" }));
}

#[tokio::test]
async fn test_repeated_filter_keeps_last_value() {
    let app = seeded().await;

    let response = get(&app, "/products/?price_min=1&price_min=30").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response.json()), ["Atlas"]);

    let response = get(&app, "/products/?category=Games&category=Books&sort=name").await;
    assert_eq!(names(&response.json()), ["Dune", "Atlas"]);
}

#[tokio::test]
async fn test_price_outside_column_range_is_rejected() {
    let app = app();
    create_category(&app, "Books").await;

    for price in [json!("100000000"), json!(1e20), json!("99999999.999")] {
        let response = json(
            &app,
            Method::POST,
            "/products/",
            &json!({ "name": "Vault", "price": price, "category": "Books" }),
        )
        .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json(), json!({ "error": "Invalid price" }));
    }
    assert_eq!(get(&app, "/products/").await.json(), json!([]));

    let product = create_product(&app, "Vault", "99999999.99", "Books").await;
    let response = json(
        &app,
        Method::PUT,
        &format!("/products/{}/", product["id"]),
        &json!({ "price": 1_000_000_000 }),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(get(&app, "/products/1/").await.json()["price"], "99999999.99");
}

#[tokio::test]
async fn test_wrong_field_type_is_not_invalid_json() {
    let app = seeded().await;

    let response = json(&app, Method::POST, "/products/", &json!({ "name": 123 })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "Invalid field types" }));

    let response = json(&app, Method::PUT, "/products/1/", &json!([])).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "Invalid field types" }));
}
