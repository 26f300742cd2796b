mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, create_category, create_product, get, json, raw};

#[tokio::test]
async fn test_category_lifecycle() {
    let app = app();

    let created = json(&app, Method::POST, "/categories/", &json!({ "name": "Books" })).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(
        created.json(),
        json!({ "id": 1, "name": "Books", "description": "" })
    );

    let fetched = get(&app, "/categories/1/").await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), created.json());

    let updated = json(
        &app,
        Method::PUT,
        "/categories/1/",
        &json!({ "description": "All books" }),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(
        updated.json(),
        json!({ "id": 1, "name": "Books", "description": "All books" })
    );

    let deleted = raw(&app, Method::DELETE, "/categories/1/", "").await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.body.is_empty());

    assert_eq!(get(&app, "/categories/1/").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_requires_name() {
    let app = app();

    for body in [json!({}), json!({ "name": "" }), json!({ "description": "x" })] {
        let response = json(&app, Method::POST, "/categories/", &body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json(), json!({ "error": "Name is required" }));
    }

    assert_eq!(get(&app, "/categories/").await.json(), json!([]));
}

#[tokio::test]
async fn test_invalid_json_is_rejected() {
    let app = app();

    let response = raw(&app, Method::POST, "/categories/", "{name: Books").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "Invalid JSON" }));

    create_category(&app, "Books").await;
    let response = raw(&app, Method::PUT, "/categories/1/", "not json").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "Invalid JSON" }));
}

#[tokio::test]
async fn test_put_with_all_fields_overwrites_all() {
    let app = app();
    create_category(&app, "Books").await;

    let response = json(
        &app,
        Method::PUT,
        "/categories/1/",
        &json!({ "name": "Novels", "description": "Fiction" }),
    )
    .await;

    assert_eq!(
        response.json(),
        json!({ "id": 1, "name": "Novels", "description": "Fiction" })
    );
}

#[tokio::test]
async fn test_put_with_blank_name_is_rejected() {
    let app = app();
    create_category(&app, "Books").await;

    let response = json(&app, Method::PUT, "/categories/1/", &json!({ "name": "" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(get(&app, "/categories/1/").await.json()["name"], "Books");
}

#[tokio::test]
async fn test_missing_items_are_not_found() {
    let app = app();

    assert_eq!(get(&app, "/categories/42/").await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/categories/abc/").await.status, StatusCode::NOT_FOUND);

    let put = json(&app, Method::PUT, "/categories/42/", &json!({ "name": "X" })).await;
    assert_eq!(put.status, StatusCode::NOT_FOUND);

    // Lookup happens before the body is read
    let put = raw(&app, Method::PUT, "/categories/42/", "garbage").await;
    assert_eq!(put.status, StatusCode::NOT_FOUND);

    let delete = raw(&app, Method::DELETE, "/categories/42/", "").await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_methods() {
    let app = app();
    create_category(&app, "Books").await;

    let response = raw(&app, Method::DELETE, "/categories/", "").await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.json(), json!({ "error": "Method not allowed" }));

    let response = raw(&app, Method::POST, "/categories/1/", "{}").await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.json(), json!({ "error": "Method not allowed" }));
}

#[tokio::test]
async fn test_ids_are_unique_and_listing_ordered() {
    let app = app();
    let a = create_category(&app, "Books").await;
    let b = create_category(&app, "Games").await;
    assert_ne!(a["id"], b["id"]);

    let listing = get(&app, "/categories/").await.json();
    assert_eq!(listing, json!([a, b]));
}

#[tokio::test]
async fn test_delete_referenced_category_conflicts() {
    let app = app();
    create_category(&app, "Books").await;
    create_product(&app, "Dune", "9.99", "Books").await;

    let response = raw(&app, Method::DELETE, "/categories/1/", "").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.json(),
        json!({ "error": "Category is still referenced by products" })
    );
    assert_eq!(get(&app, "/categories/1/").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let response = get(&app, "/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "OK");
}
