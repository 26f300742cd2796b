//! # Storefront Catalog API
//!
//! HTTP service for the storefront catalog: a JSON API over categories and
//! products plus server-rendered store pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Axum HTTP Server                         │
//! │        (JSON resources, /store pages, CSRF, CORS)           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ApiContext                               │
//! │          (Repositories, Cached Catalog Listings)            │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                   │
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │  Redis / in-process     │   │   PostgreSQL / in-memory     │
//! │  (Listing cache)        │   │   (Source of Truth)          │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod context;
pub mod csrf;
pub mod error;
pub mod handlers;
pub mod views;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use context::{ApiContext, ApiContextBuilder};
pub use csrf::CsrfPolicy;
pub use error::{ApiError, ApiResult};

/// Router settings that come from configuration
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// `*` allows any origin
    pub cors_origins: Vec<String>,
    pub csrf: CsrfPolicy,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            cors_origins: vec!["*".to_string()],
            csrf: CsrfPolicy::default(),
        }
    }
}

impl From<&Config> for RouterOptions {
    fn from(config: &Config) -> Self {
        Self {
            cors_origins: config.cors_origins.clone(),
            csrf: CsrfPolicy::with_trusted_origins(config.csrf_trusted_origins.clone()),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    "OK"
}

/// JSON resources. Unsupported methods answer 405 with a JSON body.
fn api_routes() -> Router<ApiContext> {
    use handlers::{
        create_category, create_product, delete_category, delete_product, get_category,
        get_product, list_categories, list_products, method_not_allowed, update_category,
        update_product,
    };

    Router::new()
        .route(
            "/categories/",
            get(list_categories)
                .post(create_category)
                .fallback(method_not_allowed),
        )
        .route(
            "/categories/{id}/",
            get(get_category)
                .put(update_category)
                .delete(delete_category)
                .fallback(method_not_allowed),
        )
        .route(
            "/products/",
            get(list_products)
                .post(create_product)
                .fallback(method_not_allowed),
        )
        .route(
            "/products/{id}/",
            get(get_product)
                .put(update_product)
                .delete(delete_product)
                .fallback(method_not_allowed),
        )
}

/// Server-rendered store pages
fn store_routes() -> Router<ApiContext> {
    use views::{
        category_list, create_category_form, create_product_form, delete_category_form,
        delete_product_form, edit_category_form, edit_product_form, new_category_form,
        new_product_form, product_list, update_category_form, update_product_form,
    };

    Router::new()
        .route("/store/categories/", get(category_list))
        .route(
            "/store/categories/new/",
            get(new_category_form).post(create_category_form),
        )
        .route(
            "/store/categories/{id}/edit/",
            get(edit_category_form).post(update_category_form),
        )
        .route("/store/categories/{id}/delete/", post(delete_category_form))
        .route("/store/products/", get(product_list))
        .route(
            "/store/products/new/",
            get(new_product_form).post(create_product_form),
        )
        .route(
            "/store/products/{id}/edit/",
            get(edit_product_form).post(update_product_form),
        )
        .route("/store/products/{id}/delete/", post(delete_product_form))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
}

/// Build the Axum router
pub fn build_router(ctx: ApiContext, options: &RouterOptions) -> Router {
    let csrf = Arc::new(options.csrf.clone());

    Router::new()
        .merge(api_routes())
        .merge(store_routes())
        // Health check
        .route("/health", get(health_check))
        .route("/", get(|| async { "Storefront Catalog API" }))
        // State and middleware
        .with_state(ctx)
        .layer(from_fn_with_state(csrf, csrf::verify_origin))
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
