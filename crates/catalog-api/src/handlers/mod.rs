//! # JSON Resource Handlers
//!
//! Collection and item endpoints for categories and products.

pub mod categories;
pub mod products;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::{ApiError, ApiResult};

pub use categories::{
    create_category, delete_category, get_category, list_categories, update_category,
};
pub use products::{create_product, delete_product, get_product, list_products, update_product};

const INVALID_FIELDS: &str = "Invalid field types";

/// Numeric id from the item path. Anything that is not an integer is a
/// missing resource rather than a bad request.
#[derive(Debug, Clone, Copy)]
pub struct ItemId(pub i64);

impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;
        Ok(Self(id))
    }
}

/// Decode a JSON request body. Text that is not JSON is malformed input;
/// JSON of the wrong shape is a validation error.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        match e.classify() {
            Category::Data => ApiError::Validation(INVALID_FIELDS.to_string()),
            Category::Io | Category::Syntax | Category::Eof => ApiError::MalformedInput,
        }
    })
}

/// Fallback for methods a resource does not support
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Treat a blank string like an absent field.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
