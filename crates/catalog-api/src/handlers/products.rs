//! Product collection and item endpoints.

use std::str::FromStr;

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ItemId, parse_json, present};
use crate::context::ApiContext;
use crate::error::{ApiError, ApiResult};
use catalog_domain::{Category, NewProduct, Product, ProductFilter, ProductId, ProductPatch};

const REQUIRED_FIELDS: &str = "Name, price, and category are required";

/// Prices must fit the `NUMERIC(10, 2)` column: below 10^8 in magnitude.
const PRICE_LIMIT: i64 = 100_000_000;

/// Wire shape of a product, with the category flattened to its name
#[derive(Debug, Serialize)]
pub struct ProductBody {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductBody {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category_name,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Body of `POST /products/` and `PUT /products/{id}/`
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Value>,
    pub category: Option<String>,
}

/// Query string of `GET /products/`
#[derive(Debug, Default)]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
}

impl ProductListQuery {
    /// Collect the known keys from decoded query pairs. A repeated key keeps
    /// its last value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "category" => query.category = Some(value),
                "price_min" => query.price_min = Some(value),
                "price_max" => query.price_max = Some(value),
                _ => {}
            }
        }
        query
    }

    /// Blank values are ignored; a bound that is not a decimal is rejected.
    pub fn into_filter(self) -> ApiResult<ProductFilter> {
        Ok(ProductFilter {
            category: present(self.category),
            price_min: parse_bound("price_min", self.price_min)?,
            price_max: parse_bound("price_max", self.price_max)?,
        })
    }
}

fn parse_bound(name: &str, value: Option<String>) -> ApiResult<Option<Decimal>> {
    present(value)
        .map(|raw| {
            Decimal::from_str(raw.trim())
                .map_err(|_| ApiError::Validation(format!("Invalid {name}")))
        })
        .transpose()
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Accept a price as a JSON number or a decimal string, stored at two
/// decimal places. Prices the column cannot hold are rejected.
pub(crate) fn parse_price(value: &Value) -> ApiResult<Decimal> {
    let invalid = || ApiError::Validation("Invalid price".to_string());
    let parsed = match value {
        Value::String(raw) => parse_decimal(raw),
        Value::Number(number) => parse_decimal(&number.to_string()),
        _ => None,
    };

    let mut price = parsed.ok_or_else(invalid)?.round_dp(2);
    if price.abs() >= Decimal::from(PRICE_LIMIT) {
        return Err(invalid());
    }
    price.rescale(2);
    Ok(price)
}

/// Look up a category by name; unknown names are a missing resource.
pub(crate) async fn resolve_category(ctx: &ApiContext, name: &str) -> ApiResult<Category> {
    ctx.categories
        .get_by_name(name)
        .await?
        .ok_or(ApiError::NotFound)
}

/// `GET /products/`
pub async fn list_products(
    State(ctx): State<ApiContext>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<Vec<ProductBody>>> {
    let Query(pairs) = query.map_err(|e| {
        tracing::debug!(error = %e, "Rejected query string");
        ApiError::Validation("Invalid query string".to_string())
    })?;
    let filter = ProductListQuery::from_pairs(pairs).into_filter()?;
    let products = ctx.products.list(&filter).await?;

    tracing::debug!(count = products.len(), filtered = !filter.is_empty(), "Listed products");
    Ok(Json(products.into_iter().map(ProductBody::from).collect()))
}

/// `POST /products/`
pub async fn create_product(
    State(ctx): State<ApiContext>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ProductBody>)> {
    let payload: ProductPayload = parse_json(&body)?;

    let (Some(name), Some(price), Some(category)) = (
        present(payload.name),
        payload.price.filter(|v| !v.is_null()),
        present(payload.category),
    ) else {
        return Err(ApiError::Validation(REQUIRED_FIELDS.to_string()));
    };

    let price = parse_price(&price)?;
    let category = resolve_category(&ctx, &category).await?;
    let new = NewProduct::new(Some(name), payload.description, price, &category)?;

    let product = ctx
        .listings
        .write_products(|| ctx.products.create(&new))
        .await?;

    tracing::info!(product_id = product.id, category = %product.category_name, "Created product");
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// `GET /products/{id}/`
pub async fn get_product(
    State(ctx): State<ApiContext>,
    ItemId(id): ItemId,
) -> ApiResult<Json<ProductBody>> {
    let product = ctx.products.get_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(product.into()))
}

/// `PUT /products/{id}/`
pub async fn update_product(
    State(ctx): State<ApiContext>,
    ItemId(id): ItemId,
    body: Bytes,
) -> ApiResult<Json<ProductBody>> {
    let mut product = ctx.products.get_by_id(id).await?.ok_or(ApiError::NotFound)?;

    let payload: ProductPayload = parse_json(&body)?;
    let price = payload
        .price
        .filter(|v| !v.is_null())
        .map(|v| parse_price(&v))
        .transpose()?;
    let category = match payload.category {
        Some(name) => Some(resolve_category(&ctx, &name).await?),
        None => None,
    };

    ProductPatch {
        name: payload.name,
        description: payload.description,
        price,
        category,
    }
    .apply(&mut product)?;

    let product = ctx
        .listings
        .write_products(|| ctx.products.update(&product))
        .await?;

    tracing::info!(product_id = product.id, "Updated product");
    Ok(Json(product.into()))
}

/// `DELETE /products/{id}/`
pub async fn delete_product(
    State(ctx): State<ApiContext>,
    ItemId(id): ItemId,
) -> ApiResult<StatusCode> {
    ctx.products.get_by_id(id).await?.ok_or(ApiError::NotFound)?;
    remove_product(&ctx, id).await?;

    tracing::info!(product_id = id, "Deleted product");
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn remove_product(ctx: &ApiContext, id: ProductId) -> ApiResult<()> {
    let deleted = ctx
        .listings
        .write_products(|| ctx.products.delete(id))
        .await?;

    if deleted {
        Ok(())
    } else {
        Err(ApiError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_price_accepts_numbers_and_strings() {
        assert_eq!(parse_price(&json!("19.99")).unwrap().to_string(), "19.99");
        assert_eq!(parse_price(&json!(20)).unwrap().to_string(), "20.00");
        assert_eq!(parse_price(&json!(0)).unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_parse_price_enforces_column_range() {
        assert_eq!(
            parse_price(&json!("99999999.99")).unwrap().to_string(),
            "99999999.99"
        );
        assert!(parse_price(&json!("100000000")).is_err());
        assert!(parse_price(&json!("99999999.999")).is_err());
        assert!(parse_price(&json!(1e20)).is_err());
        assert!(parse_price(&json!("-100000000")).is_err());
    }

    #[test]
    fn test_parse_price_rejects_non_decimals() {
        assert!(matches!(
            parse_price(&json!("cheap")),
            Err(ApiError::Validation(msg)) if msg == "Invalid price"
        ));
        assert!(parse_price(&json!(true)).is_err());
    }

    #[test]
    fn test_query_ignores_blank_values() {
        let query = ProductListQuery {
            category: Some(String::new()),
            price_min: Some(" ".to_string()),
            price_max: None,
        };

        assert!(query.into_filter().unwrap().is_empty());
    }

    #[test]
    fn test_repeated_query_key_keeps_last_value() {
        let pairs = vec![
            ("price_min".to_string(), "1".to_string()),
            ("page".to_string(), "3".to_string()),
            ("price_min".to_string(), "2".to_string()),
        ];
        let filter = ProductListQuery::from_pairs(pairs).into_filter().unwrap();

        assert_eq!(filter.price_min, Some(Decimal::from(2)));
        assert!(filter.category.is_none());
    }

    #[test]
    fn test_query_rejects_bad_bound() {
        let query = ProductListQuery {
            price_max: Some("ten".to_string()),
            ..ProductListQuery::default()
        };

        assert!(matches!(
            query.into_filter(),
            Err(ApiError::Validation(msg)) if msg == "Invalid price_max"
        ));
    }
}
