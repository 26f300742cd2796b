//! Category collection and item endpoints.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::{ItemId, parse_json};
use crate::context::ApiContext;
use crate::error::{ApiError, ApiResult};
use catalog_domain::{Category, CategoryPatch, NewCategory};
use catalog_persistence::PersistenceError;

pub(crate) const CATEGORY_IN_USE: &str = "Category is still referenced by products";

/// Body of `POST /categories/` and `PUT /categories/{id}/`
#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// `GET /categories/`
pub async fn list_categories(State(ctx): State<ApiContext>) -> ApiResult<Json<Vec<Category>>> {
    let categories = ctx.categories.list().await?;
    Ok(Json(categories))
}

/// `POST /categories/`
pub async fn create_category(
    State(ctx): State<ApiContext>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let payload: CategoryPayload = parse_json(&body)?;
    let new = NewCategory::new(payload.name, payload.description)?;

    let category = ctx
        .listings
        .write_categories(|| ctx.categories.create(&new))
        .await?;

    tracing::info!(category_id = category.id, name = %category.name, "Created category");
    Ok((StatusCode::CREATED, Json(category)))
}

/// `GET /categories/{id}/`
pub async fn get_category(
    State(ctx): State<ApiContext>,
    ItemId(id): ItemId,
) -> ApiResult<Json<Category>> {
    let category = ctx.categories.get_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(category))
}

/// `PUT /categories/{id}/`
pub async fn update_category(
    State(ctx): State<ApiContext>,
    ItemId(id): ItemId,
    body: Bytes,
) -> ApiResult<Json<Category>> {
    let mut category = ctx.categories.get_by_id(id).await?.ok_or(ApiError::NotFound)?;

    let payload: CategoryPayload = parse_json(&body)?;
    CategoryPatch {
        name: payload.name,
        description: payload.description,
    }
    .apply(&mut category)?;

    let category = ctx
        .listings
        .write_categories(|| ctx.categories.update(&category))
        .await?;

    tracing::info!(category_id = category.id, "Updated category");
    Ok(Json(category))
}

/// `DELETE /categories/{id}/`
pub async fn delete_category(
    State(ctx): State<ApiContext>,
    ItemId(id): ItemId,
) -> ApiResult<StatusCode> {
    ctx.categories.get_by_id(id).await?.ok_or(ApiError::NotFound)?;
    remove_category(&ctx, id).await?;

    tracing::info!(category_id = id, "Deleted category");
    Ok(StatusCode::NO_CONTENT)
}

/// Delete through the invalidating write path. Products still pointing at
/// the category block the delete.
pub(crate) async fn remove_category(ctx: &ApiContext, id: i64) -> ApiResult<()> {
    let deleted = ctx
        .listings
        .write_categories(|| ctx.categories.delete(id))
        .await
        .map_err(|e| match e {
            PersistenceError::Conflict(_) => ApiError::Conflict(CATEGORY_IN_USE.to_string()),
            other => ApiError::from(other),
        })?;

    if deleted {
        Ok(())
    } else {
        Err(ApiError::NotFound)
    }
}
