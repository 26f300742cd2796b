//! Category listing and form pages.

use askama::Template;
use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use super::{ErrorPage, echo, render, render_with_status};
use crate::context::ApiContext;
use crate::error::{ApiError, ApiResult};
use crate::handlers::ItemId;
use crate::handlers::categories::remove_category;
use catalog_domain::{Category, CategoryPatch, DomainError, NewCategory};

const LISTING: &str = "/store/categories/";

#[derive(Template)]
#[template(path = "categories_list.html")]
pub struct CategoryListPage {
    pub categories: Vec<Category>,
}

#[derive(Template)]
#[template(path = "category_form.html")]
pub struct CategoryFormPage {
    pub heading: &'static str,
    pub action: String,
    pub name: String,
    pub description: String,
    pub error: Option<String>,
}

impl CategoryFormPage {
    fn create() -> Self {
        Self {
            heading: "New category",
            action: "/store/categories/new/".to_string(),
            name: String::new(),
            description: String::new(),
            error: None,
        }
    }

    fn edit(category: &Category) -> Self {
        Self {
            heading: "Edit category",
            action: format!("/store/categories/{}/edit/", category.id),
            name: category.name.clone(),
            description: category.description.clone(),
            error: None,
        }
    }

    /// Same form again with the submitted values and the validation message
    fn rejected(self, form: &CategoryForm, err: DomainError) -> Self {
        let DomainError::Validation(message) = err;
        Self {
            name: echo(&form.name),
            description: echo(&form.description),
            error: Some(message),
            ..self
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// `GET /store/categories/`
pub async fn category_list(State(ctx): State<ApiContext>) -> ApiResult<Html<String>> {
    let categories = ctx.listings.categories().await?;
    render(&CategoryListPage { categories })
}

/// `GET /store/categories/new/`
pub async fn new_category_form() -> ApiResult<Html<String>> {
    render(&CategoryFormPage::create())
}

/// `POST /store/categories/new/`
pub async fn create_category_form(
    State(ctx): State<ApiContext>,
    Form(form): Form<CategoryForm>,
) -> ApiResult<Response> {
    let new = match NewCategory::new(form.name.clone(), form.description.clone()) {
        Ok(new) => new,
        Err(err) => {
            let page = CategoryFormPage::create().rejected(&form, err);
            return render_with_status(&page, StatusCode::BAD_REQUEST);
        }
    };

    let category = ctx
        .listings
        .write_categories(|| ctx.categories.create(&new))
        .await?;

    tracing::info!(category_id = category.id, "Created category from form");
    Ok(Redirect::to(LISTING).into_response())
}

/// `GET /store/categories/{id}/edit/`
pub async fn edit_category_form(
    State(ctx): State<ApiContext>,
    ItemId(id): ItemId,
) -> ApiResult<Html<String>> {
    let category = ctx.categories.get_by_id(id).await?.ok_or(ApiError::NotFound)?;
    render(&CategoryFormPage::edit(&category))
}

/// `POST /store/categories/{id}/edit/`
pub async fn update_category_form(
    State(ctx): State<ApiContext>,
    ItemId(id): ItemId,
    Form(form): Form<CategoryForm>,
) -> ApiResult<Response> {
    let mut category = ctx.categories.get_by_id(id).await?.ok_or(ApiError::NotFound)?;
    let page = CategoryFormPage::edit(&category);

    // A bound form submits every field, so a blank name is a validation error
    let patch = CategoryPatch {
        name: Some(echo(&form.name)),
        description: Some(echo(&form.description)),
    };
    if let Err(err) = patch.apply(&mut category) {
        return render_with_status(&page.rejected(&form, err), StatusCode::BAD_REQUEST);
    }

    ctx.listings
        .write_categories(|| ctx.categories.update(&category))
        .await?;

    tracing::info!(category_id = id, "Updated category from form");
    Ok(Redirect::to(LISTING).into_response())
}

/// `POST /store/categories/{id}/delete/`
pub async fn delete_category_form(
    State(ctx): State<ApiContext>,
    ItemId(id): ItemId,
) -> ApiResult<Response> {
    ctx.categories.get_by_id(id).await?.ok_or(ApiError::NotFound)?;

    match remove_category(&ctx, id).await {
        Ok(()) => {
            tracing::info!(category_id = id, "Deleted category from form");
            Ok(Redirect::to(LISTING).into_response())
        }
        Err(ApiError::Conflict(message)) => {
            let page = ErrorPage {
                title: "Category in use",
                message,
                back_href: LISTING,
            };
            render_with_status(&page, StatusCode::CONFLICT)
        }
        Err(err) => Err(err),
    }
}
