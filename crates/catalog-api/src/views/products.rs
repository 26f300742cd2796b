//! Product listing and form pages.

use askama::Template;
use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use super::{echo, render, render_with_status};
use crate::context::ApiContext;
use crate::error::{ApiError, ApiResult};
use crate::handlers::ItemId;
use crate::handlers::products::{parse_price, remove_product};
use catalog_domain::{Category, NewProduct, Product, ProductPatch};

const LISTING: &str = "/store/products/";

#[derive(Template)]
#[template(path = "products_list.html")]
pub struct ProductListPage {
    pub products: Vec<Product>,
}

/// Entry of the category select box
pub struct CategoryOption {
    pub name: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "product_form.html")]
pub struct ProductFormPage {
    pub heading: &'static str,
    pub action: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub categories: Vec<CategoryOption>,
    pub error: Option<String>,
}

impl ProductFormPage {
    fn create(categories: &[Category]) -> Self {
        Self {
            heading: "New product",
            action: "/store/products/new/".to_string(),
            name: String::new(),
            description: String::new(),
            price: String::new(),
            categories: options(categories, None),
            error: None,
        }
    }

    fn edit(product: &Product, categories: &[Category]) -> Self {
        Self {
            heading: "Edit product",
            action: format!("/store/products/{}/edit/", product.id),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            categories: options(categories, Some(&product.category_name)),
            error: None,
        }
    }

    fn rejected(self, form: &ProductForm, categories: &[Category], message: String) -> Self {
        Self {
            name: echo(&form.name),
            description: echo(&form.description),
            price: echo(&form.price),
            categories: options(categories, form.category.as_deref()),
            error: Some(message),
            ..self
        }
    }
}

fn options(categories: &[Category], selected: Option<&str>) -> Vec<CategoryOption> {
    categories
        .iter()
        .map(|category| CategoryOption {
            name: category.name.clone(),
            selected: selected == Some(category.name.as_str()),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
}

/// A fully validated form submission
struct ValidProduct {
    name: String,
    description: String,
    price: Decimal,
    category: Category,
}

impl ProductForm {
    /// Every field is required except the description. The category must be
    /// one of the listed ones.
    fn validate(&self, categories: &[Category]) -> Result<ValidProduct, String> {
        let name = self
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| "Name is required".to_string())?;

        let price = self
            .price
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| "Price is required".to_string())?;
        let price = parse_price(&Value::String(price.to_string()))
            .map_err(|_| "Enter a valid price".to_string())?;

        let category = self
            .category
            .as_deref()
            .and_then(|wanted| categories.iter().find(|c| c.name == wanted))
            .cloned()
            .ok_or_else(|| "Select a valid category".to_string())?;

        Ok(ValidProduct {
            name,
            description: self.description.clone().unwrap_or_default(),
            price,
            category,
        })
    }
}

/// `GET /store/products/`
pub async fn product_list(State(ctx): State<ApiContext>) -> ApiResult<Html<String>> {
    let products = ctx.listings.products().await?;
    render(&ProductListPage { products })
}

/// `GET /store/products/new/`
pub async fn new_product_form(State(ctx): State<ApiContext>) -> ApiResult<Html<String>> {
    let categories = ctx.listings.categories().await?;
    render(&ProductFormPage::create(&categories))
}

/// `POST /store/products/new/`
pub async fn create_product_form(
    State(ctx): State<ApiContext>,
    Form(form): Form<ProductForm>,
) -> ApiResult<Response> {
    let categories = ctx.categories.list().await?;
    let valid = match form.validate(&categories) {
        Ok(valid) => valid,
        Err(message) => {
            let page = ProductFormPage::create(&categories).rejected(&form, &categories, message);
            return render_with_status(&page, StatusCode::BAD_REQUEST);
        }
    };

    let new = NewProduct::new(
        Some(valid.name),
        Some(valid.description),
        valid.price,
        &valid.category,
    )?;
    let product = ctx
        .listings
        .write_products(|| ctx.products.create(&new))
        .await?;

    tracing::info!(product_id = product.id, "Created product from form");
    Ok(Redirect::to(LISTING).into_response())
}

/// `GET /store/products/{id}/edit/`
pub async fn edit_product_form(
    State(ctx): State<ApiContext>,
    ItemId(id): ItemId,
) -> ApiResult<Html<String>> {
    let product = ctx.products.get_by_id(id).await?.ok_or(ApiError::NotFound)?;
    let categories = ctx.listings.categories().await?;
    render(&ProductFormPage::edit(&product, &categories))
}

/// `POST /store/products/{id}/edit/`
pub async fn update_product_form(
    State(ctx): State<ApiContext>,
    ItemId(id): ItemId,
    Form(form): Form<ProductForm>,
) -> ApiResult<Response> {
    let mut product = ctx.products.get_by_id(id).await?.ok_or(ApiError::NotFound)?;
    let categories = ctx.categories.list().await?;

    let valid = match form.validate(&categories) {
        Ok(valid) => valid,
        Err(message) => {
            let page =
                ProductFormPage::edit(&product, &categories).rejected(&form, &categories, message);
            return render_with_status(&page, StatusCode::BAD_REQUEST);
        }
    };

    ProductPatch {
        name: Some(valid.name),
        description: Some(valid.description),
        price: Some(valid.price),
        category: Some(valid.category),
    }
    .apply(&mut product)?;

    ctx.listings
        .write_products(|| ctx.products.update(&product))
        .await?;

    tracing::info!(product_id = id, "Updated product from form");
    Ok(Redirect::to(LISTING).into_response())
}

/// `POST /store/products/{id}/delete/`
pub async fn delete_product_form(
    State(ctx): State<ApiContext>,
    ItemId(id): ItemId,
) -> ApiResult<Response> {
    ctx.products.get_by_id(id).await?.ok_or(ApiError::NotFound)?;
    remove_product(&ctx, id).await?;

    tracing::info!(product_id = id, "Deleted product from form");
    Ok(Redirect::to(LISTING).into_response())
}
