//! # Store Pages
//!
//! Server-rendered listings and forms under `/store/`. Listings read through
//! the listing cache; every form write goes through the invalidating write
//! path and redirects back to the listing.

pub mod categories;
pub mod products;

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::error::ApiResult;

pub use categories::{
    category_list, create_category_form, delete_category_form, edit_category_form,
    new_category_form, update_category_form,
};
pub use products::{
    create_product_form, delete_product_form, edit_product_form, new_product_form, product_list,
    update_product_form,
};

/// Page shown when a form action cannot be carried out
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub title: &'static str,
    pub message: String,
    pub back_href: &'static str,
}

pub fn render<T: Template>(template: &T) -> ApiResult<Html<String>> {
    Ok(Html(template.render()?))
}

pub fn render_with_status<T: Template>(template: &T, status: StatusCode) -> ApiResult<Response> {
    Ok((status, render(template)?).into_response())
}

/// Keep the submitted value when re-rendering a form.
fn echo(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
