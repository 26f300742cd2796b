//! # Storefront Catalog - Domain Model
//!
//! Core entities, write payloads and query filters for the storefront
//! catalog. These types are shared by the persistence layer and the HTTP
//! service.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Database identifier of a category
pub type CategoryId = i64;

/// Database identifier of a product
pub type ProductId = i64;

// =============================================================================
// CATEGORY
// =============================================================================

/// Category entity - groups products under a unique-by-convention name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
}

/// Validated payload for creating a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

impl NewCategory {
    /// Build a new category payload. The name must not be blank; a missing
    /// description becomes the empty string.
    pub fn new(name: Option<String>, description: Option<String>) -> Result<Self, DomainError> {
        let name = require_name(name)?;
        Ok(Self {
            name,
            description: description.unwrap_or_default(),
        })
    }
}

/// Partial update for a category. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CategoryPatch {
    /// Overwrite the fields present in the patch.
    pub fn apply(self, category: &mut Category) -> Result<(), DomainError> {
        if let Some(name) = self.name {
            category.name = require_name(Some(name))?;
        }
        if let Some(description) = self.description {
            category.description = description;
        }
        Ok(())
    }
}

// =============================================================================
// PRODUCT
// =============================================================================

/// Product entity with its category resolved to a name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: CategoryId,
    pub category_name: String,

    // Metadata
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated payload for creating a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: CategoryId,
}

impl NewProduct {
    pub fn new(
        name: Option<String>,
        description: Option<String>,
        price: Decimal,
        category: &Category,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            name: require_name(name)?,
            description: description.unwrap_or_default(),
            price,
            category_id: category.id,
        })
    }
}

/// Partial update for a product. The category, when present, has already
/// been resolved by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<Category>,
}

impl ProductPatch {
    /// Overwrite the fields present in the patch. Timestamps are left to the
    /// store.
    pub fn apply(self, product: &mut Product) -> Result<(), DomainError> {
        if let Some(name) = self.name {
            product.name = require_name(Some(name))?;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = self.category {
            product.category_id = category.id;
            product.category_name = category.name;
        }
        Ok(())
    }
}

// =============================================================================
// QUERY/FILTER TYPES
// =============================================================================

/// Conjunctive product list filter. Every `None` bound is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Exact category name
    pub category: Option<String>,
    /// Inclusive lower price bound
    pub price_min: Option<Decimal>,
    /// Inclusive upper price bound
    pub price_max: Option<Decimal>,
}

impl ProductFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.price_min.is_none() && self.price_max.is_none()
    }

    /// Evaluate the filter against a single product.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|name| product.category_name == name);
        let min_ok = self.price_min.is_none_or(|min| product.price >= min);
        let max_ok = self.price_max.is_none_or(|max| product.price <= max);

        category_ok && min_ok && max_ok
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
}

fn require_name(name: Option<String>) -> Result<String, DomainError> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(DomainError::Validation("Name is required".to_string())),
    }
}
