//! # Repository Traits
//!
//! Abstract repository interfaces for catalog entities.
//! Implementations can be swapped for different backends (Postgres, in-memory, etc.)

use async_trait::async_trait;

use crate::error::Result;
use catalog_domain::{
    Category, CategoryId, NewCategory, NewProduct, Product, ProductFilter, ProductId,
};

// =============================================================================
// CATEGORY REPOSITORY
// =============================================================================

/// Repository for Category entity operations
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Get all categories ordered by id
    async fn list(&self) -> Result<Vec<Category>>;

    /// Get category by ID
    async fn get_by_id(&self, id: CategoryId) -> Result<Option<Category>>;

    /// Get category by exact name. When several share a name the lowest id wins.
    async fn get_by_name(&self, name: &str) -> Result<Option<Category>>;

    /// Create a new category and return it with its assigned id
    async fn create(&self, category: &NewCategory) -> Result<Category>;

    /// Persist name and description of an existing category
    async fn update(&self, category: &Category) -> Result<Category>;

    /// Delete category. Returns `false` when no row matched.
    async fn delete(&self, id: CategoryId) -> Result<bool>;
}

// =============================================================================
// PRODUCT REPOSITORY
// =============================================================================

/// Repository for Product entity operations
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Get products matching every bound of the filter, ordered by id
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>>;

    /// Get product by ID with its category name resolved
    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>>;

    /// Create a new product; timestamps are set by the store
    async fn create(&self, product: &NewProduct) -> Result<Product>;

    /// Persist all mutable fields of an existing product and refresh `updated_at`
    async fn update(&self, product: &Product) -> Result<Product>;

    /// Delete product. Returns `false` when no row matched.
    async fn delete(&self, id: ProductId) -> Result<bool>;
}
