//! # Catalog Listings
//!
//! Read-through cached listings and the invalidating write path shared by
//! every catalog mutation.
//!
//! Category writes evict both listings because product listings carry the
//! category name. Product writes evict the product listing only.

use std::future::Future;
use std::sync::Arc;

use crate::cache::{CATEGORIES_KEY, ListingCache, PRODUCTS_KEY};
use crate::error::Result;
use crate::repository::{CategoryRepository, ProductRepository};
use crate::strategy::{ReadStrategy, WriteStrategy};
use catalog_domain::{Category, Product, ProductFilter};

/// Cached catalog listings over the repositories.
pub struct CatalogListings {
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
    cache: ListingCache,
    read_strategy: ReadStrategy,
    write_strategy: WriteStrategy,
}

impl CatalogListings {
    /// Create listings with default strategies.
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
        cache: ListingCache,
    ) -> Self {
        Self::with_strategies(
            categories,
            products,
            cache,
            ReadStrategy::CacheFirst,
            WriteStrategy::WriteAround,
        )
    }

    /// Create with custom strategies.
    pub fn with_strategies(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
        cache: ListingCache,
        read_strategy: ReadStrategy,
        write_strategy: WriteStrategy,
    ) -> Self {
        Self {
            categories,
            products,
            cache,
            read_strategy,
            write_strategy,
        }
    }

    /// Full category listing.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.read_strategy
            .read(
                || self.cache.get_json(CATEGORIES_KEY),
                || self.categories.list(),
                |value: Vec<Category>| async move {
                    self.cache.set_json(CATEGORIES_KEY, &value).await
                },
            )
            .await
    }

    /// Full, unfiltered product listing.
    pub async fn products(&self) -> Result<Vec<Product>> {
        let unfiltered = ProductFilter::default();
        self.read_strategy
            .read(
                || self.cache.get_json(PRODUCTS_KEY),
                || self.products.list(&unfiltered),
                |value: Vec<Product>| async move {
                    self.cache.set_json(PRODUCTS_KEY, &value).await
                },
            )
            .await
    }

    /// Run a category write, then evict both listings.
    pub async fn write_categories<T, Fut>(&self, db_fn: impl FnOnce() -> Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        self.write_strategy
            .write(db_fn, || self.cache.invalidate(&[CATEGORIES_KEY, PRODUCTS_KEY]))
            .await
    }

    /// Run a product write, then evict the product listing.
    pub async fn write_products<T, Fut>(&self, db_fn: impl FnOnce() -> Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        self.write_strategy
            .write(db_fn, || self.cache.invalidate(&[PRODUCTS_KEY]))
            .await
    }
}
