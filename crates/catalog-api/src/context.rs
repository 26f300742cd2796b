//! # API Context
//!
//! Application state and dependency injection for handlers and views.

use std::sync::Arc;
use std::time::Duration;

use catalog_persistence::{
    CatalogListings, CategoryRepository, DEFAULT_LISTING_TTL, ListingCache, MemoryCache,
    MemoryCatalog, ProductRepository, ReadStrategy, SharedCacheBackend, WriteStrategy,
};

/// Application context shared across all handlers
#[derive(Clone)]
pub struct ApiContext {
    /// Category repository
    pub categories: Arc<dyn CategoryRepository>,

    /// Product repository
    pub products: Arc<dyn ProductRepository>,

    /// Cached listings and the invalidating write path
    pub listings: Arc<CatalogListings>,
}

impl ApiContext {
    /// Create a new API context with real dependencies
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
        listings: CatalogListings,
    ) -> Self {
        Self {
            categories,
            products,
            listings: Arc::new(listings),
        }
    }

    /// Context over the in-memory store and an in-process cache
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryCatalog::new());
        let cache = ListingCache::new(Arc::new(MemoryCache::new()), DEFAULT_LISTING_TTL);
        let listings = CatalogListings::new(store.clone(), store.clone(), cache);
        Self::new(store.clone(), store, listings)
    }
}

/// Builder for ApiContext
pub struct ApiContextBuilder {
    categories: Option<Arc<dyn CategoryRepository>>,
    products: Option<Arc<dyn ProductRepository>>,
    cache: Option<SharedCacheBackend>,
    cache_ttl: Duration,
    cache_enabled: bool,
}

impl ApiContextBuilder {
    pub fn new() -> Self {
        Self {
            categories: None,
            products: None,
            cache: None,
            cache_ttl: DEFAULT_LISTING_TTL,
            cache_enabled: true,
        }
    }

    pub fn with_repositories(
        mut self,
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        self.categories = Some(categories);
        self.products = Some(products);
        self
    }

    pub fn with_cache(mut self, cache: SharedCacheBackend) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// A disabled cache switches both strategies to `DbOnly`
    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn build(self) -> Result<ApiContext, &'static str> {
        let categories = self.categories.ok_or("Category repository required")?;
        let products = self.products.ok_or("Product repository required")?;
        let cache = self.cache.ok_or("Cache backend required")?;

        let (read, write) = if self.cache_enabled {
            (ReadStrategy::CacheFirst, WriteStrategy::WriteAround)
        } else {
            (ReadStrategy::DbOnly, WriteStrategy::DbOnly)
        };

        let listings = CatalogListings::with_strategies(
            categories.clone(),
            products.clone(),
            ListingCache::new(cache, self.cache_ttl),
            read,
            write,
        );

        Ok(ApiContext::new(categories, products, listings))
    }
}

impl Default for ApiContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
