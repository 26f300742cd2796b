//! # Catalog Persistence Library
//!
//! Persistence layer for the storefront catalog service.
//!
//! ## Architecture
//!
//! This crate implements the Repository pattern with pluggable Strategy pattern
//! for the listing cache:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Application Layer                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CatalogListings                          │
//! │      (read-through listings, write-around invalidation)      │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                   │
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │   ListingCache          │   │   Repository Traits          │
//! │  (Redis / in-process)   │   │  (Postgres / in-memory)      │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - `postgres`: Enable the PostgreSQL backend (default)
//! - `redis`: Enable the Redis cache backend (default)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_persistence::{
//!     CatalogListings, ListingCache, PgCategoryRepository, PgClient, PgConfig,
//!     PgProductRepository, RedisCache, DEFAULT_LISTING_TTL,
//! };
//!
//! let pg = Arc::new(PgClient::new(PgConfig::default()).await?);
//! let cache = ListingCache::new(
//!     Arc::new(RedisCache::new("redis://127.0.0.1:6379").await?),
//!     DEFAULT_LISTING_TTL,
//! );
//! let listings = CatalogListings::new(
//!     Arc::new(PgCategoryRepository::new(pg.clone())),
//!     Arc::new(PgProductRepository::new(pg)),
//!     cache,
//! );
//!
//! let categories = listings.categories().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod error;
pub mod listings;
pub mod repository;
pub mod strategy;

// Re-export commonly used types
#[cfg(feature = "redis")]
pub use cache::RedisCache;
pub use cache::{
    CATEGORIES_KEY, CacheBackend, DEFAULT_LISTING_TTL, ListingCache, MemoryCache, PRODUCTS_KEY,
    SharedCacheBackend,
};
pub use error::{PersistenceError, Result};
pub use listings::CatalogListings;
pub use repository::{CategoryRepository, MemoryCatalog, ProductRepository};
#[cfg(feature = "postgres")]
pub use repository::{PgCategoryRepository, PgClient, PgConfig, PgProductRepository};
pub use strategy::{ReadStrategy, WriteStrategy};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
