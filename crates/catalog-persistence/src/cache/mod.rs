//! # Cache Module
//!
//! Key-value cache layer for the storefront listing pages.

pub mod backend;
pub mod listing;
#[cfg(feature = "redis")]
pub mod redis_client;

pub use backend::{CacheBackend, MemoryCache, SharedCacheBackend};
pub use listing::{CATEGORIES_KEY, DEFAULT_LISTING_TTL, ListingCache, PRODUCTS_KEY};
#[cfg(feature = "redis")]
pub use redis_client::RedisCache;
