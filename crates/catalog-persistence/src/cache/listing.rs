//! Typed access to the storefront listing entries.

use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

use super::backend::SharedCacheBackend;
use crate::error::Result;

/// Cache key of the full category listing
pub const CATEGORIES_KEY: &str = "store:categories";

/// Cache key of the full product listing
pub const PRODUCTS_KEY: &str = "store:products";

/// Listing entry lifetime
pub const DEFAULT_LISTING_TTL: Duration = Duration::from_secs(300);

/// JSON-encoded listings stored in a [`CacheBackend`](super::CacheBackend)
#[derive(Clone)]
pub struct ListingCache {
    backend: SharedCacheBackend,
    ttl: Duration,
}

impl ListingCache {
    pub fn new(backend: SharedCacheBackend, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a JSON value from cache
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.backend.get(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Set a JSON value in cache with the listing TTL
    pub async fn set_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.backend.set(key, json, self.ttl).await
    }

    /// Delete every key, stopping at the first failure
    pub async fn invalidate(&self, keys: &[&str]) -> Result<()> {
        for &key in keys {
            let removed = self.backend.delete(key).await?;
            tracing::debug!(key, removed, "Invalidated listing");
        }
        Ok(())
    }
}
