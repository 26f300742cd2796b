//! Cache backend abstraction and the in-process implementation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::Result;

/// Key-value store holding serialized values with an expiry.
///
/// Implementations must be safe for concurrent use; last writer wins.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Get the value stored under `key`, or `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key` for `ttl`
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    /// Remove `key`. Returns whether a live entry was removed.
    async fn delete(&self, key: &str) -> Result<bool>;
}

/// Shared cache backend handle
pub type SharedCacheBackend = Arc<dyn CacheBackend>;

/// Process-local cache with per-entry expiry
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), (value, Instant::now() + ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.lock().await;
        Ok(entries
            .remove(key)
            .is_some_and(|(_, expires_at)| expires_at > Instant::now()))
    }
}
