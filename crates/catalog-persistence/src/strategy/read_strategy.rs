//! Read strategy implementations using enum dispatch.

use std::future::Future;

use crate::error::Result;

/// Read strategy enum - determines cache/db access pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadStrategy {
    /// Check cache first, fall back to DB on miss and populate the cache
    #[default]
    CacheFirst,
    /// Only read from database, skip cache
    DbOnly,
}

impl ReadStrategy {
    /// Execute a read operation according to the strategy.
    ///
    /// - `cache_fn`: Async function to read from cache
    /// - `db_fn`: Async function to read from database
    /// - `populate_fn`: Async function to store the DB result in cache
    ///
    /// Any `Some` from the cache is a hit, including an empty collection.
    /// Cache failures are logged and treated as a miss.
    pub async fn read<T, CacheFut, DbFut, PopulateFut>(
        &self,
        cache_fn: impl FnOnce() -> CacheFut,
        db_fn: impl FnOnce() -> DbFut,
        populate_fn: impl FnOnce(T) -> PopulateFut,
    ) -> Result<T>
    where
        T: Clone,
        CacheFut: Future<Output = Result<Option<T>>>,
        DbFut: Future<Output = Result<T>>,
        PopulateFut: Future<Output = Result<()>>,
    {
        match self {
            Self::CacheFirst => {
                match cache_fn().await {
                    Ok(Some(value)) => {
                        tracing::debug!("Cache hit");
                        return Ok(value);
                    }
                    Ok(None) => {
                        tracing::debug!("Cache miss, falling back to DB");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Cache error, falling back to DB");
                    }
                }

                let value = db_fn().await?;

                if let Err(e) = populate_fn(value.clone()).await {
                    tracing::warn!(error = %e, "Failed to populate cache");
                }

                Ok(value)
            }

            Self::DbOnly => db_fn().await,
        }
    }
}
