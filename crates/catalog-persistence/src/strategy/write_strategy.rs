//! Write strategy implementations using enum dispatch.

use std::future::Future;

use crate::error::Result;

/// Write strategy enum - determines cache/db write pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteStrategy {
    /// Write to DB, then invalidate the affected cache entries
    #[default]
    WriteAround,
    /// Write to DB only, no cache interaction
    DbOnly,
}

impl WriteStrategy {
    /// Execute a write operation according to the strategy.
    ///
    /// - `db_fn`: Async function performing the write
    /// - `invalidate_fn`: Async function evicting stale cache entries
    ///
    /// Invalidation runs only after the write succeeded and completes before
    /// this returns. Its failure is logged, not propagated.
    pub async fn write<T, DbFut, InvalidateFut>(
        &self,
        db_fn: impl FnOnce() -> DbFut,
        invalidate_fn: impl FnOnce() -> InvalidateFut,
    ) -> Result<T>
    where
        DbFut: Future<Output = Result<T>>,
        InvalidateFut: Future<Output = Result<()>>,
    {
        match self {
            Self::WriteAround => {
                let value = db_fn().await?;

                if let Err(e) = invalidate_fn().await {
                    tracing::warn!(error = %e, "Failed to invalidate cache");
                }

                Ok(value)
            }

            Self::DbOnly => db_fn().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_write_around_invalidates_after_write() {
        let invalidated = Arc::new(AtomicBool::new(false));
        let flag = invalidated.clone();

        let value = WriteStrategy::WriteAround
            .write(
                || async { Ok(42) },
                || {
                    flag.store(true, Ordering::SeqCst);
                    async { Ok(()) }
                },
            )
            .await
            .unwrap();

        assert_eq!(value, 42);
        assert!(invalidated.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_failed_write_skips_invalidation() {
        let invalidated = Arc::new(AtomicBool::new(false));
        let flag = invalidated.clone();

        let result: Result<i32> = WriteStrategy::WriteAround
            .write(
                || async { Err(PersistenceError::Database("down".to_string())) },
                || {
                    flag.store(true, Ordering::SeqCst);
                    async { Ok(()) }
                },
            )
            .await;

        assert!(result.is_err());
        assert!(!invalidated.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_invalidation_failure_keeps_write_result() {
        let value = WriteStrategy::WriteAround
            .write(
                || async { Ok("saved") },
                || async { Err(PersistenceError::Redis("timeout".to_string())) },
            )
            .await
            .unwrap();

        assert_eq!(value, "saved");
    }

    #[tokio::test]
    async fn test_db_only() {
        let invalidated = Arc::new(AtomicBool::new(false));
        let flag = invalidated.clone();

        WriteStrategy::DbOnly
            .write(
                || async { Ok(()) },
                || {
                    flag.store(true, Ordering::SeqCst);
                    async { Ok(()) }
                },
            )
            .await
            .unwrap();

        assert!(!invalidated.load(Ordering::SeqCst)); // Cache NOT touched
    }
}
