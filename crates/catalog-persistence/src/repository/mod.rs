//! # Repository Module
//!
//! Repository pattern implementations for catalog entity persistence.

pub mod memory_impl;
#[cfg(feature = "postgres")]
pub mod postgres_impl;
pub mod traits;

pub use memory_impl::MemoryCatalog;
#[cfg(feature = "postgres")]
pub use postgres_impl::{PgCategoryRepository, PgClient, PgConfig, PgProductRepository};
pub use traits::{CategoryRepository, ProductRepository};
