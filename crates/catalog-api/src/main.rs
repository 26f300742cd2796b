//! # Storefront Catalog API Server
//!
//! Binary entry point for the catalog HTTP service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_api::{ApiContextBuilder, Config, RouterOptions, build_router};
use catalog_persistence::{
    CategoryRepository, MemoryCache, MemoryCatalog, PgCategoryRepository, PgClient, PgConfig,
    PgProductRepository, ProductRepository, RedisCache, SharedCacheBackend,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!(
        version = catalog_api::VERSION,
        "Starting Storefront Catalog API"
    );

    let (categories, products) = connect_store(&config).await?;
    let cache = connect_cache(&config).await?;

    // Build API context
    let api_ctx = ApiContextBuilder::new()
        .with_repositories(categories, products)
        .with_cache(cache)
        .with_cache_ttl(config.cache.ttl)
        .cache_enabled(config.cache.enabled)
        .build()
        .map_err(anyhow::Error::msg)?;

    tracing::info!(
        cache_enabled = config.cache.enabled,
        ttl_secs = config.cache.ttl.as_secs(),
        "Listing cache configured"
    );

    // Build router
    let app = build_router(api_ctx, &RouterOptions::from(&config));

    // Start server
    let addr = config.server_addr;
    tracing::info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Store pages available at http://{}/store/products/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// PostgreSQL when `DATABASE_URL` is set, otherwise the in-memory store
async fn connect_store(
    config: &Config,
) -> anyhow::Result<(Arc<dyn CategoryRepository>, Arc<dyn ProductRepository>)> {
    let Some(url) = config.database.url.clone() else {
        tracing::warn!("DATABASE_URL not set, using in-memory catalog (data is not persisted)");
        let store = Arc::new(MemoryCatalog::new());
        let categories: Arc<dyn CategoryRepository> = store.clone();
        let products: Arc<dyn ProductRepository> = store;
        return Ok((categories, products));
    };

    tracing::info!(
        max_connections = config.database.max_connections,
        "Connecting to PostgreSQL"
    );

    let pg = PgClient::new(PgConfig {
        url,
        max_connections: config.database.max_connections,
        ..PgConfig::default()
    })
    .await?;

    if config.database.run_migrations {
        pg.migrate().await?;
        tracing::info!("Migrations applied");
    }

    tracing::info!("PostgreSQL connected");
    let pg = Arc::new(pg);
    let categories: Arc<dyn CategoryRepository> = Arc::new(PgCategoryRepository::new(pg.clone()));
    let products: Arc<dyn ProductRepository> = Arc::new(PgProductRepository::new(pg));
    Ok((categories, products))
}

/// Redis when `REDIS_URL` is set, otherwise an in-process cache
async fn connect_cache(config: &Config) -> anyhow::Result<SharedCacheBackend> {
    let Some(url) = config.cache.redis_url.as_deref() else {
        tracing::info!("REDIS_URL not set, using in-process listing cache");
        return Ok(Arc::new(MemoryCache::new()));
    };

    tracing::info!("Connecting to Redis");
    let cache = RedisCache::new(url).await?;
    tracing::info!("Redis connected");
    Ok(Arc::new(cache))
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
