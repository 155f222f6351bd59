//! In-memory caching using moka
//!
//! Holds the resolved tour type catalog. Tour types change rarely, so the
//! catalog is refreshed in the background instead of per request.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::estimator::TourCatalog;
use crate::tour_requests::services;

/// Key of the single catalog entry
pub const CATALOG_KEY: &str = "catalog";

/// Application cache
#[derive(Clone)]
pub struct AppCache {
    /// Tour catalog (singleton under [`CATALOG_KEY`])
    pub catalog: Cache<String, Arc<TourCatalog>>,
}

impl AppCache {
    /// Create a cache whose catalog entry expires after `catalog_ttl`
    pub fn new(catalog_ttl: Duration) -> Self {
        Self {
            catalog: Cache::builder()
                .max_capacity(1)
                .time_to_live(catalog_ttl)
                .build(),
        }
    }

    /// Cached catalog, if present
    pub async fn catalog(&self) -> Option<Arc<TourCatalog>> {
        self.catalog.get(CATALOG_KEY).await
    }

    /// Replace the cached catalog
    pub async fn store_catalog(&self, catalog: Arc<TourCatalog>) {
        self.catalog.insert(CATALOG_KEY.to_string(), catalog).await;
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            catalog_cached: self.catalog.entry_count() > 0,
        }
    }
}

impl Default for AppCache {
    fn default() -> Self {
        // Twice the default refresh interval
        Self::new(Duration::from_secs(20 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub catalog_cached: bool,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every `every`.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool, every: Duration) {
    let mut interval = interval(every);
    loop {
        // First tick completes immediately
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Reload the tour catalog from the database
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    match services::load_catalog(db).await {
        Ok(catalog) => {
            info!("Loaded {} tour types", catalog.len());
            cache.store_catalog(Arc::new(catalog)).await;
        }
        Err(e) => warn!("Failed to warm tour catalog cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_read_catalog() {
        let cache = AppCache::default();
        assert!(cache.catalog().await.is_none());

        cache.store_catalog(Arc::new(TourCatalog::builtin())).await;

        let catalog = cache.catalog().await.unwrap();
        assert!(catalog.resolve("Luxury").is_some());
    }
}
