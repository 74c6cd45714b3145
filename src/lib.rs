pub mod cache;
pub mod config;
pub mod controllers;
pub mod generator;
pub mod geometry;
pub mod layout;
pub mod models;
pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use cache::TtlCache;
use models::SeatingLayout;

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub db: storage::LayoutStore,
    pub cache: TtlCache<SeatingLayout>,
    pub config: config::Config,
}

impl AppState {
    pub async fn new(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let db = storage::LayoutStore::new(&config.database.url, config.database.pool_size).await?;

        db.run_migrations().await?;

        let cache = TtlCache::new(Duration::from_secs(config.cache.ttl_seconds));

        Ok(Arc::new(Self { db, cache, config }))
    }
}
