use std::sync::Arc;

use sqlx::PgPool;

use blog_core::repository::PostRepository;
use blog_core::storage::AssetStore;

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State`
/// extractor. Wrapped in `Arc` so cloning is cheap. The repository and
/// asset store are injected as trait objects; handlers never see the
/// concrete backends.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    pool: PgPool,
    config: AppConfig,
    repository: Arc<dyn PostRepository>,
    asset_store: Arc<dyn AssetStore>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: AppConfig,
        repository: Arc<dyn PostRepository>,
        asset_store: Arc<dyn AssetStore>,
    ) -> Self {
        Self {
            inner: Arc::new(InnerState {
                pool,
                config,
                repository,
                asset_store,
            }),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn repository(&self) -> &dyn PostRepository {
        self.inner.repository.as_ref()
    }

    pub fn asset_store(&self) -> &dyn AssetStore {
        self.inner.asset_store.as_ref()
    }
}
