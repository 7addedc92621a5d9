use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;

/// Shared by every handler. Holds no per-request data: each request takes its
/// own [`crate::db::Session`] from the store.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub store: Store,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
