use std::sync::Arc;

use catalog_infra::{AppConfig, InMemoryProductStore, PostgresProductStore, ProductStore, StoreError};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn ProductStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn ProductStore {
        self.store.as_ref()
    }
}

/// Pick the store: Postgres when `DATABASE_URL` is set, memory otherwise.
pub async fn build_services(config: &AppConfig) -> Result<AppServices, StoreError> {
    let store: Arc<dyn ProductStore> = match &config.database_url {
        Some(url) => {
            let store = PostgresProductStore::connect(url, config.db_max_connections).await?;
            store.ensure_schema().await?;
            tracing::info!(max_connections = config.db_max_connections, "using postgres product store");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; products are kept in memory and lost on restart");
            Arc::new(InMemoryProductStore::new())
        }
    };

    Ok(AppServices::new(store))
}
