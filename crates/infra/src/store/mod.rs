//! Product persistence abstractions.
//!
//! Handlers only ever see [`ProductStore`]; which backend sits behind it is a
//! startup decision (see `catalog_infra::config`).

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use catalog_products::{Product, ProductDraft, ProductId};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;

/// Persistence failure (connection, query, or a row that fails validation).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),

    #[error("stored row is invalid: {0}")]
    InvalidRow(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(value: sqlx::Error) -> Self {
        Self::Backend(value.to_string())
    }
}

/// Create/read/update/delete by identifier.
///
/// Lookups that miss return `Ok(None)` / `Ok(false)`; `Err` is reserved for
/// backend failures.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Short backend name, reported by the health endpoint.
    fn kind(&self) -> &'static str;

    /// All products, in ascending id order.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Persist a new product; the store assigns its id.
    async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError>;

    /// Replace name and price of an existing product.
    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Option<Product>, StoreError>;

    /// Returns whether a product was removed.
    async fn delete(&self, id: ProductId) -> Result<bool, StoreError>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list().await
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).get(id).await
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        (**self).create(draft).await
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Option<Product>, StoreError> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        (**self).delete(id).await
    }
}
