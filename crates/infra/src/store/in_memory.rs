use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use catalog_products::{Product, ProductDraft, ProductId};

use super::{ProductStore, StoreError};

#[derive(Debug)]
struct Inner {
    next_id: i64,
    products: BTreeMap<ProductId, Product>,
}

/// In-memory product store for tests/dev.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                products: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    fn kind(&self) -> &'static str {
        "in_memory"
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.products.values().cloned().collect())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.products.get(&id).cloned())
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let id = ProductId::new(inner.next_id);
        inner.next_id += 1;

        let product = Product::new(id, draft);
        inner.products.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Option<Product>, StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        Ok(inner.products.get_mut(&id).map(|product| {
            product.replace(draft);
            product.clone()
        }))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        Ok(inner.products.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, price: f64) -> ProductDraft {
        ProductDraft::new(name, price).unwrap()
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = InMemoryProductStore::new();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids() {
        let store = InMemoryProductStore::new();
        let a = store.create(draft("Widget", 9.5)).await.unwrap();
        let b = store.create(draft("Gadget", 3.0)).await.unwrap();

        assert_ne!(a.id_typed(), b.id_typed());
        assert_eq!(a.id_typed(), ProductId::new(1));

        let fetched = store.get(a.id_typed()).await.unwrap().unwrap();
        assert_eq!(fetched, a);
    }

    #[tokio::test]
    async fn list_is_in_id_order() {
        let store = InMemoryProductStore::new();
        for name in ["c", "a", "b"] {
            store.create(draft(name, 1.0)).await.unwrap();
        }
        let names: Vec<_> = store
            .list()
            .await
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn update_replaces_fields_in_place() {
        let store = InMemoryProductStore::new();
        let created = store.create(draft("Widget", 9.5)).await.unwrap();

        let updated = store
            .update(created.id_typed(), draft("Gadget", 12.25))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id_typed(), created.id_typed());
        assert_eq!(updated.name(), "Gadget");

        let fetched = store.get(created.id_typed()).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn update_of_missing_id_returns_none() {
        let store = InMemoryProductStore::new();
        let res = store.update(ProductId::new(7), draft("x", 1.0)).await.unwrap();
        assert!(res.is_none());
    }

    #[tokio::test]
    async fn delete_removes_and_ids_are_not_reused() {
        let store = InMemoryProductStore::new();
        let a = store.create(draft("Widget", 9.5)).await.unwrap();

        assert!(store.delete(a.id_typed()).await.unwrap());
        assert!(!store.delete(a.id_typed()).await.unwrap());
        assert!(store.get(a.id_typed()).await.unwrap().is_none());

        let b = store.create(draft("Gadget", 1.0)).await.unwrap();
        assert_ne!(a.id_typed(), b.id_typed());
    }
}
