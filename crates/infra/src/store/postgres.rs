//! Postgres-backed product store.
//!
//! Maps onto a single `products` table. The schema is created on startup via
//! [`PostgresProductStore::ensure_schema`] when it does not exist yet.

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use catalog_products::{Product, ProductDraft, ProductId};

use super::{ProductStore, StoreError};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id    BIGSERIAL PRIMARY KEY,
    name  VARCHAR(255) NOT NULL,
    price DOUBLE PRECISION NOT NULL CHECK (price >= 0)
)
"#;

/// Postgres-backed product store.
///
/// The `sqlx` pool is internally reference-counted, so cloning the store is
/// cheap and shares connections.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::debug!("products table ready");
        Ok(())
    }
}

fn row_to_product(row: &PgRow) -> Result<Product, StoreError> {
    let id: i64 = row.try_get("id")?;
    let name: String = row.try_get("name")?;
    let price: f64 = row.try_get("price")?;

    let draft = ProductDraft::new(name, price)
        .map_err(|e| StoreError::InvalidRow(format!("product {id}: {e}")))?;
    Ok(Product::new(ProductId::new(id), draft))
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query("SELECT id, name, price FROM products ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_product).collect()
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query("SELECT id, name, price FROM products WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_product).transpose()
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (name, price)
            VALUES ($1, $2)
            RETURNING id, name, price
            "#,
        )
        .bind(draft.name())
        .bind(draft.price().amount())
        .fetch_one(&self.pool)
        .await?;
        row_to_product(&row)
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, price = $3
            WHERE id = $1
            RETURNING id, name, price
            "#,
        )
        .bind(id.get())
        .bind(draft.name())
        .bind(draft.price().amount())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_product).transpose()
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
