//! HTTP bindings for the product endpoints.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use catalog_products::{Product, ProductId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The form contents could not be turned into a request.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The request never got a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server returned {0}: {1}")]
    Status(u16, String),

    /// The response body was not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Body of a create or update request, exactly as the user entered it.
///
/// Validation is the server's job; the client only guarantees `price` is a
/// finite number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
}

/// The five product operations.
///
/// The client runs on a single-threaded event loop, so futures are not `Send`.
#[async_trait(?Send)]
pub trait CatalogApi {
    async fn list(&self) -> Result<Vec<Product>, ClientError>;
    async fn get(&self, id: ProductId) -> Result<Product, ClientError>;
    async fn create(&self, input: &ProductInput) -> Result<Product, ClientError>;
    async fn update(&self, id: ProductId, input: &ProductInput) -> Result<Product, ClientError>;
    async fn delete(&self, id: ProductId) -> Result<(), ClientError>;
}

#[async_trait(?Send)]
impl<T> CatalogApi for &T
where
    T: CatalogApi + ?Sized,
{
    async fn list(&self) -> Result<Vec<Product>, ClientError> {
        (**self).list().await
    }

    async fn get(&self, id: ProductId) -> Result<Product, ClientError> {
        (**self).get(id).await
    }

    async fn create(&self, input: &ProductInput) -> Result<Product, ClientError> {
        (**self).create(input).await
    }

    async fn update(&self, id: ProductId, input: &ProductInput) -> Result<Product, ClientError> {
        (**self).update(id, input).await
    }

    async fn delete(&self, id: ProductId) -> Result<(), ClientError> {
        (**self).delete(id).await
    }
}

/// [`CatalogApi`] over HTTP with `reqwest` (fetch-backed on `wasm32`).
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCatalogApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn product_url(&self, id: ProductId) -> String {
        format!("{}/products/{}", self.base_url, id)
    }
}

async fn send(req: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
    let resp = req
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        return Err(ClientError::Status(status, resp.text().await.unwrap_or_default()));
    }
    Ok(resp)
}

async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    resp.json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl CatalogApi for HttpCatalogApi {
    async fn list(&self) -> Result<Vec<Product>, ClientError> {
        decode(send(self.client.get(self.products_url())).await?).await
    }

    async fn get(&self, id: ProductId) -> Result<Product, ClientError> {
        decode(send(self.client.get(self.product_url(id))).await?).await
    }

    async fn create(&self, input: &ProductInput) -> Result<Product, ClientError> {
        decode(send(self.client.post(self.products_url()).json(input)).await?).await
    }

    async fn update(&self, id: ProductId, input: &ProductInput) -> Result<Product, ClientError> {
        decode(send(self.client.put(self.product_url(id)).json(input)).await?).await
    }

    async fn delete(&self, id: ProductId) -> Result<(), ClientError> {
        send(self.client.delete(self.product_url(id))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_ignore_trailing_slash() {
        let api = HttpCatalogApi::new("http://localhost:3000/");
        assert_eq!(api.base_url(), "http://localhost:3000");
        assert_eq!(api.products_url(), "http://localhost:3000/products");
        assert_eq!(api.product_url(ProductId::new(3)), "http://localhost:3000/products/3");
    }

    #[test]
    fn input_serializes_as_name_and_price() {
        let input = ProductInput {
            name: "Widget".to_string(),
            price: 9.5,
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            serde_json::json!({ "name": "Widget", "price": 9.5 })
        );
    }
}
