use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

use catalog_core::DomainError;
use catalog_products::ProductDraft;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /products` and `PUT /products/:id`.
///
/// Both fields are optional here so that a missing field is reported as a
/// validation error rather than a generic deserialization failure. An `id`
/// in the body is ignored.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl ProductPayload {
    pub fn into_draft(self) -> Result<ProductDraft, DomainError> {
        ProductDraft::from_parts(self.name, self.price)
    }
}

/// Unwrap the JSON extractor and validate, producing a 400 response on failure.
pub fn draft_from_request(
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<ProductDraft, axum::response::Response> {
    let Json(payload) = payload.map_err(errors::rejection_to_response)?;
    payload.into_draft().map_err(errors::domain_error_to_response)
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub store: &'static str,
}
