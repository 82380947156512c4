use std::sync::Arc;

use axum::{extract::Extension, response::Html, Json};
use chrono::Utc;

use catalog_client::form::Form;
use catalog_client::render::{self, ListView};

use crate::app::dto::HealthResponse;
use crate::app::services::AppServices;

pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
        store: services.store().kind(),
    })
}

/// Page shell with the current list rendered server-side.
pub async fn index(Extension(services): Extension<Arc<AppServices>>) -> Html<String> {
    let list = match services.store().list().await {
        Ok(products) => ListView::from_products(products),
        Err(e) => {
            tracing::warn!(error = %e, "could not load products for page shell");
            ListView::LoadFailed
        }
    };

    Html(render::page_shell(&Form::new(), &list).into_string())
}
