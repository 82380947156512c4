//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: store selection and shared handler state
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and input mapping helpers
//! - `errors.rs`: consistent error responses

use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

use catalog_infra::{AppConfig, ProductStore, StoreError};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> Result<Router, StoreError> {
    let services = services::build_services(config).await?;

    let static_dir = config.static_dir.as_path();
    if static_dir.join("catalog_client.js").is_file() {
        tracing::info!(dir = %static_dir.display(), "serving frontend bundle under /pkg");
    } else {
        tracing::warn!(
            dir = %static_dir.display(),
            "frontend bundle not found; build it with scripts/build-client.sh or set STATIC_DIR"
        );
    }

    Ok(assemble(services, Some(static_dir)))
}

/// Router over an already-constructed store (tests, embedding).
pub fn build_app_with_store(store: Arc<dyn ProductStore>) -> Router {
    assemble(services::AppServices::new(store), None)
}

fn assemble(services: services::AppServices, static_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route("/", get(routes::system::index))
        .route("/health", get(routes::system::health))
        .merge(routes::router());

    if let Some(dir) = static_dir {
        router = router.nest_service("/pkg", ServeDir::new(dir));
    }

    router.layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::trace_requests))
            .layer(Extension(Arc::new(services))),
    )
}
