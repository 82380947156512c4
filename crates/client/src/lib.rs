//! `catalog-client`
//!
//! **Responsibility:** the browser side of the product catalog.
//!
//! This crate provides:
//! - an HTTP client for the five product endpoints
//! - the create/edit form state machine
//! - escaped-by-construction HTML rendering of the product list
//! - a controller tying those together (fetch, render, submit, delete)
//! - a Leptos frontend on `wasm32`
//!
//! Everything except `frontend` is target-independent, so the controller is
//! tested natively against a fake API.
//!
//! The browser bundle is built with `scripts/build-client.sh`
//! (`wasm-pack build --target web`) into `crates/client/pkg`. The API server
//! serves that directory under `/pkg`, and its page shell imports the module
//! and calls `init()`, which runs the frontend's start function.

pub mod api;
pub mod controller;
pub mod form;
pub mod render;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use api::{CatalogApi, ClientError, HttpCatalogApi, ProductInput};
pub use controller::{CardAction, CatalogController, UserPrompt};
pub use form::{Form, FormFields, FormLabels, FormState};
pub use render::{ListView, Markup};
