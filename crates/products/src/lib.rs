//! Products domain module.
//!
//! This crate contains the catalog's only entity and its validation rules,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).
//! It is shared by the server and the client, so it must stay wasm-compatible.

pub mod product;

pub use product::{NAME_MAX_LEN, Price, Product, ProductDraft, ProductId};
