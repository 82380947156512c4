//! Leptos frontend for the product page.

pub mod app;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// WASM entry point for the frontend.
/// Replaces the server-rendered contents of `#app` with the live app.
#[wasm_bindgen(start)]
pub fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();
    // Route `tracing` events to the browser console.
    let _ = tracing_wasm::try_set_as_global_default();

    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

    match root {
        Some(root) => {
            root.set_inner_html("");
            leptos::mount_to(root, app::App);
        }
        None => leptos::mount_to_body(app::App),
    }
}
