//! # client
//!
//! Leptos + WASM frontend for the photo upload and gallery application.
//!
//! This crate contains the gallery page, its components, shared signal
//! state, and the REST client for the image API. The server renders it via
//! `leptos_axum` and the browser hydrates it as a WASM bundle.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;

/// WASM entry point: hydrate the server-rendered page in the browser.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
