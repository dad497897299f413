//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the image REST endpoints and stitches them with Leptos
//! SSR rendering under a single Axum router. The gallery app is served at `/`
//! and its static assets at `/pkg`; the API lives at the root paths the
//! browser client and the CLI both call.

pub mod images;

use std::path::PathBuf;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Uploads above this size are rejected before buffering.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Image API routes shared by the SSR app and external clients.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/images", get(images::list_images).post(images::upload_image))
        .route("/images/{id}", get(images::get_image))
        .route("/images/{id}/file", get(images::get_image_file))
        .route("/images/{id}/review", post(images::review_image))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Full application router: image API + Leptos SSR gallery + `/pkg` assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded.
pub fn app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
