//! REST API helpers for the image service.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs, since the gallery only fetches in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures surface as user-facing Hebrew strings rather than error types;
//! the page renders them directly in the notice area.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::ImageRecord;

/// Message shown when the record listing cannot be fetched.
pub const LOAD_FAILED: &str = "לא ניתן לטעון תמונות";
/// Fallback when an upload fails without a usable `detail` payload.
pub const UPLOAD_FAILED: &str = "ההעלאה נכשלה";

const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Base URL of the image API.
///
/// `API_BASE_URL` is baked in at compile time when set; trailing slashes are
/// trimmed so path joins stay clean.
#[must_use]
pub fn api_base() -> &'static str {
    match option_env!("API_BASE_URL") {
        Some(base) => base.trim_end_matches('/'),
        None => DEFAULT_API_BASE,
    }
}

/// URL of the stored image bytes, for `<img src>`.
#[must_use]
pub fn image_file_url(id: i64) -> String {
    format!("{}/images/{id}/file", api_base())
}

#[cfg(any(test, feature = "hydrate"))]
fn images_endpoint() -> String {
    format!("{}/images", api_base())
}

/// Extract the server's `detail` message from an upload error body.
/// Anything unusable falls back to the fixed upload message.
#[cfg(any(test, feature = "hydrate"))]
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|payload| {
            payload
                .get("detail")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .filter(|detail| !detail.is_empty())
        .unwrap_or_else(|| UPLOAD_FAILED.to_owned())
}

/// Fetch every stored image record, oldest first.
///
/// # Errors
///
/// Returns the fixed Hebrew load-failure message on any transport, status,
/// or decode problem.
pub async fn fetch_images() -> Result<Vec<ImageRecord>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&images_endpoint())
            .send()
            .await
            .map_err(|_| LOAD_FAILED.to_owned())?;
        if !resp.ok() {
            return Err(LOAD_FAILED.to_owned());
        }
        resp.json::<Vec<ImageRecord>>()
            .await
            .map_err(|_| LOAD_FAILED.to_owned())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Ok(Vec::new())
    }
}

/// Upload one image file plus its non-blank metadata fields.
///
/// # Errors
///
/// On a non-2xx response, returns the server's `detail` message (or the
/// fixed fallback). Transport failures return the browser's error text.
#[cfg(feature = "hydrate")]
pub async fn upload_image(
    file: &web_sys::File,
    fields: &[(&str, String)],
) -> Result<ImageRecord, String> {
    let form = web_sys::FormData::new().map_err(|_| UPLOAD_FAILED.to_owned())?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| UPLOAD_FAILED.to_owned())?;
    for (key, value) in fields {
        form.append_with_str(key, value)
            .map_err(|_| UPLOAD_FAILED.to_owned())?;
    }

    let resp = gloo_net::http::Request::post(&images_endpoint())
        .body(form)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !resp.ok() {
        let body = resp.text().await.unwrap_or_default();
        return Err(error_detail(&body));
    }
    resp.json::<ImageRecord>().await.map_err(|e| e.to_string())
}
