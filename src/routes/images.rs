//! Image REST routes: upload, listing, record fetch, file download, review.
//!
//! DESIGN
//! ======
//! Handlers translate HTTP to service calls and back. All error responses
//! carry a JSON body of the form `{"detail": "..."}` with a Hebrew,
//! user-facing message; the gallery client shows `detail` verbatim.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::image::{self, ImageError, ImageRow, ListFilter, NewImage};
use crate::services::review::{self, ReviewError, ReviewOutcome, ReviewRequest};
use crate::services::storage;
use crate::state::AppState;

#[cfg(test)]
#[path = "images_test.rs"]
mod images_test;

// =============================================================================
// ERROR RESPONSES
// =============================================================================

/// Hebrew `detail` strings returned to clients.
pub(crate) mod detail {
    pub const NOT_AN_IMAGE: &str = "הקובץ חייב להיות תמונה";
    pub const MISSING_FILE: &str = "חסר קובץ תמונה";
    pub const BAD_UPLOAD: &str = "בקשת העלאה לא תקינה";
    pub const IMAGE_NOT_FOUND: &str = "תמונה לא נמצאה";
    pub const FILE_NOT_FOUND: &str = "קובץ תמונה לא נמצא";
    pub const REVIEW_FAILED: &str = "הביקורת האוטומטית נכשלה";
    pub const INTERNAL: &str = "שגיאת שרת פנימית";
}

/// API error: HTTP status plus a user-facing `detail` message, serialized
/// as `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self { status, detail: detail.into() }
    }

    fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail::INTERNAL)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}

impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::NotFound(_) => Self::not_found(detail::IMAGE_NOT_FOUND),
            ImageError::Database(e) => {
                tracing::error!(error = %e, "database error");
                Self::internal()
            }
        }
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::Image(e) => e.into(),
            ReviewError::Llm(e) => {
                tracing::error!(error = %e, "llm review failed");
                Self::new(StatusCode::BAD_GATEWAY, detail::REVIEW_FAILED)
            }
        }
    }
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

/// An image record as returned to clients. The server-local `stored_path`
/// is deliberately excluded.
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub id: i64,
    pub filename: String,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub subject: Option<String>,
    pub owner_name: Option<String>,
    pub location: Option<String>,
    pub guide_name: Option<String>,
    pub notes: Option<String>,
    pub llm_review: Option<String>,
    pub llm_reviewed_at: Option<DateTime<Utc>>,
}

fn to_response(row: ImageRow) -> ImageResponse {
    ImageResponse {
        id: row.id,
        filename: row.filename,
        content_type: row.content_type,
        uploaded_at: row.uploaded_at,
        subject: row.subject,
        owner_name: row.owner_name,
        location: row.location,
        guide_name: row.guide_name,
        notes: row.notes,
        llm_review: row.llm_review,
        llm_reviewed_at: row.llm_reviewed_at,
    }
}

// =============================================================================
// UPLOAD
// =============================================================================

#[derive(Debug)]
struct UploadedFile {
    filename: String,
    content_type: String,
    bytes: axum::body::Bytes,
}

#[derive(Default)]
struct MetadataFields {
    subject: Option<String>,
    owner_name: Option<String>,
    location: Option<String>,
    guide_name: Option<String>,
    notes: Option<String>,
}

/// Accept or reject a parsed upload before anything touches disk: the
/// `file` part is required and must carry an `image/*` content type.
fn validate_upload(file: Option<UploadedFile>) -> Result<UploadedFile, ApiError> {
    let Some(file) = file else {
        return Err(ApiError::bad_request(detail::MISSING_FILE));
    };
    if !file.content_type.starts_with("image/") {
        return Err(ApiError::bad_request(detail::NOT_AN_IMAGE));
    }
    Ok(file)
}

/// `POST /images` — store an uploaded photo plus its metadata.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImageResponse>, ApiError> {
    let mut file: Option<UploadedFile> = None;
    let mut fields = MetadataFields::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_owned();
                let content_type = field.content_type().unwrap_or_default().to_owned();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                file = Some(UploadedFile { filename, content_type, bytes });
            }
            "subject" => fields.subject = text_field(field).await?,
            "owner_name" => fields.owner_name = text_field(field).await?,
            "location" => fields.location = text_field(field).await?,
            "guide_name" => fields.guide_name = text_field(field).await?,
            "notes" => fields.notes = text_field(field).await?,
            _ => {}
        }
    }

    let file = validate_upload(file)?;

    let now = Utc::now();
    let stored = storage::stored_name(now, &file.filename);
    let stored_path = storage::write_upload(&state.upload_dir, &stored, &file.bytes)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to store upload");
            ApiError::internal()
        })?;

    let size = file.bytes.len();
    let new = NewImage {
        filename: file.filename,
        content_type: file.content_type,
        subject: fields.subject,
        owner_name: fields.owner_name,
        location: fields.location,
        guide_name: fields.guide_name,
        notes: fields.notes,
        stored_path: stored_path.to_string_lossy().into_owned(),
    };
    let row = image::create_image(&state.pool, &new).await?;

    tracing::info!(id = row.id, filename = %row.filename, size, "image uploaded");
    Ok(Json(to_response(row)))
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> ApiError {
    tracing::warn!(error = %err, "multipart read failed");
    ApiError::bad_request(detail::BAD_UPLOAD)
}

/// Read a text metadata field. Empty values count as absent, matching how
/// the gallery form skips blank inputs.
async fn text_field(field: axum::extract::multipart::Field<'_>) -> Result<Option<String>, ApiError> {
    let text = field.text().await.map_err(bad_multipart)?;
    Ok(if text.is_empty() { None } else { Some(text) })
}

// =============================================================================
// LISTING
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ListImagesQuery {
    pub subject: Option<String>,
    pub owner_name: Option<String>,
    pub location: Option<String>,
    pub guide_name: Option<String>,
    pub uploaded_from: Option<DateTime<Utc>>,
    pub uploaded_to: Option<DateTime<Utc>>,
}

fn to_filter(query: ListImagesQuery) -> ListFilter {
    ListFilter {
        subject: none_if_empty(query.subject),
        owner_name: none_if_empty(query.owner_name),
        location: none_if_empty(query.location),
        guide_name: none_if_empty(query.guide_name),
        uploaded_from: query.uploaded_from,
        uploaded_to: query.uploaded_to,
    }
}

fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// `GET /images` — list records, optionally filtered.
pub async fn list_images(
    State(state): State<AppState>,
    Query(query): Query<ListImagesQuery>,
) -> Result<Json<Vec<ImageResponse>>, ApiError> {
    let rows = image::list_images(&state.pool, &to_filter(query)).await?;
    Ok(Json(rows.into_iter().map(to_response).collect()))
}

// =============================================================================
// SINGLE RECORD + FILE
// =============================================================================

/// `GET /images/{id}` — fetch one record.
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ImageResponse>, ApiError> {
    let row = image::get_image(&state.pool, id).await?;
    Ok(Json(to_response(row)))
}

/// `GET /images/{id}/file` — the stored bytes, served for `<img>` tags.
pub async fn get_image_file(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let row = image::get_image(&state.pool, id).await?;

    let bytes = tokio::fs::read(&row.stored_path)
        .await
        .map_err(|_| ApiError::not_found(detail::FILE_NOT_FOUND))?;

    Ok((
        [
            (CONTENT_TYPE, row.content_type.as_str()),
            (CONTENT_DISPOSITION, &content_disposition(&row.filename)),
        ],
        bytes,
    )
        .into_response())
}

/// Header values must be printable ASCII. Quotes and backslashes are
/// escaped for the quoted-string form; names outside that range drop the
/// filename parameter rather than failing the response.
fn content_disposition(filename: &str) -> String {
    let printable = filename.is_ascii() && !filename.bytes().any(|b| b.is_ascii_control());
    if printable {
        let escaped = filename.replace('\\', "\\\\").replace('"', "\\\"");
        format!("inline; filename=\"{escaped}\"")
    } else {
        "inline".to_owned()
    }
}

// =============================================================================
// REVIEW
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    pub criteria: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_tone() -> String {
    "מקצועי".to_owned()
}

fn default_language() -> String {
    "עברית".to_owned()
}

/// `POST /images/{id}/review` — ask the LLM to review the record metadata.
pub async fn review_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ReviewBody>,
) -> Result<Json<ReviewOutcome>, ApiError> {
    let request = ReviewRequest { criteria: body.criteria, tone: body.tone, language: body.language };
    let outcome = review::review_image(&state, id, &request).await?;
    Ok(Json(outcome))
}
