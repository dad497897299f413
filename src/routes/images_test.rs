use super::*;

fn sample_row() -> ImageRow {
    ImageRow {
        id: 12,
        filename: "טיול בגולן.jpg".into(),
        content_type: "image/jpeg".into(),
        uploaded_at: "2024-05-01T12:30:00Z".parse().unwrap(),
        subject: Some("טיול".into()),
        owner_name: None,
        location: Some("רמת הגולן".into()),
        guide_name: None,
        notes: None,
        stored_path: "uploads/20240501123000_טיול_בגולן.jpg".into(),
        llm_review: None,
        llm_reviewed_at: None,
    }
}

// =========================================================================
// response mapping
// =========================================================================

#[test]
fn to_response_copies_record_fields() {
    let response = to_response(sample_row());
    assert_eq!(response.id, 12);
    assert_eq!(response.filename, "טיול בגולן.jpg");
    assert_eq!(response.subject.as_deref(), Some("טיול"));
    assert!(response.owner_name.is_none());
}

#[test]
fn response_json_has_no_stored_path() {
    let json = serde_json::to_value(to_response(sample_row())).unwrap();
    assert!(json.get("stored_path").is_none());
    assert_eq!(json.get("filename").and_then(|v| v.as_str()), Some("טיול בגולן.jpg"));
    assert!(json.get("uploaded_at").and_then(|v| v.as_str()).is_some());
}

// =========================================================================
// list query -> filter
// =========================================================================

#[test]
fn empty_query_params_do_not_filter() {
    let query = ListImagesQuery {
        subject: Some(String::new()),
        owner_name: Some("דנה".into()),
        ..ListImagesQuery::default()
    };
    let filter = to_filter(query);
    assert!(filter.subject.is_none());
    assert_eq!(filter.owner_name.as_deref(), Some("דנה"));
}

#[test]
fn query_deserializes_rfc3339_bounds() {
    let query: ListImagesQuery = serde_json::from_value(serde_json::json!({
        "uploaded_from": "2024-01-01T00:00:00Z",
        "uploaded_to": "2024-12-31T23:59:59Z"
    }))
    .unwrap();
    let filter = to_filter(query);
    assert!(filter.uploaded_from.is_some());
    assert!(filter.uploaded_to.is_some());
    assert!(filter.uploaded_from.unwrap() < filter.uploaded_to.unwrap());
}

// =========================================================================
// error responses
// =========================================================================

#[test]
fn not_found_maps_to_404_with_hebrew_detail() {
    let err = ApiError::from(ImageError::NotFound(5));
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.detail, detail::IMAGE_NOT_FOUND);

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn llm_failure_maps_to_502() {
    let err = ApiError::from(ReviewError::Llm(crate::llm::LlmError::ApiRequest("timeout".into())));
    assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    assert_eq!(err.detail, detail::REVIEW_FAILED);
}

#[test]
fn review_not_found_passes_through() {
    let err = ApiError::from(ReviewError::Image(ImageError::NotFound(9)));
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

// =========================================================================
// upload validation
// =========================================================================

fn parsed_upload(content_type: &str) -> UploadedFile {
    UploadedFile {
        filename: "cat.jpg".to_owned(),
        content_type: content_type.to_owned(),
        bytes: axum::body::Bytes::from_static(b"fake image bytes"),
    }
}

#[test]
fn upload_without_file_part_is_rejected() {
    let err = validate_upload(None).unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.detail, detail::MISSING_FILE);
}

#[test]
fn upload_with_non_image_content_type_is_rejected() {
    let err = validate_upload(Some(parsed_upload("application/pdf"))).unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.detail, detail::NOT_AN_IMAGE);
}

#[test]
fn upload_with_image_content_type_is_accepted() {
    let file = validate_upload(Some(parsed_upload("image/png")))
        .expect("image uploads pass validation");
    assert_eq!(file.filename, "cat.jpg");
    assert_eq!(file.bytes.as_ref(), b"fake image bytes");
}

// =========================================================================
// upload helpers
// =========================================================================

#[test]
fn content_disposition_quotes_ascii_names() {
    assert_eq!(content_disposition("cat.jpg"), "inline; filename=\"cat.jpg\"");
}

#[test]
fn content_disposition_escapes_quotes_and_backslashes() {
    assert_eq!(content_disposition("a\"b.jpg"), "inline; filename=\"a\\\"b.jpg\"");
    assert_eq!(content_disposition("a\\b.jpg"), "inline; filename=\"a\\\\b.jpg\"");
}

#[test]
fn content_disposition_drops_non_ascii_names() {
    assert_eq!(content_disposition("תמונה.jpg"), "inline");
}

#[test]
fn content_disposition_drops_names_with_control_characters() {
    assert_eq!(content_disposition("bad\nname.jpg"), "inline");
}

// =========================================================================
// review body defaults
// =========================================================================

#[test]
fn review_body_fills_hebrew_defaults() {
    let body: ReviewBody = serde_json::from_str(r#"{ "criteria": "חדות" }"#).unwrap();
    assert_eq!(body.criteria, "חדות");
    assert_eq!(body.tone, "מקצועי");
    assert_eq!(body.language, "עברית");
}

#[test]
fn review_body_accepts_overrides() {
    let body: ReviewBody =
        serde_json::from_str(r#"{ "criteria": "צבע", "tone": "קליל", "language": "אנגלית" }"#).unwrap();
    assert_eq!(body.tone, "קליל");
    assert_eq!(body.language, "אנגלית");
}

#[test]
fn review_body_requires_criteria() {
    let body: Result<ReviewBody, _> = serde_json::from_str("{}");
    assert!(body.is_err());
}
