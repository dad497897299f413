use super::*;

#[test]
fn api_base_has_no_trailing_slash() {
    assert!(!api_base().ends_with('/'));
}

#[test]
fn images_endpoint_appends_path_to_base() {
    assert_eq!(images_endpoint(), format!("{}/images", api_base()));
}

#[test]
fn image_file_url_points_at_record_file() {
    assert_eq!(image_file_url(12), format!("{}/images/12/file", api_base()));
}

#[test]
fn error_detail_returns_server_message_verbatim() {
    let body = r#"{"detail": "הקובץ חייב להיות תמונה"}"#;
    assert_eq!(error_detail(body), "הקובץ חייב להיות תמונה");
}

#[test]
fn error_detail_falls_back_on_missing_field() {
    assert_eq!(error_detail(r#"{"error": "boom"}"#), UPLOAD_FAILED);
}

#[test]
fn error_detail_falls_back_on_blank_detail() {
    assert_eq!(error_detail(r#"{"detail": ""}"#), UPLOAD_FAILED);
}

#[test]
fn error_detail_falls_back_on_non_string_detail() {
    assert_eq!(error_detail(r#"{"detail": 42}"#), UPLOAD_FAILED);
}

#[test]
fn error_detail_falls_back_on_non_json_body() {
    assert_eq!(error_detail("<html>502 Bad Gateway</html>"), UPLOAD_FAILED);
}
