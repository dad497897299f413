use super::*;

// =============================================================
// Helpers
// =============================================================

fn make_record() -> ImageRecord {
    ImageRecord {
        id: 3,
        filename: "hike.jpg".to_owned(),
        subject: Some("טיול בגליל".to_owned()),
        owner_name: Some("יואב".to_owned()),
        location: Some("צפת".to_owned()),
        guide_name: Some("רונית".to_owned()),
        notes: None,
        uploaded_at: Some("2024-05-01T12:30:00Z".to_owned()),
    }
}

// =============================================================
// Serde
// =============================================================

#[test]
fn record_round_trip() {
    let record = make_record();
    let json = serde_json::to_string(&record).unwrap();
    let back: ImageRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(record, back);
}

#[test]
fn record_deserializes_with_missing_optional_fields() {
    let json = r#"{"id": 9, "filename": "a.png"}"#;
    let record: ImageRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.id, 9);
    assert_eq!(record.filename, "a.png");
    assert_eq!(record.subject, None);
    assert_eq!(record.uploaded_at, None);
}

#[test]
fn record_ignores_unknown_server_fields() {
    let json = r#"{
        "id": 4,
        "filename": "b.png",
        "content_type": "image/png",
        "llm_review": "יפה מאוד",
        "subject": null
    }"#;
    let record: ImageRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.id, 4);
    assert_eq!(record.subject, None);
}

// =============================================================
// Display helpers
// =============================================================

#[test]
fn title_prefers_subject_over_filename() {
    let record = make_record();
    assert_eq!(record.title(), "טיול בגליל");
}

#[test]
fn title_falls_back_to_filename() {
    let mut record = make_record();
    record.subject = None;
    assert_eq!(record.title(), "hike.jpg");
}

#[test]
fn blank_subject_counts_as_missing() {
    let mut record = make_record();
    record.subject = Some(String::new());
    assert_eq!(record.title(), "hike.jpg");
}

#[test]
fn owner_and_location_use_hebrew_placeholders() {
    let record = ImageRecord {
        id: 1,
        filename: "x.jpg".to_owned(),
        subject: None,
        owner_name: None,
        location: None,
        guide_name: None,
        notes: None,
        uploaded_at: None,
    };
    assert_eq!(record.owner_label(), "ללא בעלים");
    assert_eq!(record.location_label(), "ללא מיקום");
}

#[test]
fn owner_and_location_show_values_when_present() {
    let record = make_record();
    assert_eq!(record.owner_label(), "יואב");
    assert_eq!(record.location_label(), "צפת");
}
