use super::*;

#[test]
fn submit_button_label_reflects_progress() {
    assert_eq!(submit_button_label(false), "שליחה");
    assert_eq!(submit_button_label(true), "מעלה...");
}

#[test]
fn missing_file_message_mentions_choosing_a_file() {
    assert!(NO_FILE_MESSAGE.contains("קובץ"));
}

#[test]
fn validate_chosen_file_requires_a_file() {
    assert_eq!(validate_chosen_file::<()>(None), Err(NO_FILE_MESSAGE));
    assert_eq!(validate_chosen_file(Some("photo")), Ok("photo"));
}
