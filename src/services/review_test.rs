use super::*;
use crate::llm::LlmChat;
use std::sync::Mutex;

// =========================================================================
// MockLlm
// =========================================================================

struct MockLlm {
    reply: String,
    seen: Mutex<Option<(String, String)>>,
}

impl MockLlm {
    fn new(reply: &str) -> Self {
        Self { reply: reply.to_string(), seen: Mutex::new(None) }
    }
}

#[async_trait::async_trait]
impl LlmChat for MockLlm {
    async fn chat(&self, system: &str, user: &str) -> Result<String, LlmError> {
        *self.seen.lock().unwrap() = Some((system.to_string(), user.to_string()));
        Ok(self.reply.clone())
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}

fn sample_row() -> ImageRow {
    ImageRow {
        id: 3,
        filename: "hike.jpg".into(),
        content_type: "image/jpeg".into(),
        uploaded_at: chrono::Utc::now(),
        subject: Some("טיול".into()),
        owner_name: Some("דנה".into()),
        location: Some("רמת הגולן".into()),
        guide_name: Some("יוסי".into()),
        notes: Some("בוקר מוקדם".into()),
        stored_path: "uploads/20240501120000_hike.jpg".into(),
        llm_review: None,
        llm_reviewed_at: None,
    }
}

fn sample_request() -> ReviewRequest {
    ReviewRequest {
        criteria: "קומפוזיציה ותאורה".into(),
        tone: "מקצועי".into(),
        language: "עברית".into(),
    }
}

// =========================================================================
// build_prompt
// =========================================================================

#[test]
fn prompt_includes_all_metadata() {
    let prompt = build_prompt(&sample_row(), &sample_request());
    assert!(prompt.starts_with("נתוני התמונה:\n"));
    assert!(prompt.contains("שם קובץ: hike.jpg"));
    assert!(prompt.contains("נושא: טיול"));
    assert!(prompt.contains("בעלים: דנה"));
    assert!(prompt.contains("מיקום: רמת הגולן"));
    assert!(prompt.contains("מדריך: יוסי"));
    assert!(prompt.contains("הערות: בוקר מוקדם"));
}

#[test]
fn prompt_fills_missing_fields_with_placeholders() {
    let row = ImageRow {
        subject: None,
        owner_name: None,
        location: None,
        guide_name: None,
        notes: None,
        ..sample_row()
    };
    let prompt = build_prompt(&row, &sample_request());
    assert!(prompt.contains("נושא: לא צוין"));
    assert!(prompt.contains("בעלים: לא צוין"));
    assert!(prompt.contains("מיקום: לא צוין"));
    assert!(prompt.contains("מדריך: לא צוין"));
    assert!(prompt.contains("הערות: אין"));
}

#[test]
fn prompt_carries_review_instructions() {
    let prompt = build_prompt(&sample_row(), &sample_request());
    let instructions = prompt
        .split("הנחיות ביקורת:\n")
        .nth(1)
        .expect("prompt should contain an instructions section");
    assert!(instructions.contains("קריטריונים: קומפוזיציה ותאורה"));
    assert!(instructions.contains("טון: מקצועי"));
    assert!(instructions.contains("שפה: עברית"));
}

// =========================================================================
// review flow (live database)
// =========================================================================

#[cfg(feature = "live-db-tests")]
async fn integration_state() -> AppState {
    crate::state::test_helpers::live_test_state().await
}

#[cfg(feature = "live-db-tests")]
async fn seed_record(state: &AppState) -> i64 {
    let new = image::NewImage {
        filename: "hike.jpg".into(),
        content_type: "image/jpeg".into(),
        subject: Some("טיול".into()),
        stored_path: "uploads/20240501120000_hike.jpg".into(),
        ..image::NewImage::default()
    };
    image::create_image(&state.pool, &new)
        .await
        .expect("create_image should succeed")
        .id
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn review_with_llm_stores_reply_and_model() {
    use std::sync::Arc;

    let mut state = integration_state().await;
    let mock = Arc::new(MockLlm::new("תמונה חדה עם תאורה טובה."));
    state.llm = Some(mock.clone());
    let id = seed_record(&state).await;

    let outcome = review_image(&state, id, &sample_request())
        .await
        .expect("review_image should succeed");
    assert_eq!(outcome.image_id, id);
    assert_eq!(outcome.review, "תמונה חדה עם תאורה טובה.");
    assert_eq!(outcome.model.as_deref(), Some("mock-model"));

    let seen = mock.seen.lock().unwrap().clone().expect("mock should be called");
    assert!(seen.0.contains("מבקר/ת תמונות"));
    assert!(seen.1.contains("שם קובץ: hike.jpg"));

    let row = image::get_image(&state.pool, id).await.expect("get_image");
    assert_eq!(row.llm_review.as_deref(), Some("תמונה חדה עם תאורה טובה."));
    assert!(row.llm_reviewed_at.is_some());
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn review_without_llm_stores_notice() {
    let state = integration_state().await;
    let id = seed_record(&state).await;

    let outcome = review_image(&state, id, &sample_request())
        .await
        .expect("review_image should succeed");
    assert_eq!(outcome.review, UNCONFIGURED_NOTICE);
    assert!(outcome.model.is_none());

    let row = image::get_image(&state.pool, id).await.expect("get_image");
    assert_eq!(row.llm_review.as_deref(), Some(UNCONFIGURED_NOTICE));
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn review_missing_record_is_not_found() {
    let state = integration_state().await;

    let err = review_image(&state, 9999, &sample_request())
        .await
        .expect_err("missing record should fail");
    assert!(matches!(err, ReviewError::Image(ImageError::NotFound(9999))));
}
