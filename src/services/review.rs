//! Image review service: prompt assembly and LLM dispatch.
//!
//! DESIGN
//! ======
//! Builds a Hebrew prompt from the record metadata plus caller-supplied
//! instructions, asks the configured LLM for a short review, and stores the
//! result on the record. Without a configured LLM the review is a fixed
//! notice so the endpoint still succeeds.

use chrono::Utc;

use crate::llm::LlmError;
use crate::services::image::{self, ImageError, ImageRow};
use crate::state::AppState;

#[cfg(test)]
#[path = "review_test.rs"]
mod review_test;

/// Review text stored when no LLM client is configured.
pub const UNCONFIGURED_NOTICE: &str =
    "LLM לא מוגדר. הגדירו LLM_API_KEY_ENV כדי לקבל ביקורת אוטומטית.";

const REVIEW_SYSTEM_PROMPT: &str = "את/ה מבקר/ת תמונות מקצועי/ת. כתוב/י ביקורת תמציתית וברורה.";

const UNSPECIFIED: &str = "לא צוין";
const NO_NOTES: &str = "אין";

// =============================================================================
// TYPES
// =============================================================================

/// Caller-supplied review instructions.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    pub criteria: String,
    pub tone: String,
    pub language: String,
}

/// Stored review returned to the caller. `model` is `None` when the
/// unconfigured notice was used.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReviewOutcome {
    pub image_id: i64,
    pub review: String,
    pub model: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error("llm request failed: {0}")]
    Llm(#[from] LlmError),
}

// =============================================================================
// PROMPT
// =============================================================================

/// Assemble the user prompt sent to the LLM for one image.
#[must_use]
pub fn build_prompt(image: &ImageRow, request: &ReviewRequest) -> String {
    format!(
        "נתוני התמונה:\nשם קובץ: {}\nנושא: {}\nבעלים: {}\nמיקום: {}\nמדריך: {}\nהערות: {}\n\n\
         הנחיות ביקורת:\nקריטריונים: {}\nטון: {}\nשפה: {}\n",
        image.filename,
        image.subject.as_deref().unwrap_or(UNSPECIFIED),
        image.owner_name.as_deref().unwrap_or(UNSPECIFIED),
        image.location.as_deref().unwrap_or(UNSPECIFIED),
        image.guide_name.as_deref().unwrap_or(UNSPECIFIED),
        image.notes.as_deref().unwrap_or(NO_NOTES),
        request.criteria,
        request.tone,
        request.language,
    )
}

// =============================================================================
// REVIEW FLOW
// =============================================================================

/// Review one image: prompt the LLM (or fall back to the unconfigured
/// notice), store the result, and return it.
///
/// # Errors
///
/// Returns [`ReviewError::Image`] if the record is missing or the update
/// fails, and [`ReviewError::Llm`] if the LLM call itself fails.
pub async fn review_image(
    state: &AppState,
    image_id: i64,
    request: &ReviewRequest,
) -> Result<ReviewOutcome, ReviewError> {
    let image = image::get_image(&state.pool, image_id).await?;
    let prompt = build_prompt(&image, request);

    let (review, model) = match state.llm.as_deref() {
        Some(llm) => {
            let text = llm.chat(REVIEW_SYSTEM_PROMPT, &prompt).await?;
            (text, Some(llm.model().to_owned()))
        }
        None => (UNCONFIGURED_NOTICE.to_owned(), None),
    };

    image::set_review(&state.pool, image_id, &review, Utc::now()).await?;
    tracing::info!(image_id, model = model.as_deref().unwrap_or("none"), "image review stored");

    Ok(ReviewOutcome { image_id, review, model })
}
