//! Wire DTOs for the image API.
//!
//! DESIGN
//! ======
//! `ImageRecord` mirrors the JSON the server returns for a stored image.
//! Extra fields in the payload are ignored so the client keeps working when
//! the server grows its response.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// One stored image as returned by `GET /images`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: i64,
    /// Original file name as uploaded.
    pub filename: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub guide_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// RFC 3339 upload timestamp. Kept as a string; the UI never parses it.
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

impl ImageRecord {
    /// Card title: the subject when present, the file name otherwise.
    #[must_use]
    pub fn title(&self) -> &str {
        non_empty(&self.subject).unwrap_or(&self.filename)
    }

    /// Owner line, with a Hebrew placeholder when absent.
    #[must_use]
    pub fn owner_label(&self) -> &str {
        non_empty(&self.owner_name).unwrap_or("ללא בעלים")
    }

    /// Location line, with a Hebrew placeholder when absent.
    #[must_use]
    pub fn location_label(&self) -> &str {
        non_empty(&self.location).unwrap_or("ללא מיקום")
    }
}

/// Blank strings count as missing, matching how the server treats blank
/// form fields.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}
