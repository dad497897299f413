#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

/// Upload form state: metadata fields plus submit progress.
///
/// The chosen `File` stays inside the `<input type="file">` element; the
/// submit flow reads it from there via a `NodeRef`.
#[derive(Clone, Debug, Default)]
pub struct UploadFormState {
    pub subject: String,
    pub owner_name: String,
    pub location: String,
    pub guide_name: String,
    pub notes: String,
    pub submitting: bool,
}

impl UploadFormState {
    /// Reset the metadata fields after a successful upload. `submitting` is
    /// left alone; the submit flow toggles it.
    pub fn clear_fields(&mut self) {
        self.subject.clear();
        self.owner_name.clear();
        self.location.clear();
        self.guide_name.clear();
        self.notes.clear();
    }

    /// Metadata as multipart entries. Blank fields are skipped so the server
    /// stores them as absent rather than as empty strings.
    #[must_use]
    pub fn field_entries(&self) -> Vec<(&'static str, String)> {
        [
            ("subject", &self.subject),
            ("owner_name", &self.owner_name),
            ("location", &self.location),
            ("guide_name", &self.guide_name),
            ("notes", &self.notes),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key, value.clone()))
        .collect()
    }
}
