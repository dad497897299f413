#[cfg(test)]
#[path = "gallery_test.rs"]
mod gallery_test;

use crate::net::types::ImageRecord;

/// Shared gallery state: the fetched records plus load progress.
#[derive(Clone, Debug)]
pub struct GalleryState {
    pub items: Vec<ImageRecord>,
    pub loading: bool,
}

impl Default for GalleryState {
    fn default() -> Self {
        // The page fetches on mount, so the initial render is "loading".
        Self {
            items: Vec::new(),
            loading: true,
        }
    }
}

impl GalleryState {
    /// True once a fetch has finished with nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.loading && self.items.is_empty()
    }
}
