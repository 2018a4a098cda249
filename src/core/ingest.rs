//! File acceptance rules.
//!
//! Only image files may enter the gallery. The browser-side reader in
//! [`crate::utils::files`] applies these rules before anything reaches the
//! [`ImageCollection`](crate::core::ImageCollection).

use crate::config::IMAGE_MIME_PREFIX;

/// Whether a file with this MIME type is accepted into the gallery.
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim()
        .get(..IMAGE_MIME_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(IMAGE_MIME_PREFIX))
}

/// Result of filtering a batch of picked or dropped files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestReport {
    pub accepted: usize,
    pub skipped: usize,
}

impl IngestReport {
    /// Status line for the gallery, or `None` if nothing was skipped.
    pub fn skipped_message(&self) -> Option<String> {
        match self.skipped {
            0 => None,
            1 => Some("1 file was skipped because it is not an image".to_string()),
            n => Some(format!("{n} files were skipped because they are not images")),
        }
    }
}
