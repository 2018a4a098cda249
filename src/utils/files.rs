//! Reading user-selected files.
//!
//! Converts a `FileList` from a file input or a drop event into
//! [`IncomingImage`]s, skipping anything that is not an image.

use std::sync::Arc;

use js_sys::Uint8Array;
use leptos::logging::warn;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileList, Url};

use crate::core::ingest::{IngestReport, is_image_mime};
use crate::core::{IncomingImage, PreviewHandle};

/// Collect a `FileList` into a `Vec`.
pub fn file_list_to_vec(files: &FileList) -> Vec<File> {
    (0..files.length()).filter_map(|i| files.get(i)).collect()
}

/// Read the bytes of every image file and create a preview URL for it.
///
/// Files that are not images, or that cannot be read, are skipped and
/// counted in the report.
pub async fn read_image_files(files: Vec<File>) -> (Vec<IncomingImage>, IngestReport) {
    let mut images = Vec::with_capacity(files.len());
    let mut report = IngestReport::default();

    for file in files {
        let mime = file.type_();
        if !is_image_mime(&mime) {
            report.skipped += 1;
            continue;
        }

        let name = file.name();
        let bytes = match JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => Uint8Array::new(&buffer).to_vec(),
            Err(e) => {
                warn!("could not read {name}: {e:?}");
                report.skipped += 1;
                continue;
            }
        };

        let mut image = IncomingImage::new(name, mime, Arc::<[u8]>::from(bytes));
        if let Ok(url) = Url::create_object_url_with_blob(&file) {
            image = image.with_preview(PreviewHandle::object_url(url));
        }
        images.push(image);
        report.accepted += 1;
    }

    (images, report)
}
