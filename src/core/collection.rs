//! Ordered image collection.
//!
//! Insertion order is the slide order. Every item carries an [`ImageId`]
//! assigned at ingestion time; ids are never reused within a collection,
//! so they stay valid keys for reorder and remove operations even after
//! neighbouring items move.

use std::fmt;
use std::sync::Arc;

use crate::core::error::CollectionError;
use crate::utils::dom;

/// Stable identity of an image within its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(u64);

impl ImageId {
    /// Raw numeric value, used for DOM keys.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Preview Handle
// =============================================================================

/// Transient renderable reference to an image (a blob object URL).
///
/// Owned handles revoke their URL on drop, so removing an item from the
/// collection (or dropping the whole collection) releases the preview.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewHandle {
    url: String,
    owned: bool,
}

impl PreviewHandle {
    /// Wrap an object URL created with `URL.createObjectURL`.
    pub fn object_url(url: String) -> Self {
        Self { url, owned: true }
    }

    /// Wrap a URL that this handle does not own (data URLs, remote images).
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn borrowed(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            owned: false,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if self.owned {
            dom::revoke_object_url(&self.url);
        }
    }
}

// =============================================================================
// Image Items
// =============================================================================

/// An accepted image waiting to be assigned an identity.
///
/// Produced by the file-acceptance layer, which has already filtered out
/// anything that is not an image.
#[derive(Debug)]
pub struct IncomingImage {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
    pub preview: Option<PreviewHandle>,
}

impl IncomingImage {
    /// Create an incoming image without a preview.
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
            preview: None,
        }
    }

    /// Attach a preview handle.
    pub fn with_preview(mut self, preview: PreviewHandle) -> Self {
        self.preview = Some(preview);
        self
    }
}

/// An image in the collection.
#[derive(Debug)]
pub struct ImageItem {
    id: ImageId,
    name: String,
    mime: String,
    bytes: Arc<[u8]>,
    preview: Option<PreviewHandle>,
}

impl ImageItem {
    pub fn id(&self) -> ImageId {
        self.id
    }

    /// Original file name, used for display and extension derivation.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().map(PreviewHandle::url)
    }
}

/// Owned name and bytes of an item, detached from the collection.
///
/// Publishing runs across await points, so it works on snapshots rather
/// than holding a borrow of the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideFile {
    name: String,
    bytes: Arc<[u8]>,
}

impl SlideFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&ImageItem> for SlideFile {
    fn from(item: &ImageItem) -> Self {
        Self {
            name: item.name.clone(),
            bytes: Arc::clone(&item.bytes),
        }
    }
}

// =============================================================================
// Collection
// =============================================================================

/// Ordered sequence of images with stable per-item identity.
///
/// Invariants:
/// - no two items share an [`ImageId`]
/// - order is contiguous; `len()` equals appended minus removed
#[derive(Debug, Default)]
pub struct ImageCollection {
    items: Vec<ImageItem>,
    next_id: u64,
}

impl ImageCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append items at the end, preserving input order.
    ///
    /// Returns the identities assigned to the new items.
    pub fn append(&mut self, incoming: impl IntoIterator<Item = IncomingImage>) -> Vec<ImageId> {
        incoming
            .into_iter()
            .map(|image| {
                let id = ImageId(self.next_id);
                self.next_id += 1;
                self.items.push(ImageItem {
                    id,
                    name: image.name,
                    mime: image.mime,
                    bytes: image.bytes,
                    preview: image.preview,
                });
                id
            })
            .collect()
    }

    /// Remove the item with `id` and hand it back to the caller.
    ///
    /// The item's preview is released when the returned value is dropped.
    pub fn remove(&mut self, id: ImageId) -> Result<ImageItem, CollectionError> {
        let index = self.index_of(id).ok_or(CollectionError::NotFound(id))?;
        Ok(self.items.remove(index))
    }

    /// Relocate `id` so that it ends up at `target_index` in the resulting
    /// sequence.
    ///
    /// Implemented as remove-then-insert; the index is clamped to
    /// `[0, len - 1]`, so no gap or duplicate can arise.
    pub fn move_to(&mut self, id: ImageId, target_index: usize) -> Result<(), CollectionError> {
        let from = self.index_of(id).ok_or(CollectionError::NotFound(id))?;
        let item = self.items.remove(from);
        let to = target_index.min(self.items.len());
        self.items.insert(to, item);
        Ok(())
    }

    /// Position of `id` in the current order.
    pub fn index_of(&self, id: ImageId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn get(&self, id: ImageId) -> Option<&ImageItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Identities in slide order.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn ids(&self) -> Vec<ImageId> {
        self.items.iter().map(ImageItem::id).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current order as owned [`SlideFile`]s. Bytes are shared, not copied.
    pub fn snapshot(&self) -> Vec<SlideFile> {
        self.items.iter().map(SlideFile::from).collect()
    }

    /// Drop every item, releasing all previews.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a ImageCollection {
    type Item = &'a ImageItem;
    type IntoIter = std::slice::Iter<'a, ImageItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> IncomingImage {
        IncomingImage::new(name, "image/png", name.as_bytes().to_vec())
    }

    fn names(collection: &ImageCollection) -> Vec<&str> {
        collection.iter().map(ImageItem::name).collect()
    }

    fn abc() -> (ImageCollection, Vec<ImageId>) {
        let mut collection = ImageCollection::new();
        let ids = collection.append(vec![image("A"), image("B"), image("C")]);
        (collection, ids)
    }

    #[test]
    fn test_append_preserves_input_order() {
        let (collection, ids) = abc();
        assert_eq!(names(&collection), vec!["A", "B", "C"]);
        assert_eq!(collection.ids(), ids);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let (mut collection, ids) = abc();
        collection.remove(ids[2]).unwrap();
        let new_ids = collection.append(vec![image("D")]);
        assert!(!ids.contains(&new_ids[0]));
    }

    #[test]
    fn test_remove_returns_item() {
        let (mut collection, ids) = abc();
        let removed = collection.remove(ids[1]).unwrap();
        assert_eq!(removed.name(), "B");
        assert_eq!(names(&collection), vec!["A", "C"]);
    }

    #[test]
    fn test_remove_missing_signals_not_found() {
        let (mut collection, ids) = abc();
        collection.remove(ids[0]).unwrap();
        assert_eq!(
            collection.remove(ids[0]).unwrap_err(),
            CollectionError::NotFound(ids[0])
        );
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_move_first_to_end() {
        let (mut collection, ids) = abc();
        collection.move_to(ids[0], 2).unwrap();
        assert_eq!(names(&collection), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_move_last_to_front() {
        let (mut collection, ids) = abc();
        collection.move_to(ids[2], 0).unwrap();
        assert_eq!(names(&collection), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_move_clamps_target_index() {
        let (mut collection, ids) = abc();
        collection.move_to(ids[0], 99).unwrap();
        assert_eq!(names(&collection), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_move_is_idempotent() {
        let (mut collection, ids) = abc();
        collection.move_to(ids[1], 0).unwrap();
        let once = collection.ids();
        collection.move_to(ids[1], 0).unwrap();
        assert_eq!(collection.ids(), once);
    }

    #[test]
    fn test_move_missing_signals_not_found() {
        let (mut collection, ids) = abc();
        collection.remove(ids[1]).unwrap();
        assert!(collection.move_to(ids[1], 0).is_err());
        assert_eq!(names(&collection), vec!["A", "C"]);
    }

    #[test]
    fn test_no_duplicates_under_mixed_operations() {
        let mut collection = ImageCollection::new();
        let mut appended = 0;
        let mut removed = 0;

        for round in 0..20usize {
            let ids = collection.append(vec![image("x"), image("y")]);
            appended += ids.len();

            collection.move_to(ids[0], round % 5).unwrap();
            collection.move_to(ids[1], 0).unwrap();

            if round % 3 == 0 {
                collection.remove(ids[1]).unwrap();
                removed += 1;
            }

            let mut seen = collection.ids();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), collection.len());
            assert_eq!(collection.len(), appended - removed);
        }
    }

    #[test]
    fn test_snapshot_follows_current_order() {
        let (mut collection, ids) = abc();
        collection.move_to(ids[2], 0).unwrap();

        let files = collection.snapshot();
        let names: Vec<_> = files.iter().map(SlideFile::name).collect();
        assert_eq!(names, ["C", "A", "B"]);
        assert_eq!(files[0].bytes(), b"C");

        // Later edits do not reach an existing snapshot.
        collection.clear();
        assert_eq!(files.len(), 3);
    }

    fn with_blob(name: &str) -> IncomingImage {
        image(name).with_preview(PreviewHandle::object_url(format!("blob:{name}")))
    }

    #[test]
    fn test_remove_releases_owned_preview_once() {
        dom::revoked::take();
        let mut collection = ImageCollection::new();
        let ids = collection.append(vec![with_blob("A"), with_blob("B")]);

        collection.move_to(ids[0], 1).unwrap();
        assert!(dom::revoked::take().is_empty());

        let removed = collection.remove(ids[0]).unwrap();
        assert_eq!(removed.preview_url(), Some("blob:A"));
        drop(removed);
        assert_eq!(dom::revoked::take(), ["blob:A"]);

        drop(collection);
        assert_eq!(dom::revoked::take(), ["blob:B"]);
    }

    #[test]
    fn test_clear_releases_every_owned_preview() {
        dom::revoked::take();
        let mut collection = ImageCollection::new();
        collection.append(vec![
            with_blob("A"),
            image("B").with_preview(PreviewHandle::borrowed("data:image/png;base64,AA==")),
            image("C"),
            with_blob("D"),
        ]);

        collection.clear();
        assert_eq!(dom::revoked::take(), ["blob:A", "blob:D"]);

        drop(collection);
        assert!(dom::revoked::take().is_empty());
    }

    #[test]
    fn test_snapshot_does_not_release_previews() {
        dom::revoked::take();
        let mut collection = ImageCollection::new();
        collection.append(vec![with_blob("A")]);

        drop(collection.snapshot());
        assert!(dom::revoked::take().is_empty());

        drop(collection);
        assert_eq!(dom::revoked::take(), ["blob:A"]);
    }

    #[test]
    fn test_borrowed_preview_url() {
        let mut collection = ImageCollection::new();
        let ids = collection.append(vec![
            image("A").with_preview(PreviewHandle::borrowed("data:image/png;base64,AA==")),
        ]);
        assert_eq!(
            collection.get(ids[0]).and_then(ImageItem::preview_url),
            Some("data:image/png;base64,AA==")
        );
        collection.clear();
        assert!(collection.is_empty());
        assert!(dom::revoked::take().is_empty());
    }
}
