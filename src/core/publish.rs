//! Publish pipeline.
//!
//! Uploads an emitted [`SlideshowDocument`] and its images to a GitHub
//! repository through a [`ContentStore`], then hands back the public
//! GitHub Pages URL.
//!
//! Uploads are strictly sequential: the document first, then the images in
//! slide order. The first failing call aborts the pipeline and its error is
//! returned unchanged. Files uploaded before the failure stay in the
//! repository; there is no rollback and no retry.

use std::fmt;
use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use leptos::logging::{error, log};
use regex::Regex;
use serde::Serialize;

use crate::config::{DEFAULT_FOLDER_PREFIX, GITHUB_BRANCH, commit_messages, pages_url};
use crate::core::emitter::{SlideAsset, SlideshowDocument, asset_name};
use crate::core::error::PublishError;

/// File name of the slideshow document inside its folder.
pub const DOCUMENT_FILE: &str = "index.html";

/// Characters that would split a folder name into several path segments or
/// cannot appear in a repository path.
static PATH_BREAKING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/\\\x00-\x1F\x7F]").expect("valid folder regex"));

// =============================================================================
// Target & Result
// =============================================================================

/// Where to publish: an opaque bearer token plus the repository coordinates.
///
/// The token is never inspected beyond checking it is non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct PublishTarget {
    token: String,
    owner: String,
    repository: String,
}

impl PublishTarget {
    /// Build a target, rejecting empty fields.
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repository: impl Into<String>,
    ) -> Result<Self, PublishError> {
        let token = token.into();
        let owner = owner.into().trim().to_string();
        let repository = repository.into().trim().to_string();

        for (value, field) in [
            (token.trim(), "GitHub token"),
            (owner.as_str(), "GitHub username"),
            (repository.as_str(), "repository name"),
        ] {
            if value.is_empty() {
                return Err(PublishError::Validation(format!("{field} is required")));
            }
        }

        Ok(Self {
            token,
            owner,
            repository,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }
}

impl fmt::Debug for PublishTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishTarget")
            .field("token", &"<redacted>")
            .field("owner", &self.owner)
            .field("repository", &self.repository)
            .finish()
    }
}

/// Public URL of a published slideshow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUrl(String);

impl PublicUrl {
    /// `https://<owner>.github.io/<repository>/<folder>/index.html`
    pub fn for_folder(target: &PublishTarget, folder: &str) -> Self {
        Self(pages_url(target.owner(), target.repository(), folder))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Content Store
// =============================================================================

/// Body of a "create or update file" call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PutFileRequest {
    pub message: String,
    /// Base64 (standard alphabet) encoded file content.
    pub content: String,
    pub branch: String,
    /// Blob sha of the file being replaced; absent when creating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl PutFileRequest {
    /// Encode `bytes` for the wire.
    pub fn new(message: impl Into<String>, bytes: &[u8], sha: Option<String>) -> Self {
        Self {
            message: message.into(),
            content: BASE64.encode(bytes),
            branch: GITHUB_BRANCH.to_string(),
            sha,
        }
    }
}

/// Remote content storage the pipeline writes to.
#[allow(async_fn_in_trait)]
pub trait ContentStore {
    /// Create or update the file at `path`.
    async fn put_file(
        &self,
        target: &PublishTarget,
        path: &str,
        request: &PutFileRequest,
    ) -> Result<(), PublishError>;

    /// Blob sha of the existing file at `path`, or `None` if there is none.
    async fn file_sha(&self, target: &PublishTarget, path: &str) -> Result<Option<String>, PublishError>;
}

// =============================================================================
// Pipeline
// =============================================================================

/// Pipeline switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublishOptions {
    /// Look up existing files first and replace them instead of failing
    /// when the folder was published before.
    pub update_existing: bool,
}

/// Reported after every successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishProgress {
    pub completed: usize,
    pub total: usize,
    pub path: String,
}

/// Use `input` as the folder name, or generate `slideshow-<now_ms>` when it
/// is blank.
pub fn resolve_folder_name(input: &str, now_ms: u64) -> Result<String, PublishError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(format!("{DEFAULT_FOLDER_PREFIX}{now_ms}"));
    }
    validate_folder_name(trimmed)?;
    Ok(trimmed.to_string())
}

/// A folder must stay a single path segment. Anything else, spaces and
/// non-ASCII text included, is allowed and percent-encoded in URLs.
pub fn validate_folder_name(folder: &str) -> Result<(), PublishError> {
    if folder.is_empty() || matches!(folder, "." | "..") || PATH_BREAKING.is_match(folder) {
        Err(PublishError::Validation(format!(
            "invalid slideshow name '{}' (slashes and control characters are not allowed)",
            folder.escape_debug()
        )))
    } else {
        Ok(())
    }
}

/// Upload `document` and `images` under `folder` and return the public URL.
///
/// `images` must be the same ordered list the document was emitted from;
/// paths are derived with [`asset_name`] so they match the document's
/// references.
pub async fn publish<A, C>(
    client: &C,
    images: &[A],
    document: &SlideshowDocument,
    folder: &str,
    target: &PublishTarget,
    options: PublishOptions,
    mut on_progress: impl FnMut(PublishProgress),
) -> Result<PublicUrl, PublishError>
where
    A: SlideAsset,
    C: ContentStore,
{
    validate_folder_name(folder)?;
    if document.slide_count() != images.len() {
        return Err(PublishError::Validation(format!(
            "document has {} slides but {} images were given",
            document.slide_count(),
            images.len()
        )));
    }

    let total = images.len() + 1;
    log!(
        "publishing {total} files to {}/{}:{folder}",
        target.owner(),
        target.repository()
    );

    let document_path = format!("{folder}/{DOCUMENT_FILE}");
    upload(
        client,
        target,
        &document_path,
        commit_messages::DOCUMENT,
        document.markup().as_bytes(),
        options,
    )
    .await?;
    on_progress(PublishProgress {
        completed: 1,
        total,
        path: document_path,
    });

    for (index, image) in images.iter().enumerate() {
        let n = index + 1;
        let path = format!("{folder}/{}", asset_name(n, image.file_name()));
        upload(
            client,
            target,
            &path,
            &commit_messages::slide(n),
            image.content(),
            options,
        )
        .await?;
        on_progress(PublishProgress {
            completed: n + 1,
            total,
            path,
        });
    }

    Ok(PublicUrl::for_folder(target, folder))
}

async fn upload<C: ContentStore>(
    client: &C,
    target: &PublishTarget,
    path: &str,
    message: &str,
    bytes: &[u8],
    options: PublishOptions,
) -> Result<(), PublishError> {
    let sha = if options.update_existing {
        client.file_sha(target, path).await?
    } else {
        None
    };

    let request = PutFileRequest::new(message, bytes, sha);
    client
        .put_file(target, path, &request)
        .await
        .inspect_err(|e| error!("upload of {path} failed: {e}"))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::core::emitter::emit;

    struct Asset {
        name: &'static str,
        bytes: Vec<u8>,
    }

    impl SlideAsset for Asset {
        fn file_name(&self) -> &str {
            self.name
        }

        fn content(&self) -> &[u8] {
            &self.bytes
        }
    }

    /// In-memory store that records calls and can reject the n-th put.
    #[derive(Default)]
    struct MemoryStore {
        puts: RefCell<Vec<(String, PutFileRequest)>>,
        existing: HashMap<String, String>,
        lookups: RefCell<Vec<String>>,
        reject_call: Option<usize>,
    }

    impl ContentStore for MemoryStore {
        async fn put_file(
            &self,
            _target: &PublishTarget,
            path: &str,
            request: &PutFileRequest,
        ) -> Result<(), PublishError> {
            let call = self.puts.borrow().len() + 1;
            if self.reject_call == Some(call) {
                return Err(PublishError::RemoteRejected {
                    status: 422,
                    path: path.to_string(),
                    message: "Invalid request".to_string(),
                });
            }
            self.puts
                .borrow_mut()
                .push((path.to_string(), request.clone()));
            Ok(())
        }

        async fn file_sha(
            &self,
            _target: &PublishTarget,
            path: &str,
        ) -> Result<Option<String>, PublishError> {
            self.lookups.borrow_mut().push(path.to_string());
            Ok(self.existing.get(path).cloned())
        }
    }

    fn target() -> PublishTarget {
        PublishTarget::new("ghp_secret", "octocat", "slides").unwrap()
    }

    fn assets() -> Vec<Asset> {
        vec![
            Asset {
                name: "a.png",
                bytes: vec![1, 2, 3],
            },
            Asset {
                name: "b.jpg",
                bytes: vec![4, 5],
            },
            Asset {
                name: "c",
                bytes: vec![6],
            },
        ]
    }

    #[test]
    fn test_target_requires_all_fields() {
        assert!(PublishTarget::new("t", "o", "r").is_ok());
        assert_eq!(
            PublishTarget::new("  ", "o", "r").unwrap_err(),
            PublishError::Validation("GitHub token is required".to_string())
        );
        assert!(PublishTarget::new("t", "", "r").is_err());
        assert!(PublishTarget::new("t", "o", "").is_err());
    }

    #[test]
    fn test_target_keeps_token_verbatim() {
        let target = PublishTarget::new(" ghp_x ", " octocat ", "slides").unwrap();
        assert_eq!(target.token(), " ghp_x ");
        assert_eq!(target.owner(), "octocat");
    }

    #[test]
    fn test_target_debug_redacts_token() {
        let debug = format!("{:?}", target());
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("octocat"));
    }

    #[test]
    fn test_resolve_folder_name() {
        assert_eq!(resolve_folder_name("  trip ", 0).unwrap(), "trip");
        assert_eq!(
            resolve_folder_name("", 1700000000000).unwrap(),
            "slideshow-1700000000000"
        );
        assert_eq!(resolve_folder_name("   ", 42).unwrap(), "slideshow-42");
    }

    #[test]
    fn test_folder_name_allows_free_text() {
        assert_eq!(resolve_folder_name("my trip", 0).unwrap(), "my trip");
        assert_eq!(resolve_folder_name("여행", 0).unwrap(), "여행");
        assert_eq!(resolve_folder_name("Trip (2024)", 0).unwrap(), "Trip (2024)");
    }

    #[test]
    fn test_folder_name_must_stay_one_segment() {
        assert!(resolve_folder_name("a/b", 0).is_err());
        assert!(resolve_folder_name("a\\b", 0).is_err());
        assert!(resolve_folder_name(".", 0).is_err());
        assert!(resolve_folder_name("..", 0).is_err());
        assert!(resolve_folder_name("a\u{7}b", 0).is_err());
        assert!(validate_folder_name("").is_err());
    }

    #[test]
    fn test_public_url_encodes_folder() {
        assert_eq!(
            PublicUrl::for_folder(&target(), "Trip (2024)").as_str(),
            "https://octocat.github.io/slides/Trip%20%282024%29/index.html"
        );
    }

    #[test]
    fn test_put_request_encodes_base64() {
        let request = PutFileRequest::new("msg", b"hello", None);
        assert_eq!(request.content, "aGVsbG8=");
        assert_eq!(request.branch, "main");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "message": "msg", "content": "aGVsbG8=", "branch": "main" })
        );

        let with_sha = PutFileRequest::new("msg", b"", Some("abc".to_string()));
        assert_eq!(serde_json::to_value(&with_sha).unwrap()["sha"], "abc");
    }

    #[tokio::test]
    async fn test_publish_uploads_document_then_images() {
        let store = MemoryStore::default();
        let images = assets();
        let document = emit(&images, "trip");
        let mut progress = Vec::new();

        let url = publish(
            &store,
            &images,
            &document,
            "trip",
            &target(),
            PublishOptions::default(),
            |p| progress.push(p),
        )
        .await
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://octocat.github.io/slides/trip/index.html"
        );

        let puts = store.puts.borrow();
        let paths: Vec<&str> = puts.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            paths,
            vec!["trip/index.html", "trip/1.png", "trip/2.jpg", "trip/3."]
        );
        assert_eq!(puts[0].1.message, "Create slideshow HTML");
        assert_eq!(puts[0].1.content, BASE64.encode(document.markup()));
        assert_eq!(puts[2].1.message, "Upload slide 2");
        assert_eq!(puts[2].1.content, BASE64.encode([4u8, 5]));
        assert!(puts.iter().all(|(_, r)| r.sha.is_none()));
        assert!(store.lookups.borrow().is_empty());

        assert_eq!(progress.len(), 4);
        assert_eq!(progress[3].completed, 4);
        assert_eq!(progress[3].total, 4);
    }

    #[tokio::test]
    async fn test_rejected_document_upload_aborts() {
        let store = MemoryStore {
            reject_call: Some(1),
            ..Default::default()
        };
        let images = vec![Asset {
            name: "only.png",
            bytes: vec![9],
        }];
        let document = emit(&images, "one");

        let result = publish(
            &store,
            &images,
            &document,
            "one",
            &target(),
            PublishOptions::default(),
            |_| {},
        )
        .await;

        assert!(matches!(
            result,
            Err(PublishError::RemoteRejected { ref path, .. }) if path == "one/index.html"
        ));
        assert!(store.puts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_image_upload_keeps_earlier_files() {
        let store = MemoryStore {
            reject_call: Some(3),
            ..Default::default()
        };
        let images = assets();
        let document = emit(&images, "trip");

        let err = publish(
            &store,
            &images,
            &document,
            "trip",
            &target(),
            PublishOptions::default(),
            |_| {},
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "GitHub API error: Invalid request");
        let puts = store.puts.borrow();
        assert_eq!(puts.len(), 2);
        assert_eq!(puts[1].0, "trip/1.png");
    }

    #[tokio::test]
    async fn test_update_existing_sends_sha() {
        let mut existing = HashMap::new();
        existing.insert("trip/index.html".to_string(), "sha-doc".to_string());
        let store = MemoryStore {
            existing,
            ..Default::default()
        };
        let images = assets();
        let document = emit(&images, "trip");

        publish(
            &store,
            &images,
            &document,
            "trip",
            &target(),
            PublishOptions {
                update_existing: true,
            },
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(store.lookups.borrow().len(), 4);
        let puts = store.puts.borrow();
        assert_eq!(puts[0].1.sha.as_deref(), Some("sha-doc"));
        assert!(puts[1].1.sha.is_none());
    }

    #[tokio::test]
    async fn test_mismatched_document_is_rejected_before_upload() {
        let store = MemoryStore::default();
        let images = assets();
        let document = emit(&images[..1], "trip");

        let err = publish(
            &store,
            &images,
            &document,
            "trip",
            &target(),
            PublishOptions::default(),
            |_| {},
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PublishError::Validation(_)));
        assert!(store.puts.borrow().is_empty());
    }
}
