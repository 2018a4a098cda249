//! GitHub contents API client.
//!
//! Implements [`ContentStore`] on top of
//! `PUT/GET {api}/repos/{owner}/{repo}/contents/{path}`.

use serde::Deserialize;

use crate::config::{GITHUB_API_BASE, GITHUB_BRANCH};
use crate::core::error::PublishError;
use crate::core::publish::{ContentStore, PublishTarget, PutFileRequest};
use crate::utils::fetch::{HttpResponse, send_json};
use crate::utils::url::encode_path;

/// Error body returned by the GitHub API.
#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// The subset of a contents response we care about.
#[derive(Deserialize)]
struct ContentEntry {
    sha: String,
}

/// Contents API endpoint for `path` in the target repository.
pub fn contents_url(api_base: &str, target: &PublishTarget, path: &str) -> String {
    format!(
        "{}/repos/{}/{}/contents/{}",
        api_base.trim_end_matches('/'),
        encode_path(target.owner()),
        encode_path(target.repository()),
        encode_path(path)
    )
}

/// Turn a non-2xx response into [`PublishError::RemoteRejected`], surfacing
/// the body's `message` field when there is one.
fn rejected(response: &HttpResponse, path: &str) -> PublishError {
    let message = serde_json::from_str::<ApiError>(&response.body)
        .map(|e| e.message)
        .unwrap_or_else(|_| format!("HTTP {}", response.status));

    PublishError::RemoteRejected {
        status: response.status,
        path: path.to_string(),
        message,
    }
}

/// Sha of the file a contents `GET` found, `None` on 404.
///
/// A 2xx body that is not a single file (a directory listing, for one) is
/// rejected here; otherwise the following sha-less `PUT` would fail with a
/// misleading "sha wasn't supplied".
fn existing_sha(response: &HttpResponse, path: &str) -> Result<Option<String>, PublishError> {
    match response.status {
        404 => Ok(None),
        _ if response.is_success() => serde_json::from_str::<ContentEntry>(&response.body)
            .map(|entry| Some(entry.sha))
            .map_err(|_| PublishError::RemoteRejected {
                status: response.status,
                path: path.to_string(),
                message: format!("'{path}' exists but is not a file"),
            }),
        _ => Err(rejected(response, path)),
    }
}

/// GitHub REST client for repository contents.
#[derive(Debug, Clone)]
pub struct GitHubContents {
    api_base: String,
}

impl GitHubContents {
    pub fn new() -> Self {
        Self::with_api_base(GITHUB_API_BASE)
    }

    /// Point the client at a different API host (GitHub Enterprise).
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }
}

impl Default for GitHubContents {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for GitHubContents {
    async fn put_file(
        &self,
        target: &PublishTarget,
        path: &str,
        request: &PutFileRequest,
    ) -> Result<(), PublishError> {
        let url = contents_url(&self.api_base, target, path);
        let body = serde_json::to_string(request)
            .map_err(|e| PublishError::Validation(format!("failed to encode request: {e}")))?;

        let response = send_json("PUT", &url, target.token(), Some(&body)).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(rejected(&response, path))
        }
    }

    async fn file_sha(&self, target: &PublishTarget, path: &str) -> Result<Option<String>, PublishError> {
        let url = format!(
            "{}?ref={GITHUB_BRANCH}",
            contents_url(&self.api_base, target, path)
        );

        let response = send_json("GET", &url, target.token(), None).await?;
        existing_sha(&response, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> PublishTarget {
        PublishTarget::new("token", "octocat", "slides").unwrap()
    }

    #[test]
    fn test_contents_url() {
        assert_eq!(
            contents_url("https://api.github.com/", &target(), "trip/index.html"),
            "https://api.github.com/repos/octocat/slides/contents/trip/index.html"
        );
    }

    #[test]
    fn test_contents_url_encodes_segments() {
        assert_eq!(
            contents_url(GITHUB_API_BASE, &target(), "trip/1.we#b"),
            "https://api.github.com/repos/octocat/slides/contents/trip/1.we%23b"
        );
    }

    #[test]
    fn test_rejected_surfaces_remote_message() {
        let response = HttpResponse {
            status: 422,
            body: r#"{"message":"Invalid request.\n\n\"sha\" wasn't supplied."}"#.to_string(),
        };
        match rejected(&response, "trip/index.html") {
            PublishError::RemoteRejected {
                status,
                path,
                message,
            } => {
                assert_eq!(status, 422);
                assert_eq!(path, "trip/index.html");
                assert!(message.starts_with("Invalid request."));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_rejected_without_json_body() {
        let response = HttpResponse {
            status: 502,
            body: "<html>Bad gateway</html>".to_string(),
        };
        assert_eq!(
            rejected(&response, "x").to_string(),
            "GitHub API error: HTTP 502"
        );
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_existing_sha_missing_file() {
        let found = existing_sha(&response(404, r#"{"message":"Not Found"}"#), "trip/1.png");
        assert_eq!(found, Ok(None));
    }

    #[test]
    fn test_existing_sha_of_file() {
        let body = r#"{"type":"file","name":"1.png","path":"trip/1.png","sha":"3d21ec53a331a6f037a91c368710b99387d012c1"}"#;
        assert_eq!(
            existing_sha(&response(200, body), "trip/1.png"),
            Ok(Some("3d21ec53a331a6f037a91c368710b99387d012c1".to_string()))
        );
    }

    #[test]
    fn test_existing_sha_rejects_directory_listing() {
        let body = r#"[{"type":"file","name":"index.html","sha":"abc"}]"#;
        match existing_sha(&response(200, body), "trip") {
            Err(PublishError::RemoteRejected { status, path, .. }) => {
                assert_eq!(status, 200);
                assert_eq!(path, "trip");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_existing_sha_surfaces_auth_failure() {
        let err = existing_sha(&response(401, r#"{"message":"Bad credentials"}"#), "trip/index.html")
            .unwrap_err();
        assert_eq!(err.to_string(), "GitHub API error: Bad credentials");
    }

    #[test]
    fn test_success_range() {
        let ok = |status| HttpResponse {
            status,
            body: String::new(),
        };
        assert!(ok(200).is_success());
        assert!(ok(201).is_success());
        assert!(!ok(404).is_success());
        assert!(!ok(301).is_success());
    }
}
