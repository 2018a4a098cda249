//! Publish status shown by the publish panel.

use crate::core::{PublicUrl, PublishProgress};

/// Where the publish pipeline currently is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PublishStatus {
    /// Nothing has been published in this session.
    #[default]
    Idle,
    /// Uploads in flight.
    Publishing { completed: usize, total: usize },
    /// Every file was uploaded.
    Published { url: String },
    /// The pipeline stopped; files uploaded before the failure remain.
    Failed { message: String },
}

impl PublishStatus {
    /// Status right after the pipeline starts with `total` files to upload.
    pub fn started(total: usize) -> Self {
        Self::Publishing {
            completed: 0,
            total,
        }
    }

    pub fn from_progress(progress: &PublishProgress) -> Self {
        Self::Publishing {
            completed: progress.completed,
            total: progress.total,
        }
    }

    pub fn published(url: &PublicUrl) -> Self {
        Self::Published {
            url: url.as_str().to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Whether a publish is running. The Generate button is disabled meanwhile.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Publishing { .. })
    }

    /// Published URL, if the last run succeeded.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Published { url } => Some(url),
            _ => None,
        }
    }

    /// Status line, or `None` when idle.
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Idle => None,
            Self::Publishing { completed, total } => {
                Some(format!("Uploading... ({completed}/{total})"))
            }
            Self::Published { .. } => Some("Slideshow published".to_string()),
            Self::Failed { message } => Some(format!("Error: {message}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_labels() {
        assert_eq!(PublishStatus::Idle.label(), None);
        assert_eq!(
            PublishStatus::started(4).label().as_deref(),
            Some("Uploading... (0/4)")
        );

        let progress = PublishProgress {
            completed: 2,
            total: 4,
            path: "trip/1.png".to_string(),
        };
        let status = PublishStatus::from_progress(&progress);
        assert!(status.is_busy());
        assert_eq!(status.label().as_deref(), Some("Uploading... (2/4)"));
    }

    #[test]
    fn test_failed_is_not_busy() {
        let status = PublishStatus::failed("GitHub API error: Bad credentials");
        assert!(!status.is_busy());
        assert_eq!(status.url(), None);
        assert_eq!(
            status.label().as_deref(),
            Some("Error: GitHub API error: Bad credentials")
        );
    }

    #[test]
    fn test_published_exposes_url() {
        let status = PublishStatus::Published {
            url: "https://octocat.github.io/slides/trip/index.html".to_string(),
        };
        assert_eq!(
            status.url(),
            Some("https://octocat.github.io/slides/trip/index.html")
        );
        assert!(!status.is_busy());
    }
}
