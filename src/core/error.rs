//! Custom error types for the application.
//!
//! Provides structured error handling with meaningful error messages
//! and proper error categorization for each domain:
//!
//! - [`CollectionError`] - Operations on the ordered image collection
//! - [`PublishError`] - Validation and upload failures while publishing
//! - [`SettingsError`] - localStorage operations for GitHub settings
//! - [`FetchError`] - Network/fetch-related errors for HTTP requests

use thiserror::Error;

use crate::core::collection::ImageId;

/// Errors raised by [`ImageCollection`](crate::core::ImageCollection) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// The referenced identity is not (or no longer) in the collection.
    #[error("image {0} not found in collection")]
    NotFound(ImageId),
}

/// Errors raised while publishing a slideshow.
///
/// `RemoteRejected` and `Transport` abort the remaining upload steps and
/// are surfaced verbatim to the caller. Nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// A required input was missing or malformed.
    #[error("{0}")]
    Validation(String),
    /// The content API answered with a non-2xx status.
    #[error("GitHub API error: {message}")]
    RemoteRejected {
        /// HTTP status code of the rejected call.
        status: u16,
        /// Repository path the call targeted.
        path: String,
        /// The `message` field of the error body.
        message: String,
    },
    /// The request could not complete (network failure, CORS, timeout).
    #[error("Network error: {0}")]
    Transport(String),
}

/// Settings persistence errors for localStorage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// localStorage not available.
    #[error("localStorage not available")]
    StorageUnavailable,
    /// Failed to serialize settings to JSON.
    #[error("failed to serialize settings: {0}")]
    Serialize(String),
    /// Failed to write to or remove from localStorage.
    #[error("failed to write to localStorage")]
    Write,
}

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, offline, DNS, ...)
    #[error("{0}")]
    NetworkError(String),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

impl From<FetchError> for PublishError {
    fn from(e: FetchError) -> Self {
        Self::Transport(e.to_string())
    }
}
