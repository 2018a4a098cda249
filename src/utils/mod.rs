//! Utility modules for web, DOM, and formatting operations.
//!
//! Provides:
//! - [`dom`] - Browser API access, drag image and clipboard helpers
//! - [`fetch`] - Authenticated requests with timeout
//! - [`files`] - Reading picked or dropped image files
//! - [`format`] - Display formatting
//! - [`url`] - Path segment encoding

pub mod dom;
pub mod fetch;
pub mod files;
pub mod format;
pub mod url;
