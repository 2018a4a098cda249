//! Data models and types for the application UI.
//!
//! Contains:
//! - [`PublishStatus`] - Progress and outcome of the publish pipeline
//! - [`Theme`] - Light/dark appearance

mod status;
mod theme;

pub use status::PublishStatus;
pub use theme::Theme;
