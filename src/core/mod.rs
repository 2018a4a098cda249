//! Core business logic for the slideshow builder.
//!
//! This module provides:
//! - [`ImageCollection`] ordered images with stable identity
//! - [`DragState`] drag-and-drop reorder state machine
//! - [`emit_with`] slideshow document generation
//! - [`publish`] upload pipeline and the [`GitHubContents`] client
//! - [`settings`] persisted GitHub credentials

pub mod collection;
pub mod drag;
pub mod emitter;
pub mod error;
pub mod github;
pub mod ingest;
pub mod publish;
pub mod settings;

pub use collection::{ImageCollection, ImageId, IncomingImage, PreviewHandle, SlideFile};
pub use drag::{DragState, DropOutcome, DropSide, LayoutAxis};
pub use emitter::{EmitOptions, SlideshowDocument, emit_with};
pub use github::GitHubContents;
pub use publish::{
    PublicUrl, PublishOptions, PublishProgress, PublishTarget, publish, resolve_folder_name,
};
pub use settings::{GitHubSettings, LocalStorageSettings, SettingsStore};
