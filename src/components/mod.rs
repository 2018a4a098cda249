//! UI components built with Leptos.
//!
//! - [`gallery`] - Drop zone and reorderable thumbnail grid
//! - [`icons`] - Centralized icon definitions (change theme here)
//! - [`publish`] - Generate and share the slideshow link
//! - [`settings`] - GitHub credentials form

pub mod gallery;
pub mod icons;
pub mod publish;
pub mod settings;

pub use gallery::Gallery;
pub use publish::PublishPanel;
pub use settings::SettingsPanel;
