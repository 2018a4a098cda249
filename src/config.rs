//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Runtime configuration (GitHub credentials) lives in localStorage and is
//! handled by [`crate::core::settings`].

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the header.
pub const APP_NAME: &str = "Slidecast";

/// Tagline displayed under the title.
pub const APP_TAGLINE: &str = "Upload images to get an embeddable slideshow for Notion";

// =============================================================================
// GitHub Configuration
// =============================================================================

/// Base URL of the GitHub REST API.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Branch every file is committed to.
pub const GITHUB_BRANCH: &str = "main";

/// Media type requested from the contents API.
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Commit messages used by the publish pipeline.
pub mod commit_messages {
    /// Commit message for the slideshow document.
    pub const DOCUMENT: &str = "Create slideshow HTML";

    /// Commit message for the `n`-th slide image.
    pub fn slide(n: usize) -> String {
        format!("Upload slide {n}")
    }
}

/// Public GitHub Pages URL for a published folder. The folder is
/// percent-encoded since it is free-form user input.
pub fn pages_url(owner: &str, repository: &str, folder: &str) -> String {
    format!(
        "https://{owner}.github.io/{repository}/{}/index.html",
        crate::utils::url::encode_segment(folder)
    )
}

// =============================================================================
// Network Configuration
// =============================================================================

/// Upload request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 30000;

// =============================================================================
// Storage Configuration
// =============================================================================

/// localStorage key for the persisted GitHub settings.
pub const SETTINGS_KEY: &str = "githubInfo";

// =============================================================================
// Publish Configuration
// =============================================================================

/// Prefix of the generated folder name when the user leaves it empty.
pub const DEFAULT_FOLDER_PREFIX: &str = "slideshow-";

/// Autoplay interval offered in the publish panel, in milliseconds.
pub const AUTOPLAY_INTERVAL_MS: u32 = 5000;

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
/// Change this value to switch icon styles globally.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;

/// localStorage key for the explicit light/dark choice.
pub const THEME_KEY: &str = "slidecastTheme";

// =============================================================================
// Gallery Configuration
// =============================================================================

/// Drag ghost image configuration.
pub mod ghost {
    /// Edge length of the reduced-size drag proxy in CSS pixels.
    pub const SIZE_PX: i32 = 100;
    /// Opacity of the drag proxy.
    pub const OPACITY: &str = "0.8";
    /// Off-screen offset so the proxy never flashes in the layout.
    pub const OFFSCREEN_TOP: &str = "-1000px";
}

/// MIME prefix of files accepted into the gallery.
pub const IMAGE_MIME_PREFIX: &str = "image/";

// =============================================================================
// Emitted Document
// =============================================================================

/// Static pieces of the generated slideshow document.
pub mod emitter {
    /// Embedded stylesheet of the slideshow document.
    pub const DOCUMENT_STYLE: &str = r#"
body, html {
  margin: 0;
  padding: 0;
  height: 100%;
  overflow: hidden;
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
}
.deck {
  position: relative;
  width: 100%;
  height: 100vh;
  background-color: #000;
}
.slide {
  display: none;
  position: absolute;
  top: 0;
  left: 0;
  width: 100%;
  height: 100%;
  justify-content: center;
  align-items: center;
}
.slide.active {
  display: flex;
}
.slide img {
  max-width: 100%;
  max-height: 100%;
  object-fit: contain;
}
.nav-button {
  position: absolute;
  top: 50%;
  transform: translateY(-50%);
  background-color: rgba(255, 255, 255, 0.3);
  color: white;
  border: none;
  border-radius: 50%;
  width: 50px;
  height: 50px;
  font-size: 24px;
  cursor: pointer;
  z-index: 10;
  transition: background-color 0.3s;
}
.nav-button:hover {
  background-color: rgba(255, 255, 255, 0.5);
}
.prev {
  left: 20px;
}
.next {
  right: 20px;
}
.indicators {
  position: absolute;
  bottom: 20px;
  left: 50%;
  transform: translateX(-50%);
  display: flex;
  gap: 10px;
}
.dot {
  width: 12px;
  height: 12px;
  border-radius: 50%;
  background-color: rgba(255, 255, 255, 0.3);
  cursor: pointer;
  transition: background-color 0.3s;
}
.dot.active {
  background-color: white;
}
"#;

    /// Navigation logic. Expects `autoplayInterval` to be declared first.
    pub const NAVIGATION_SCRIPT: &str = r#"let slideIndex = 1;
let autoplayTimer = null;
const slides = document.getElementsByClassName("slide");
const dots = document.getElementsByClassName("dot");

function showSlide(n) {
  if (slides.length === 0) { return; }
  if (n > slides.length) { slideIndex = 1; }
  if (n < 1) { slideIndex = slides.length; }
  for (let i = 0; i < slides.length; i++) {
    slides[i].classList.toggle("active", i === slideIndex - 1);
  }
  for (let i = 0; i < dots.length; i++) {
    dots[i].classList.toggle("active", i === slideIndex - 1);
  }
}

function restartAutoplay() {
  if (autoplayInterval <= 0 || slides.length < 2) { return; }
  clearInterval(autoplayTimer);
  autoplayTimer = setInterval(function () { showSlide(slideIndex += 1); }, autoplayInterval);
}

function changeSlide(n) {
  showSlide(slideIndex += n);
  restartAutoplay();
}

function currentSlide(n) {
  showSlide(slideIndex = n);
  restartAutoplay();
}

showSlide(slideIndex);
restartAutoplay();
"#;
}
