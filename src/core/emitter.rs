//! Static slideshow document generation.
//!
//! [`emit`] is a pure function from an ordered image list and a title to a
//! single self-contained HTML document. The document references its images
//! as sibling files named `1.<ext>`, `2.<ext>`, ... which is exactly the
//! naming the publish pipeline uploads under (both go through
//! [`asset_name`]).
//!
//! Output is deterministic: nothing time- or environment-dependent is
//! written into the markup.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::config::emitter::{DOCUMENT_STYLE, NAVIGATION_SCRIPT};

// =============================================================================
// Asset Naming
// =============================================================================

/// Anything that can become a slide: a file name and its bytes.
pub trait SlideAsset {
    /// Original file name, used for extension derivation.
    fn file_name(&self) -> &str;
    /// Raw image bytes.
    fn content(&self) -> &[u8];
}

/// Extension of `name`: everything after the last `.`.
///
/// Returns an empty string when there is no `.` or when the only
/// candidate dot is the very first character (`".png"` → `""`).
pub fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[dot + 1..],
        _ => "",
    }
}

/// Canonical asset file name for the `n`-th slide (1-based).
///
/// A name without extension keeps the trailing dot: `asset_name(3, "c") == "3."`.
pub fn asset_name(n: usize, original_name: &str) -> String {
    format!("{}.{}", n, extension_of(original_name))
}

// =============================================================================
// Document
// =============================================================================

/// Emitted slideshow artifact. Never mutated, only regenerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideshowDocument {
    markup: String,
    slide_count: usize,
}

impl SlideshowDocument {
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }
}

/// Knobs for the emitted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmitOptions {
    /// Advance automatically every this many milliseconds. Manual
    /// navigation restarts the timer. `None` disables autoplay.
    pub autoplay_ms: Option<u32>,
}

/// Emit a slideshow document with default options (no autoplay).
pub fn emit<A: SlideAsset>(images: &[A], title: &str) -> SlideshowDocument {
    emit_with(images, title, &EmitOptions::default())
}

/// Emit a slideshow document.
///
/// Slides are numbered 1..N in input order; the first slide and the first
/// indicator dot start out active. An empty input still produces a
/// well-formed document with no slides, no dots and no image references.
pub fn emit_with<A: SlideAsset>(images: &[A], title: &str, options: &EmitOptions) -> SlideshowDocument {
    let slide_count = images.len();
    let markup = render(images, title, options).into_string();
    SlideshowDocument {
        markup,
        slide_count,
    }
}

fn render<A: SlideAsset>(images: &[A], title: &str, options: &EmitOptions) -> Markup {
    let autoplay_ms = options.autoplay_ms.unwrap_or(0);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(DOCUMENT_STYLE)) }
            }
            body {
                div.deck {
                    @for (index, image) in images.iter().enumerate() {
                        @let n = index + 1;
                        div.slide.active[n == 1] {
                            img src=(format!("./{}", asset_name(n, image.file_name()))) alt=(format!("Slide {n}"));
                        }
                    }
                    button.nav-button.prev type="button" onclick="changeSlide(-1)" aria-label="Previous slide" {
                        (PreEscaped("&#10094;"))
                    }
                    button.nav-button.next type="button" onclick="changeSlide(1)" aria-label="Next slide" {
                        (PreEscaped("&#10095;"))
                    }
                    div.indicators {
                        @for n in 1..=images.len() {
                            span.dot.active[n == 1] onclick=(format!("currentSlide({n})")) {}
                        }
                    }
                }
                script {
                    (PreEscaped(format!("const autoplayInterval = {autoplay_ms};\n")))
                    (PreEscaped(NAVIGATION_SCRIPT))
                }
            }
        }
    }
}

impl SlideAsset for crate::core::collection::ImageItem {
    fn file_name(&self) -> &str {
        self.name()
    }

    fn content(&self) -> &[u8] {
        self.bytes()
    }
}

impl SlideAsset for crate::core::collection::SlideFile {
    fn file_name(&self) -> &str {
        self.name()
    }

    fn content(&self) -> &[u8] {
        self.bytes()
    }
}
