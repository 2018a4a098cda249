//! Root application module.
//!
//! Contains the main App component, AppContext definition, and
//! application-level setup logic following Leptos conventions.

use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos_icons::Icon;
use leptos_use::use_media_query;

use crate::components::icons as ic;
use crate::components::{Gallery, PublishPanel, SettingsPanel};
use crate::config::{APP_NAME, APP_TAGLINE, THEME_KEY};
use crate::core::error::{CollectionError, SettingsError};
use crate::core::ingest::IngestReport;
use crate::core::{
    DragState, GitHubSettings, ImageCollection, ImageId, IncomingImage, LocalStorageSettings,
    SettingsStore,
};
use crate::models::{PublishStatus, Theme};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/app.module.css");

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// This context is provided at the root of the component tree and can be
/// accessed from any child component using `use_context::<AppContext>()`.
///
/// # Architecture
///
/// - **Images**: the ordered collection every panel reads from
/// - **Drag**: reorder state of the gallery
/// - **Settings**: GitHub credentials, mirrored to localStorage on save
/// - **Publish status**: progress and outcome of the last publish
///
/// # Note
///
/// This struct is `Copy` because all fields are Leptos signals.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub images: RwSignal<ImageCollection>,
    pub drag: RwSignal<DragState>,
    pub settings: RwSignal<GitHubSettings>,
    pub publish_status: RwSignal<PublishStatus>,
    /// Transient message shown under the gallery (skipped files etc.).
    pub notice: RwSignal<Option<String>>,
}

impl AppContext {
    /// Creates a new application context, restoring saved settings.
    pub fn new() -> Self {
        let settings = LocalStorageSettings.get().unwrap_or_default();
        Self {
            images: RwSignal::new(ImageCollection::new()),
            drag: RwSignal::new(DragState::new()),
            settings: RwSignal::new(settings),
            publish_status: RwSignal::new(PublishStatus::Idle),
            notice: RwSignal::new(None),
        }
    }

    /// Append freshly read images after the current ones.
    pub fn add_images(&self, incoming: Vec<IncomingImage>, report: IngestReport) {
        if !incoming.is_empty() {
            let ids = self.images.try_update(|c| c.append(incoming)).unwrap_or_default();
            log!("added {} images", ids.len());
        }
        self.notice.set(report.skipped_message());
    }

    pub fn remove_image(&self, id: ImageId) -> Result<(), CollectionError> {
        self.images
            .try_update(|c| c.remove(id).map(drop))
            .unwrap_or(Err(CollectionError::NotFound(id)))
    }

    pub fn clear_images(&self) {
        self.images.update(ImageCollection::clear);
        self.drag.update(DragState::abort);
        self.notice.set(None);
    }

    /// Persist and apply new settings.
    pub fn save_settings(&self, settings: GitHubSettings) -> Result<(), SettingsError> {
        LocalStorageSettings.set(&settings)?;
        self.settings.set(settings);
        Ok(())
    }

    /// Forget the stored credentials.
    pub fn logout(&self) {
        if let Err(e) = LocalStorageSettings.clear() {
            warn!("failed to clear settings: {e}");
        }
        self.settings.set(GitHubSettings::default());
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Theme
// ============================================================================

fn stored_theme() -> Option<Theme> {
    dom::local_storage()?
        .get_item(THEME_KEY)
        .ok()??
        .parse()
        .ok()
}

fn store_theme(theme: Theme) {
    if let Some(storage) = dom::local_storage() {
        let _ = storage.set_item(THEME_KEY, theme.as_str());
    }
}

/// Light/dark switch. Follows the system preference until the user picks
/// one explicitly.
#[component]
fn ThemeToggle() -> impl IntoView {
    let prefers_dark = use_media_query("(prefers-color-scheme: dark)".to_string());
    let chosen = RwSignal::new(stored_theme());
    let theme = Signal::derive(move || {
        chosen
            .get()
            .unwrap_or_else(|| Theme::from_dark(prefers_dark.get()))
    });

    Effect::new(move |_| {
        let theme = theme.get();
        if let Some(root) = dom::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    });

    let toggle = move |_: leptos::ev::MouseEvent| {
        let next = theme.get_untracked().toggled();
        store_theme(next);
        chosen.set(Some(next));
    };

    view! {
        <button
            class=css::themeToggle
            on:click=toggle
            aria-label=move || {
                if theme.get().is_dark() { "Switch to light mode" } else { "Switch to dark mode" }
            }
        >
            <Icon icon=Signal::derive(move || {
                if theme.get().is_dark() { ic::SUN } else { ic::MOON }
            }) />
        </button>
    }
}

// ============================================================================
// App
// ============================================================================

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Wraps the app in an ErrorBoundary for graceful error handling
/// - Renders the settings, gallery and publish panels
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div class=css::errorScreen>
                    <h1>"Something went wrong"</h1>
                    <p>"An unexpected error occurred. Please try reloading the page."</p>
                    <details>
                        <summary>"Error details"</summary>
                        <ul>
                            {move || errors.get()
                                .into_iter()
                                .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                .collect::<Vec<_>>()
                            }
                        </ul>
                    </details>
                    <button
                        on:click=move |_| {
                            if let Some(window) = web_sys::window() {
                                let _ = window.location().reload();
                            }
                        }
                    >
                        "Reload Page"
                    </button>
                </div>
            }
        >
            <main class=css::app>
                <header class=css::header>
                    <div>
                        <h1 class=css::title>{APP_NAME}</h1>
                        <p class=css::tagline>{APP_TAGLINE}</p>
                    </div>
                    <ThemeToggle />
                </header>
                <SettingsPanel />
                <Gallery />
                <PublishPanel />
            </main>
        </ErrorBoundary>
    }
}
