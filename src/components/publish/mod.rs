//! Publish panel.
//!
//! Emits the slideshow document from the current gallery order, uploads it
//! with the images through [`GitHubContents`], and shows the public link.

use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::AUTOPLAY_INTERVAL_MS;
use crate::core::error::PublishError;
use crate::core::{
    EmitOptions, GitHubContents, PublishOptions, PublishTarget, SlideFile, SlideshowDocument,
    emit_with, publish, resolve_folder_name,
};
use crate::models::PublishStatus;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/publish/publish.module.css");

/// Everything one publish run needs, captured before the first await.
struct PublishJob {
    target: PublishTarget,
    folder: String,
    files: Vec<SlideFile>,
    document: SlideshowDocument,
}

impl PublishJob {
    fn prepare(ctx: AppContext, folder_input: &str, autoplay: bool) -> Result<Self, PublishError> {
        let target = ctx.settings.with_untracked(|s| s.target())?;
        let files = ctx.images.with_untracked(|c| c.snapshot());
        if files.is_empty() {
            return Err(PublishError::Validation(
                "add at least one image first".to_string(),
            ));
        }
        let folder = resolve_folder_name(folder_input, dom::now_ms())?;

        let options = EmitOptions {
            autoplay_ms: autoplay.then_some(AUTOPLAY_INTERVAL_MS),
        };
        let document = emit_with(&files, &folder, &options);

        Ok(Self {
            target,
            folder,
            files,
            document,
        })
    }

    /// Files uploaded by a full run: the document plus one per slide.
    fn total(&self) -> usize {
        self.files.len() + 1
    }
}

#[component]
pub fn PublishPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let status = ctx.publish_status;

    let folder = RwSignal::new(String::new());
    let update_existing = RwSignal::new(false);
    let autoplay = RwSignal::new(false);
    let copied = RwSignal::new(false);

    let can_publish = Signal::derive(move || {
        !status.with(PublishStatus::is_busy) && ctx.images.with(|c| !c.is_empty())
    });

    let handle_generate = move |_: leptos::ev::MouseEvent| {
        if status.with_untracked(PublishStatus::is_busy) {
            return;
        }
        copied.set(false);

        let job = match PublishJob::prepare(ctx, &folder.get_untracked(), autoplay.get_untracked())
        {
            Ok(job) => job,
            Err(e) => {
                status.set(PublishStatus::failed(e.to_string()));
                return;
            }
        };
        let options = PublishOptions {
            update_existing: update_existing.get_untracked(),
        };
        status.set(PublishStatus::started(job.total()));

        spawn_local(async move {
            let client = GitHubContents::new();
            let result = publish(
                &client,
                &job.files,
                &job.document,
                &job.folder,
                &job.target,
                options,
                |progress| status.set(PublishStatus::from_progress(&progress)),
            )
            .await;

            match result {
                Ok(url) => {
                    log!("published {url}");
                    status.set(PublishStatus::published(&url));
                }
                Err(e) => {
                    error!("publish failed: {e}");
                    status.set(PublishStatus::failed(e.to_string()));
                }
            }
        });
    };

    let handle_copy = move |_: leptos::ev::MouseEvent| {
        if let Some(url) = status.with_untracked(|s| s.url().map(str::to_string)) {
            copied.set(dom::copy_to_clipboard(&url));
        }
    };

    let status_class = move || {
        status.with(|s| match s {
            PublishStatus::Failed { .. } => format!("{} {}", css::status, css::statusError),
            _ => css::status.to_string(),
        })
    };

    view! {
        <section class=css::panel aria-label="Publish">
            <label class=css::field>
                <span>"Slideshow name"</span>
                <input
                    type="text"
                    placeholder="leave empty for an automatic name"
                    bind:value=folder
                />
            </label>
            <div class=css::options>
                <label class=css::check>
                    <input type="checkbox" bind:checked=update_existing />
                    " Replace an existing slideshow with this name"
                </label>
                <label class=css::check>
                    <input type="checkbox" bind:checked=autoplay />
                    {format!(" Advance automatically every {} seconds", AUTOPLAY_INTERVAL_MS / 1000)}
                </label>
            </div>
            <button
                class=css::generate
                on:click=handle_generate
                disabled=move || !can_publish.get()
            >
                <Icon icon=ic::UPLOAD />
                " Generate Link"
            </button>

            {move || status.with(|s| s.label()).map(|label| view! {
                <p class=status_class role="status">{label}</p>
            })}

            {move || status.with(|s| s.url().map(str::to_string)).map(|url| view! {
                <div class=css::result>
                    <a class=css::link href=url.clone() target="_blank" rel="noopener noreferrer">
                        {url.clone()}
                        " "
                        <Icon icon=ic::EXTERNAL_LINK />
                    </a>
                    <button
                        class=css::copyButton
                        on:click=handle_copy
                        aria-label="Copy link"
                    >
                        <Icon icon=Signal::derive(move || {
                            if copied.get() { ic::CHECK } else { ic::COPY }
                        }) />
                    </button>
                    <p class=css::hint>"Paste this link into a Notion /embed block."</p>
                </div>
            })}
        </section>
    }
}
