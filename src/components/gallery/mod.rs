//! Image gallery: drop zone, file picker and the reorderable thumbnail grid.
//!
//! - [`Gallery`] - Drop zone and grid container
//! - [`Thumbnail`] - One draggable image cell

mod thumbnail;

use leptos::logging::log;
use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, HtmlInputElement};

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::ImageId;
use crate::utils::files::{file_list_to_vec, read_image_files};

pub use thumbnail::Thumbnail;

stylance::import_crate_style!(css, "src/components/gallery/gallery.module.css");

/// What a grid cell needs to render, snapshot from the collection.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ThumbnailEntry {
    id: ImageId,
    name: String,
    mime: String,
    size: u64,
    preview: Option<String>,
}

#[component]
pub fn Gallery() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let input_ref = NodeRef::<leptos::html::Input>::new();
    let file_hover = RwSignal::new(false);

    let ingest = move |files: Vec<File>| {
        if files.is_empty() {
            return;
        }
        spawn_local(async move {
            let (images, report) = read_image_files(files).await;
            log!(
                "read {} files ({} skipped)",
                report.accepted + report.skipped,
                report.skipped
            );
            ctx.add_images(images, report);
        });
    };

    let open_picker = move || {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let handle_change = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        if let Some(list) = input.files() {
            ingest(file_list_to_vec(&list));
        }
        // Allow picking the same file again.
        input.set_value("");
    };

    // Reorder drags are handled by the thumbnails; the zone only takes files.
    let handle_dragover = move |ev: leptos::ev::DragEvent| {
        if ctx.drag.with_untracked(|d| d.is_idle()) {
            ev.prevent_default();
            file_hover.set(true);
        }
    };

    let handle_dragleave = move |_: leptos::ev::DragEvent| {
        file_hover.set(false);
    };

    let handle_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        file_hover.set(false);
        if !ctx.drag.with_untracked(|d| d.is_idle()) {
            return;
        }
        if let Some(list) = ev.data_transfer().and_then(|dt| dt.files()) {
            ingest(file_list_to_vec(&list));
        }
    };

    let handle_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if matches!(ev.key().as_str(), "Enter" | " ") {
            ev.prevent_default();
            open_picker();
        }
    };

    let zone_class = move || {
        if file_hover.get() {
            format!("{} {}", css::dropZone, css::dropZoneActive)
        } else {
            css::dropZone.to_string()
        }
    };

    let entries = Signal::derive(move || {
        ctx.images.with(|collection| {
            collection
                .iter()
                .map(|item| ThumbnailEntry {
                    id: item.id(),
                    name: item.name().to_string(),
                    mime: item.mime().to_string(),
                    size: item.bytes().len() as u64,
                    preview: item.preview_url().map(str::to_string),
                })
                .collect::<Vec<_>>()
        })
    });
    let count = Signal::derive(move || ctx.images.with(|c| c.len()));

    view! {
        <section class=css::gallery aria-label="Images">
            <div
                class=zone_class
                role="button"
                tabindex="0"
                on:click=move |_: leptos::ev::MouseEvent| open_picker()
                on:keydown=handle_keydown
                on:dragover=handle_dragover
                on:dragleave=handle_dragleave
                on:drop=handle_drop
            >
                <span class=css::zoneIcon aria-hidden="true"><Icon icon=ic::ADD_IMAGE /></span>
                <p>"Drop images here or click to choose files"</p>
                <input
                    node_ref=input_ref
                    class=css::hiddenInput
                    type="file"
                    accept="image/*"
                    multiple=true
                    on:change=handle_change
                    on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()
                />
            </div>

            {move || ctx.notice.get().map(|msg| view! { <p class=css::notice>{msg}</p> })}

            <Show when=move || { count.get() > 0 }>
                <div class=css::toolbar>
                    <span>{move || format!("{} images", count.get())}</span>
                    <button
                        class=css::clearButton
                        on:click=move |_: leptos::ev::MouseEvent| ctx.clear_images()
                    >
                        <Icon icon=ic::CLEAR />
                        " Clear all"
                    </button>
                </div>
            </Show>

            <div class=css::grid role="list">
                <For
                    each=move || entries.get()
                    key=|entry| entry.id
                    children=move |entry| {
                        view! {
                            <Thumbnail
                                id=entry.id
                                name=entry.name
                                mime=entry.mime
                                size=entry.size
                                preview=entry.preview
                            />
                        }
                    }
                />
            </div>
        </section>
    }
}
