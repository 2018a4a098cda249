//! Draggable thumbnail cell.
//!
//! Wires the HTML5 drag events of one grid cell to the shared
//! [`DragState`](crate::core::DragState). Measuring the cell and reading
//! the pointer happen here; deciding the drop position does not.

use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::{DropOutcome, DropSide, ImageId, LayoutAxis};
use crate::utils::dom::{
    current_target_element, element_rect, layout_axis_of, leave_stays_inside, pointer,
    set_ghost_drag_image,
};
use crate::utils::format::format_size;

stylance::import_crate_style!(css, "src/components/gallery/thumbnail.module.css");

/// Drop indicator edge for a side of the hovered cell.
fn indicator_css(axis: LayoutAxis, side: DropSide) -> &'static str {
    match (axis, side) {
        (LayoutAxis::Horizontal, DropSide::Before) => css::dropLeft,
        (LayoutAxis::Horizontal, DropSide::After) => css::dropRight,
        (LayoutAxis::Vertical, DropSide::Before) => css::dropTop,
        (LayoutAxis::Vertical, DropSide::After) => css::dropBottom,
    }
}

#[component]
pub fn Thumbnail(
    id: ImageId,
    name: String,
    mime: String,
    size: u64,
    preview: Option<String>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let position = Signal::derive(move || ctx.images.with(|c| c.index_of(id)).map(|i| i + 1));

    let handle_dragstart = move |ev: leptos::ev::DragEvent| {
        let Some(cell) = current_target_element(&ev) else {
            return;
        };
        let axis = layout_axis_of(&cell);
        if ctx.drag.try_update(|d| d.begin(id, axis)) != Some(true) {
            return;
        }
        // Firefox only starts a drag when some data is set.
        if let Some(dt) = ev.data_transfer() {
            let _ = dt.set_data("text/plain", &id.get().to_string());
        }
        set_ghost_drag_image(&ev, &cell);
    };

    let hover = move |ev: &leptos::ev::DragEvent| {
        let Some(cell) = current_target_element(ev) else {
            return;
        };
        let rect = element_rect(&cell);
        let at = pointer(ev);
        ctx.drag.maybe_update(|d| {
            let before = *d;
            d.enter(id, rect, at);
            *d != before
        });
    };

    let handle_dragenter = move |ev: leptos::ev::DragEvent| {
        if ctx.drag.with_untracked(|d| d.is_idle()) {
            return;
        }
        ev.prevent_default();
        hover(&ev);
    };

    let handle_dragover = move |ev: leptos::ev::DragEvent| {
        if ctx.drag.with_untracked(|d| d.is_idle()) {
            return;
        }
        ev.prevent_default();
        if let Some(dt) = ev.data_transfer() {
            dt.set_drop_effect("move");
        }
        hover(&ev);
    };

    let handle_dragleave = move |ev: leptos::ev::DragEvent| {
        let still_inside = leave_stays_inside(&ev);
        ctx.drag.update(|d| d.leave(id, still_inside));
    };

    let handle_drop = move |ev: leptos::ev::DragEvent| {
        if ctx.drag.with_untracked(|d| d.is_idle()) {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        let Some(cell) = current_target_element(&ev) else {
            ctx.drag.update(|d| d.abort());
            return;
        };
        let rect = element_rect(&cell);
        let at = pointer(&ev);

        let mut state = ctx.drag.get_untracked();
        let outcome = ctx
            .images
            .try_update(|c| state.drop_on(id, rect, at, c))
            .unwrap_or(DropOutcome::Ignored);
        ctx.drag.set(state);

        if let DropOutcome::Moved { id, index } = outcome {
            log!("moved {id} to position {}", index + 1);
        }
    };

    let handle_dragend = move |_: leptos::ev::DragEvent| {
        ctx.drag.update(|d| d.abort());
    };

    let handle_remove = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        if let Err(e) = ctx.remove_image(id) {
            warn!("{e}");
        }
    };

    let cell_class = move || {
        ctx.drag.with(|d| {
            let mut class = css::cell.to_string();
            if d.dragged() == Some(id) {
                class.push(' ');
                class.push_str(css::dragging);
            }
            if let Some((target, side)) = d.indicator()
                && target == id
            {
                class.push(' ');
                class.push_str(indicator_css(d.axis(), side));
            }
            class
        })
    };

    let alt = name.clone();
    let remove_label = format!("Remove {name}");
    let title = format!("{name} ({mime}, {})", format_size(size));

    view! {
        <div
            class=cell_class
            role="listitem"
            draggable="true"
            title=title
            on:dragstart=handle_dragstart
            on:dragenter=handle_dragenter
            on:dragover=handle_dragover
            on:dragleave=handle_dragleave
            on:drop=handle_drop
            on:dragend=handle_dragend
        >
            {preview.map(|src| view! { <img class=css::image src=src alt=alt draggable="false" /> })}
            <span class=css::badge>{move || position.get().unwrap_or_default()}</span>
            <button
                class=css::removeButton
                on:click=handle_remove
                aria-label=remove_label
            >
                <Icon icon=ic::CLOSE />
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_edge_follows_axis_and_side() {
        assert_eq!(indicator_css(LayoutAxis::Horizontal, DropSide::Before), css::dropLeft);
        assert_eq!(indicator_css(LayoutAxis::Horizontal, DropSide::After), css::dropRight);
        assert_eq!(indicator_css(LayoutAxis::Vertical, DropSide::Before), css::dropTop);
        assert_eq!(indicator_css(LayoutAxis::Vertical, DropSide::After), css::dropBottom);
    }
}
