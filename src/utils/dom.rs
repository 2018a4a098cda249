//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use js_sys::{Function, Reflect};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, HtmlElement, Storage, Window};

use crate::config::ghost;
use crate::core::drag::{LayoutAxis, Point, Rect};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get localStorage.
#[inline]
pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Milliseconds since the Unix epoch.
#[inline]
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Release an object URL created with `URL.createObjectURL`.
///
/// Outside the browser there is nothing to release; test builds record the
/// URL in [`revoked`] instead.
pub fn revoke_object_url(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = web_sys::Url::revoke_object_url(url);
    }
    #[cfg(test)]
    revoked::record(url);
    #[cfg(not(any(target_arch = "wasm32", test)))]
    let _ = url;
}

/// Object URLs released on the current thread.
#[cfg(test)]
pub mod revoked {
    use std::cell::RefCell;

    thread_local! {
        static URLS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    pub(super) fn record(url: &str) {
        URLS.with(|urls| urls.borrow_mut().push(url.to_string()));
    }

    /// Drain the URLs released so far.
    pub fn take() -> Vec<String> {
        URLS.with(|urls| std::mem::take(&mut *urls.borrow_mut()))
    }
}

/// Copy text to the clipboard (fire and forget).
///
/// Goes through `Reflect` since `navigator.clipboard` is missing on
/// insecure origins.
pub fn copy_to_clipboard(text: &str) -> bool {
    let Some(window) = window() else {
        return false;
    };
    let Ok(clipboard) = Reflect::get(&window.navigator(), &"clipboard".into()) else {
        return false;
    };
    let Some(write_text) = Reflect::get(&clipboard, &"writeText".into())
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
    else {
        return false;
    };
    write_text.call1(&clipboard, &text.into()).is_ok()
}

// =============================================================================
// Drag & Drop
// =============================================================================

/// Bounding box of an element.
pub fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

/// Pointer position of a drag event.
pub fn pointer(ev: &DragEvent) -> Point {
    Point {
        x: f64::from(ev.client_x()),
        y: f64::from(ev.client_y()),
    }
}

/// Layout axis of the grid container holding `item`.
pub fn layout_axis_of(item: &Element) -> LayoutAxis {
    let style = item
        .parent_element()
        .and_then(|parent| window()?.get_computed_style(&parent).ok().flatten());

    match style {
        Some(style) => LayoutAxis::from_grid_style(
            &style.get_property_value("grid-auto-flow").unwrap_or_default(),
            &style.get_property_value("grid-template-columns").unwrap_or_default(),
        ),
        None => LayoutAxis::default(),
    }
}

/// Element the listener is attached to.
pub fn current_target_element(ev: &DragEvent) -> Option<Element> {
    ev.current_target()?.dyn_into::<Element>().ok()
}

/// Whether a `dragleave` only moved the pointer onto a child of the target.
pub fn leave_stays_inside(ev: &DragEvent) -> bool {
    let Some(target) = current_target_element(ev) else {
        return false;
    };
    ev.related_target()
        .and_then(|related| related.dyn_into::<web_sys::Node>().ok())
        .is_some_and(|node| target.contains(Some(&node)))
}

/// Use a reduced-size clone of `source` as the drag image.
///
/// The clone has to be in the document while `setDragImage` snapshots it,
/// and is removed on the next tick.
pub fn set_ghost_drag_image(ev: &DragEvent, source: &Element) {
    let Some(data_transfer) = ev.data_transfer() else {
        return;
    };
    data_transfer.set_effect_allowed("move");

    let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    let Some(ghost) = source
        .clone_node_with_deep(true)
        .ok()
        .and_then(|node| node.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };

    let size = format!("{}px", ghost::SIZE_PX);
    let style = ghost.style();
    let _ = style.set_property("width", &size);
    let _ = style.set_property("height", &size);
    let _ = style.set_property("opacity", ghost::OPACITY);
    let _ = style.set_property("position", "absolute");
    let _ = style.set_property("top", ghost::OFFSCREEN_TOP);

    if body.append_child(&ghost).is_err() {
        return;
    }
    data_transfer.set_drag_image(&ghost, ghost::SIZE_PX / 2, ghost::SIZE_PX / 2);

    gloo_timers::callback::Timeout::new(0, move || ghost.remove()).forget();
}
