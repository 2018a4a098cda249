//! Drag-and-drop reorder controller.
//!
//! Turns a pointer gesture over the thumbnail grid into a single
//! "move item A next to item B" instruction on the [`ImageCollection`].
//!
//! ```text
//! Idle ──begin──▶ Dragging ──enter──▶ Hovering ──drop──▶ Idle (collection mutated)
//!                    │                   │ ▲
//!                    │                   │ └─enter (recompute side)
//!                    │                   └─leave──▶ Dragging
//!                    └──────── abort ─────────────▶ Idle (no mutation)
//! ```
//!
//! The browser layer supplies pointer positions, bounding boxes and the
//! grid's computed style; everything else lives here so it can be tested
//! without a DOM.

use leptos::logging::warn;

use crate::core::collection::{ImageCollection, ImageId};

// =============================================================================
// Geometry
// =============================================================================

/// Main axis along which the gallery lays out its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutAxis {
    /// Row or 2-D grid: left/right halves decide the side.
    #[default]
    Horizontal,
    /// Single column list: top/bottom halves decide the side.
    Vertical,
}

impl LayoutAxis {
    /// Detect the axis from the container's computed grid style.
    ///
    /// A container flowing by column, or one with explicit template
    /// columns, is treated as horizontal.
    pub fn from_grid_style(grid_auto_flow: &str, grid_template_columns: &str) -> Self {
        let columns = grid_template_columns.trim();
        if grid_auto_flow.trim() == "column" || (!columns.is_empty() && columns != "none") {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }
}

/// Axis-aligned bounding box in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Pointer position in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Which side of the hovered item the dragged item will land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSide {
    Before,
    After,
}

impl DropSide {
    /// Half-plane test: a pointer at or past the midpoint of `rect` along
    /// `axis` is [`DropSide::After`].
    pub fn from_pointer(axis: LayoutAxis, rect: Rect, pointer: Point) -> Self {
        let past_midpoint = match axis {
            LayoutAxis::Horizontal => pointer.x >= rect.left + rect.width / 2.0,
            LayoutAxis::Vertical => pointer.y >= rect.top + rect.height / 2.0,
        };
        if past_midpoint { Self::After } else { Self::Before }
    }

}

/// Final index for the dragged item, given the hovered index `hovered`,
/// the dragged item's current index `dragged` and the drop side.
///
/// | side   | relation           | result        |
/// |--------|--------------------|---------------|
/// | After  | hovered > dragged  | hovered       |
/// | After  | hovered < dragged  | hovered + 1   |
/// | Before | hovered < dragged  | hovered       |
/// | Before | hovered > dragged  | hovered - 1   |
///
/// Dropping an item on itself yields its own index. The result is always
/// within `[0, len - 1]` when both inputs are valid indices.
pub fn resolve_target_index(side: DropSide, hovered: usize, dragged: usize) -> usize {
    use std::cmp::Ordering::{Equal, Greater, Less};

    match (side, hovered.cmp(&dragged)) {
        (_, Equal) => hovered,
        (DropSide::After, Greater) => hovered,
        (DropSide::After, Less) => hovered + 1,
        (DropSide::Before, Less) => hovered,
        (DropSide::Before, Greater) => hovered - 1,
    }
}

// =============================================================================
// Gesture State
// =============================================================================

/// Phase of the current drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging {
        dragged: ImageId,
    },
    Hovering {
        dragged: ImageId,
        target: ImageId,
        side: DropSide,
    },
}

/// Outcome of a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The dragged item was moved to `index`.
    Moved { id: ImageId, index: usize },
    /// No gesture was active, or an identity vanished mid-gesture.
    Ignored,
}

/// Transient, single-writer state for one drag gesture.
///
/// Every exit path (`drop`, `abort`) returns to [`DragPhase::Idle`], which
/// also clears the drop indicator since it is derived from this state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragState {
    phase: DragPhase,
    axis: LayoutAxis,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis(&self) -> LayoutAxis {
        self.axis
    }

    pub fn is_idle(&self) -> bool {
        self.phase == DragPhase::Idle
    }

    /// Identity being dragged, if a gesture is active.
    pub fn dragged(&self) -> Option<ImageId> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Dragging { dragged } | DragPhase::Hovering { dragged, .. } => Some(dragged),
        }
    }

    /// Item and side the drop indicator should currently be drawn on.
    pub fn indicator(&self) -> Option<(ImageId, DropSide)> {
        match self.phase {
            DragPhase::Hovering { target, side, .. } => Some((target, side)),
            _ => None,
        }
    }

    /// Idle → Dragging.
    ///
    /// Returns `false` (and changes nothing) if a gesture is already active.
    pub fn begin(&mut self, dragged: ImageId, axis: LayoutAxis) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.phase = DragPhase::Dragging { dragged };
        self.axis = axis;
        true
    }

    /// Pointer entered (or re-entered) `target`'s hit region.
    ///
    /// Entering the dragged item itself shows no indicator.
    pub fn enter(&mut self, target: ImageId, rect: Rect, pointer: Point) {
        let Some(dragged) = self.dragged() else {
            return;
        };
        if target == dragged {
            self.phase = DragPhase::Dragging { dragged };
            return;
        }
        let side = DropSide::from_pointer(self.axis, rect, pointer);
        self.phase = DragPhase::Hovering {
            dragged,
            target,
            side,
        };
    }

    /// Pointer left `target`'s hit region.
    ///
    /// `still_inside` is true when the pointer only moved onto a child
    /// element of the target; the indicator is kept in that case.
    pub fn leave(&mut self, target: ImageId, still_inside: bool) {
        if still_inside {
            return;
        }
        if let DragPhase::Hovering {
            dragged,
            target: current,
            ..
        } = self.phase
            && current == target
        {
            self.phase = DragPhase::Dragging { dragged };
        }
    }

    /// Release over `target`: resolve the final index with the same
    /// half-plane test and move the dragged item there.
    ///
    /// A missing identity is logged and treated as a no-op.
    pub fn drop_on(
        &mut self,
        target: ImageId,
        rect: Rect,
        pointer: Point,
        collection: &mut ImageCollection,
    ) -> DropOutcome {
        let Some(dragged) = self.dragged() else {
            return DropOutcome::Ignored;
        };
        let side = DropSide::from_pointer(self.axis, rect, pointer);
        self.reset();

        let (Some(from), Some(hovered)) = (collection.index_of(dragged), collection.index_of(target))
        else {
            warn!("drop ignored: {dragged} or {target} is no longer in the collection");
            return DropOutcome::Ignored;
        };

        let index = resolve_target_index(side, hovered, from);
        match collection.move_to(dragged, index) {
            Ok(()) => DropOutcome::Moved { id: dragged, index },
            Err(e) => {
                warn!("drop ignored: {e}");
                DropOutcome::Ignored
            }
        }
    }

    /// Gesture ended without a drop. Clears everything, never mutates the
    /// collection.
    pub fn abort(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = DragPhase::Idle;
    }
}
