//! Frame clamping: minimum size and superview containment.
//!
//! Nothing here rejects a frame. Out-of-range proposals are pulled back to
//! the nearest valid frame.

use kurbo::{Rect, Size};

use crate::anchor::AnchorPoint;

/// Clamp a resized frame to `min`, keeping the edge opposite the dragged one
/// where it is.
pub fn clamp_min_size(proposed: Rect, anchor: AnchorPoint, min: Size) -> Rect {
    let mut frame = proposed;
    if frame.width() < min.width {
        if anchor.moves_left_edge() {
            frame.x0 = frame.x1 - min.width;
        } else {
            frame.x1 = frame.x0 + min.width;
        }
    }
    if frame.height() < min.height {
        if anchor.moves_top_edge() {
            frame.y0 = frame.y1 - min.height;
        } else {
            frame.y1 = frame.y0 + min.height;
        }
    }
    frame
}

/// Clamp a frame to `min` around its center (pinch gestures).
pub fn clamp_min_size_centered(proposed: Rect, min: Size) -> Rect {
    let center = proposed.center();
    let width = proposed.width().max(min.width);
    let height = proposed.height().max(min.height);
    Rect::from_center_size(center, (width, height))
}

/// Grow a frame from its origin until it satisfies `min`.
pub fn ensure_min_size(frame: Rect, min: Size) -> Rect {
    let frame = frame.abs();
    Rect::from_origin_size(
        frame.origin(),
        (frame.width().max(min.width), frame.height().max(min.height)),
    )
}

/// Slide a moved frame back inside `parent` without changing its size.
///
/// A frame larger than the parent is pinned to the parent's top-left corner.
pub fn contain_move(frame: Rect, parent: Rect) -> Rect {
    let x0 = slide(frame.x0, frame.width(), parent.x0, parent.x1);
    let y0 = slide(frame.y0, frame.height(), parent.y0, parent.y1);
    Rect::from_origin_size((x0, y0), frame.size())
}

/// Stop resized edges at the parent's edges.
pub fn contain_resize(frame: Rect, parent: Rect) -> Rect {
    let x0 = frame.x0.max(parent.x0);
    let y0 = frame.y0.max(parent.y0);
    let x1 = frame.x1.min(parent.x1).max(x0);
    let y1 = frame.y1.min(parent.y1).max(y0);
    Rect::new(x0, y0, x1, y1)
}

/// Whether `frame` lies entirely within `parent`.
pub fn is_contained(frame: Rect, parent: Rect) -> bool {
    frame.x0 >= parent.x0 && frame.y0 >= parent.y0 && frame.x1 <= parent.x1 && frame.y1 <= parent.y1
}

fn slide(origin: f64, extent: f64, low: f64, high: f64) -> f64 {
    if extent >= high - low {
        low
    } else {
        origin.clamp(low, high - extent)
    }
}
