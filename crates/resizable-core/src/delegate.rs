//! Collaborators a resizable view talks to but does not own.

use kurbo::Rect;

use crate::view::ResizableView;

/// Receives gesture lifecycle and frame-change notifications.
///
/// Every method has an empty default, so implementors only override the
/// callbacks they care about. Views hold delegates weakly.
pub trait ResizableViewDelegate {
    /// A qualifying gesture started and the editing handles are active.
    fn did_begin_editing(&self, _view: &ResizableView) {}

    /// The gesture ended or was cancelled.
    fn did_end_editing(&self, _view: &ResizableView) {}

    /// The view's frame changed.
    fn new_real_frame(&self, _view: &ResizableView) {}
}

/// The view being made resizable.
///
/// The host owns it; the resizable view only lays it out.
pub trait ContentView {
    /// Position the content within the resizable view (view-local
    /// coordinates).
    fn set_frame(&mut self, frame: Rect);
}
