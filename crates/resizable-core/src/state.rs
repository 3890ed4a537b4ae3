//! Gesture state and the result of feeding a touch event to a view.

use kurbo::Rect;

use crate::anchor::AnchorPoint;

/// Interaction state of a resizable view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A drag gesture is moving or resizing the view.
    Resizing,
}

impl ResizeState {
    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing)
    }
}

/// Why a touch event had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The view is disabled.
    Disabled,
    /// More than one touch is down and multi-touch is disabled.
    MultiTouch,
    /// A gesture is already in progress.
    AlreadyResizing,
    /// The touch started in the interior and panning is disabled.
    PanDisabled,
    /// The touch is not one this view is tracking.
    NotTracking,
    /// No gesture is in progress.
    NotResizing,
}

/// What a touch event did to the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// A gesture started with this anchor.
    Began(AnchorPoint),
    /// The frame changed to this rect (superview coordinates).
    FrameChanged(Rect),
    /// The event was accepted but the frame did not change.
    Unchanged,
    /// The gesture ended; `changed` tells whether it moved or resized the view.
    Ended { changed: bool },
    /// The event was dropped.
    Ignored(IgnoreReason),
}

impl GestureOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }
}
