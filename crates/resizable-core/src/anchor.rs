//! Anchor points: which edges of the frame a drag is allowed to move.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Sign multipliers describing which components of the frame a gesture
/// modifies.
///
/// `adjusts_x`/`adjusts_y` are 0 or 1 and mark edges whose movement also
/// shifts the origin (left and top). `adjusts_w`/`adjusts_h` are -1, 0 or 1
/// and give the direction in which pointer travel changes the size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub adjusts_x: f64,
    pub adjusts_y: f64,
    pub adjusts_h: f64,
    pub adjusts_w: f64,
}

impl AnchorPoint {
    /// Move-only anchor: the whole frame follows the touch.
    pub const NO_RESIZE: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const UPPER_LEFT: Self = Self::new(1.0, 1.0, -1.0, 1.0);
    pub const MIDDLE_LEFT: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const LOWER_LEFT: Self = Self::new(1.0, 0.0, 1.0, 1.0);
    pub const UPPER_MIDDLE: Self = Self::new(0.0, 1.0, -1.0, 0.0);
    pub const UPPER_RIGHT: Self = Self::new(0.0, 1.0, -1.0, -1.0);
    pub const MIDDLE_RIGHT: Self = Self::new(0.0, 0.0, 0.0, -1.0);
    pub const LOWER_RIGHT: Self = Self::new(0.0, 0.0, 1.0, -1.0);
    pub const LOWER_MIDDLE: Self = Self::new(0.0, 0.0, 1.0, 0.0);

    const fn new(adjusts_x: f64, adjusts_y: f64, adjusts_h: f64, adjusts_w: f64) -> Self {
        Self {
            adjusts_x,
            adjusts_y,
            adjusts_h,
            adjusts_w,
        }
    }

    /// Whether this anchor resizes the frame (as opposed to moving it).
    pub fn is_resizing(&self) -> bool {
        self.adjusts_h != 0.0 || self.adjusts_w != 0.0
    }

    /// Whether dragging moves the left edge.
    pub fn moves_left_edge(&self) -> bool {
        self.adjusts_x != 0.0
    }

    /// Whether dragging moves the top edge.
    pub fn moves_top_edge(&self) -> bool {
        self.adjusts_y != 0.0
    }

    /// Human-readable name, used in log output.
    pub fn name(&self) -> &'static str {
        match *self {
            a if a == Self::UPPER_LEFT => "upper-left",
            a if a == Self::MIDDLE_LEFT => "middle-left",
            a if a == Self::LOWER_LEFT => "lower-left",
            a if a == Self::UPPER_MIDDLE => "upper-middle",
            a if a == Self::UPPER_RIGHT => "upper-right",
            a if a == Self::MIDDLE_RIGHT => "middle-right",
            a if a == Self::LOWER_RIGHT => "lower-right",
            a if a == Self::LOWER_MIDDLE => "lower-middle",
            _ => "move",
        }
    }

    /// Classify a touch location (in view-local coordinates) against the
    /// content rect.
    ///
    /// A touch within `border` of an edge of `content`, or outside `content`
    /// altogether (inside the inset margin), grabs that edge. When both
    /// opposite edges qualify the nearer one wins. Returns
    /// [`AnchorPoint::NO_RESIZE`] for interior touches.
    pub fn for_location(location: Point, content: Rect, border: f64) -> Self {
        let horizontal = nearest_side(location.x, content.x0, content.x1, border);
        let vertical = nearest_side(location.y, content.y0, content.y1, border);

        match (horizontal, vertical) {
            (Side::Low, Side::Low) => Self::UPPER_LEFT,
            (Side::Low, Side::Middle) => Self::MIDDLE_LEFT,
            (Side::Low, Side::High) => Self::LOWER_LEFT,
            (Side::Middle, Side::Low) => Self::UPPER_MIDDLE,
            (Side::Middle, Side::Middle) => Self::NO_RESIZE,
            (Side::Middle, Side::High) => Self::LOWER_MIDDLE,
            (Side::High, Side::Low) => Self::UPPER_RIGHT,
            (Side::High, Side::Middle) => Self::MIDDLE_RIGHT,
            (Side::High, Side::High) => Self::LOWER_RIGHT,
        }
    }

    /// Apply pointer travel from `previous` to `current` to `frame`.
    ///
    /// No clamping happens here; see [`crate::constraints`].
    pub fn resize(&self, frame: Rect, previous: Point, current: Point) -> Rect {
        let delta_w = self.adjusts_w * (previous.x - current.x);
        let delta_x = self.adjusts_x * -delta_w;
        let delta_h = self.adjusts_h * (current.y - previous.y);
        let delta_y = self.adjusts_y * -delta_h;

        // Left unnormalized: a negative size is for the min-size clamp to fix.
        let x0 = frame.x0 + delta_x;
        let y0 = frame.y0 + delta_y;
        Rect::new(x0, y0, x0 + frame.width() + delta_w, y0 + frame.height() + delta_h)
    }

    /// Translate `frame` by the pointer travel (move-only gestures).
    pub fn translate(frame: Rect, previous: Point, current: Point) -> Rect {
        frame + Vec2::new(current.x - previous.x, current.y - previous.y)
    }
}

impl Default for AnchorPoint {
    fn default() -> Self {
        Self::NO_RESIZE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Low,
    Middle,
    High,
}

fn nearest_side(value: f64, low: f64, high: f64, border: f64) -> Side {
    let near_low = value < low + border;
    let near_high = value > high - border;
    match (near_low, near_high) {
        (true, true) => {
            if value - low <= high - value {
                Side::Low
            } else {
                Side::High
            }
        }
        (true, false) => Side::Low,
        (false, true) => Side::High,
        (false, false) => Side::Middle,
    }
}
