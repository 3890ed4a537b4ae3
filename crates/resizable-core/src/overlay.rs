//! Border and grip overlay drawn around a resizable view's content.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::anchor::AnchorPoint;

/// Side length of a corner grip icon.
pub const GRIP_ICON_SIZE: f64 = 12.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// The corner point of `rect` this refers to.
    pub fn of(self, rect: Rect) -> Point {
        match self {
            Corner::TopLeft => Point::new(rect.x0, rect.y0),
            Corner::TopRight => Point::new(rect.x1, rect.y0),
            Corner::BottomLeft => Point::new(rect.x0, rect.y1),
            Corner::BottomRight => Point::new(rect.x1, rect.y1),
        }
    }
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// A corner grip icon and the rect it occupies (view-local coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GripIcon {
    pub corner: Corner,
    pub rect: Rect,
}

impl GripIcon {
    fn new(corner: Corner) -> Self {
        Self {
            corner,
            rect: Rect::ZERO,
        }
    }

    /// Center the icon on `position`.
    fn place(&mut self, position: Point) {
        self.rect = Rect::from_center_size(position, (GRIP_ICON_SIZE, GRIP_ICON_SIZE));
    }
}

/// Overlay laid out above the content view.
///
/// Owns the four corner grips and knows the interactive border bands. It is
/// laid out by its owning view after every frame change and has no input
/// handling of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct GripOverlay {
    resizable_inset: f64,
    interactive_border_size: f64,
    bounds: Rect,
    top_left: GripIcon,
    top_right: GripIcon,
    bottom_left: GripIcon,
    bottom_right: GripIcon,
}

impl GripOverlay {
    pub fn new(resizable_inset: f64, interactive_border_size: f64) -> Self {
        Self {
            resizable_inset,
            interactive_border_size,
            bounds: Rect::ZERO,
            top_left: GripIcon::new(Corner::TopLeft),
            top_right: GripIcon::new(Corner::TopRight),
            bottom_left: GripIcon::new(Corner::BottomLeft),
            bottom_right: GripIcon::new(Corner::BottomRight),
        }
    }

    pub fn resizable_inset(&self) -> f64 {
        self.resizable_inset
    }

    pub fn interactive_border_size(&self) -> f64 {
        self.interactive_border_size
    }

    pub fn set_insets(&mut self, resizable_inset: f64, interactive_border_size: f64) {
        self.resizable_inset = resizable_inset;
        self.interactive_border_size = interactive_border_size;
        self.layout(self.bounds);
    }

    /// Reposition the grips to the inset corners of `bounds`.
    pub fn layout(&mut self, bounds: Rect) {
        self.bounds = bounds;
        let border = self.border_rect();
        for corner in Corner::ALL {
            let position = corner.of(border);
            self.icon_mut(corner).place(position);
        }
    }

    /// Bounds from the last layout pass.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The rect the border line is drawn along.
    pub fn border_rect(&self) -> Rect {
        shrink(self.bounds, self.resizable_inset)
    }

    pub fn icon(&self, corner: Corner) -> &GripIcon {
        match corner {
            Corner::TopLeft => &self.top_left,
            Corner::TopRight => &self.top_right,
            Corner::BottomLeft => &self.bottom_left,
            Corner::BottomRight => &self.bottom_right,
        }
    }

    fn icon_mut(&mut self, corner: Corner) -> &mut GripIcon {
        match corner {
            Corner::TopLeft => &mut self.top_left,
            Corner::TopRight => &mut self.top_right,
            Corner::BottomLeft => &mut self.bottom_left,
            Corner::BottomRight => &mut self.bottom_right,
        }
    }

    /// All four grips, clockwise from the top-left.
    pub fn icons(&self) -> [&GripIcon; 4] {
        [&self.top_left, &self.top_right, &self.bottom_right, &self.bottom_left]
    }

    /// Interactive band along one edge: everything between the view bounds
    /// and `interactive_border_size` inside the border rect.
    pub fn edge_band(&self, edge: Edge) -> Rect {
        let b = self.bounds;
        let inner = shrink(self.border_rect(), self.interactive_border_size);
        match edge {
            Edge::Top => Rect::new(b.x0, b.y0, b.x1, inner.y0),
            Edge::Bottom => Rect::new(b.x0, inner.y1, b.x1, b.y1),
            Edge::Left => Rect::new(b.x0, b.y0, inner.x0, b.y1),
            Edge::Right => Rect::new(inner.x1, b.y0, b.x1, b.y1),
        }
    }

    /// Which edges a touch at `point` (view-local) grabs. Points inside an
    /// edge band grab that edge; everything else is a move.
    pub fn anchor_at(&self, point: Point) -> AnchorPoint {
        AnchorPoint::for_location(point, self.border_rect(), self.interactive_border_size)
    }
}

/// Shrink `rect` by `amount` on every side, collapsing to its center rather
/// than inverting.
pub fn shrink(rect: Rect, amount: f64) -> Rect {
    let dx = amount.min(rect.width() / 2.0);
    let dy = amount.min(rect.height() / 2.0);
    Rect::new(rect.x0 + dx, rect.y0 + dy, rect.x1 - dx, rect.y1 - dy)
}
