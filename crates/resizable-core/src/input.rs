//! Touch event types and per-view touch tracking.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of one finger (or the mouse) for the lifetime of a touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TouchId(pub u64);

/// Phase of a touch event, in host delivery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

/// A single touch event. `location` is in superview coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub id: TouchId,
    pub phase: TouchPhase,
    pub location: Point,
}

impl TouchEvent {
    pub fn new(id: TouchId, phase: TouchPhase, location: Point) -> Self {
        Self { id, phase, location }
    }

    pub fn began(id: u64, location: impl Into<Point>) -> Self {
        Self::new(TouchId(id), TouchPhase::Began, location.into())
    }

    pub fn moved(id: u64, location: impl Into<Point>) -> Self {
        Self::new(TouchId(id), TouchPhase::Moved, location.into())
    }

    pub fn ended(id: u64, location: impl Into<Point>) -> Self {
        Self::new(TouchId(id), TouchPhase::Ended, location.into())
    }

    pub fn cancelled(id: u64, location: impl Into<Point>) -> Self {
        Self::new(TouchId(id), TouchPhase::Cancelled, location.into())
    }
}

/// The set of touches currently down on a view.
///
/// Touches are kept in the order they began so the "first active touch" is
/// well defined.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    positions: HashMap<TouchId, Point>,
    order: Vec<TouchId>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a touch going down. Returns false if it was already tracked.
    pub fn press(&mut self, id: TouchId, location: Point) -> bool {
        if self.positions.insert(id, location).is_some() {
            return false;
        }
        self.order.push(id);
        true
    }

    /// Update a tracked touch, returning its previous location.
    pub fn update(&mut self, id: TouchId, location: Point) -> Option<Point> {
        self.positions
            .get_mut(&id)
            .map(|position| std::mem::replace(position, location))
    }

    /// Forget a touch. Returns false if it was not tracked.
    pub fn release(&mut self, id: TouchId) -> bool {
        if self.positions.remove(&id).is_none() {
            return false;
        }
        self.order.retain(|t| *t != id);
        true
    }

    pub fn count(&self) -> usize {
        self.order.len()
    }

    pub fn position(&self, id: TouchId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    /// The oldest touch still down.
    pub fn first(&self) -> Option<TouchId> {
        self.order.first().copied()
    }

    /// Absolute horizontal/vertical distance between the two oldest touches.
    pub fn span(&self) -> Option<Vec2> {
        let [a, b] = self.order.get(..2)? else {
            return None;
        };
        let (pa, pb) = (self.positions.get(a)?, self.positions.get(b)?);
        Some(Vec2::new((pa.x - pb.x).abs(), (pa.y - pb.y).abs()))
    }
}
