//! The resizable, repositionable container view.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use kurbo::{Point, Rect, Vec2};

use crate::anchor::AnchorPoint;
use crate::config::{ConfigResult, MultiTouchPolicy, ResizableConfig};
use crate::constraints::{clamp_min_size, clamp_min_size_centered, contain_move, contain_resize, ensure_min_size};
use crate::delegate::{ContentView, ResizableViewDelegate};
use crate::input::{TouchEvent, TouchId, TouchPhase, TouchTracker};
use crate::overlay::{shrink, GripOverlay};
use crate::state::{GestureOutcome, IgnoreReason, ResizeState};

/// A view the user can drag and resize with touches.
///
/// The frame is in superview coordinates. The view lays out its content
/// view (held weakly) inside its bounds, keeps a [`GripOverlay`] on top,
/// and reports gesture lifecycle and frame changes to its delegate (also
/// held weakly).
pub struct ResizableView {
    frame: Rect,
    config: ResizableConfig,
    superview_bounds: Option<Rect>,
    content: Option<Weak<RefCell<dyn ContentView>>>,
    delegate: Option<Weak<dyn ResizableViewDelegate>>,
    overlay: GripOverlay,
    touches: TouchTracker,
    state: ResizeState,
    /// Edges the current gesture moves.
    anchor_point: AnchorPoint,
    /// Touch driving the current gesture.
    driving_touch: Option<TouchId>,
    /// Last location of the driving touch.
    touch_start: Point,
    /// Span between the two pinch touches at the last move.
    previous_span: Option<Vec2>,
    did_make_change: bool,
}

impl ResizableView {
    /// Create a view with default configuration and no content view.
    pub fn new(frame: Rect) -> Self {
        let config = ResizableConfig::default();
        let mut view = Self {
            frame: ensure_min_size(frame, config.min_size()),
            overlay: GripOverlay::new(config.resizable_inset, config.interactive_border_size),
            config,
            superview_bounds: None,
            content: None,
            delegate: None,
            touches: TouchTracker::new(),
            state: ResizeState::Idle,
            anchor_point: AnchorPoint::NO_RESIZE,
            driving_touch: None,
            touch_start: Point::ZERO,
            previous_span: None,
            did_make_change: false,
        };
        view.layout();
        view
    }

    /// Create a view wrapping `content`.
    pub fn with_content<C: ContentView + 'static>(frame: Rect, content: &Rc<RefCell<C>>) -> Self {
        let mut view = Self::new(frame);
        view.set_content_view(content);
        view
    }

    /// Replace the configuration, builder style.
    pub fn with_config(mut self, config: ResizableConfig) -> ConfigResult<Self> {
        self.set_config(config)?;
        Ok(self)
    }

    // --- Collaborators ---

    pub fn set_content_view<C: ContentView + 'static>(&mut self, content: &Rc<RefCell<C>>) {
        let content: Rc<RefCell<dyn ContentView>> = content.clone();
        self.content = Some(Rc::downgrade(&content));
        self.layout();
    }

    /// The content view, if it is still alive.
    pub fn content_view(&self) -> Option<Rc<RefCell<dyn ContentView>>> {
        self.content.as_ref().and_then(Weak::upgrade)
    }

    pub fn set_delegate<D: ResizableViewDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let delegate: Rc<dyn ResizableViewDelegate> = delegate.clone();
        self.delegate = Some(Rc::downgrade(&delegate));
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// The delegate, if one is set and still alive.
    pub fn delegate(&self) -> Option<Rc<dyn ResizableViewDelegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    /// Tell the view where its superview's bounds are, in the same
    /// coordinate space as the frame. `None` disables containment.
    pub fn set_superview_bounds(&mut self, bounds: Option<Rect>) {
        self.superview_bounds = bounds;
        if let Some(parent) = self.containment_bounds() {
            let contained = contain_move(self.frame, parent);
            self.apply_frame(contained);
        }
    }

    pub fn superview_bounds(&self) -> Option<Rect> {
        self.superview_bounds
    }

    // --- Configuration ---

    pub fn config(&self) -> &ResizableConfig {
        &self.config
    }

    /// Validate and apply a new configuration, re-clamping the frame.
    pub fn set_config(&mut self, config: ResizableConfig) -> ConfigResult<()> {
        if let Err(err) = config.validate() {
            log::warn!("Rejected resizable view config: {err}");
            return Err(err);
        }
        self.config = config;
        self.overlay
            .set_insets(self.config.resizable_inset, self.config.interactive_border_size);

        let mut frame = ensure_min_size(self.frame, self.config.min_size());
        if let Some(parent) = self.containment_bounds() {
            frame = contain_move(frame, parent);
        }
        if !self.apply_frame(frame) {
            self.layout();
        }
        Ok(())
    }

    /// Edit the configuration in place. The edit is discarded if the result
    /// does not validate.
    pub fn update_config(&mut self, edit: impl FnOnce(&mut ResizableConfig)) -> ConfigResult<()> {
        let mut config = self.config.clone();
        edit(&mut config);
        self.set_config(config)
    }

    // --- Geometry ---

    /// Frame in superview coordinates.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Bounds in view-local coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.frame.size())
    }

    /// Where the content view is laid out, in view-local coordinates.
    pub fn content_frame(&self) -> Rect {
        shrink(self.bounds(), self.config.content_inset())
    }

    /// Where the content view is laid out, in superview coordinates.
    pub fn content_frame_in_superview(&self) -> Rect {
        self.content_frame() + self.frame.origin().to_vec2()
    }

    pub fn overlay(&self) -> &GripOverlay {
        &self.overlay
    }

    /// Whether a touch at `location` (superview coordinates) lands on this
    /// view.
    pub fn hit_test(&self, location: Point) -> bool {
        self.frame.contains(location)
    }

    /// Set the frame programmatically. Min-size and containment clamps
    /// apply; the delegate hears about the change.
    pub fn set_frame(&mut self, frame: Rect) -> Rect {
        let mut frame = ensure_min_size(frame, self.config.min_size());
        if let Some(parent) = self.containment_bounds() {
            frame = contain_move(frame, parent);
        }
        self.apply_frame(frame);
        self.frame
    }

    // --- Gesture state ---

    /// Whether a drag gesture is in progress.
    pub fn is_resizing(&self) -> bool {
        self.state.is_resizing()
    }

    pub fn state(&self) -> ResizeState {
        self.state
    }

    pub fn anchor_point(&self) -> AnchorPoint {
        self.anchor_point
    }

    /// Whether the current (or last) gesture changed the frame.
    pub fn did_make_change(&self) -> bool {
        self.did_make_change
    }

    /// Number of touches currently down on the view.
    pub fn touch_count(&self) -> usize {
        self.touches.count()
    }

    // --- Touch handling ---

    /// Feed one touch event, in host delivery order.
    pub fn handle_touch(&mut self, event: TouchEvent) -> GestureOutcome {
        match event.phase {
            TouchPhase::Began => self.touches_began(event.id, event.location),
            TouchPhase::Moved => self.touches_moved(event.id, event.location),
            TouchPhase::Ended => self.touches_ended(event.id, event.location),
            TouchPhase::Cancelled => self.touches_cancelled(event.id, event.location),
        }
    }

    pub fn touches_began(&mut self, id: TouchId, location: Point) -> GestureOutcome {
        if self.config.disable {
            return GestureOutcome::Ignored(IgnoreReason::Disabled);
        }
        self.touches.press(id, location);

        if self.state.is_resizing() {
            if self.pinch_allowed() && self.touches.count() == 2 {
                self.previous_span = self.touches.span();
                log::debug!("Pinch started with touch {:?}", id);
                return GestureOutcome::Unchanged;
            }
            return GestureOutcome::Ignored(IgnoreReason::AlreadyResizing);
        }

        if self.config.disable_on_multi_touch && self.touches.count() > 1 {
            return GestureOutcome::Ignored(IgnoreReason::MultiTouch);
        }

        let local = location - self.frame.origin().to_vec2();
        let anchor = self.overlay.anchor_at(local);
        if !anchor.is_resizing() && self.config.disable_pan {
            return GestureOutcome::Ignored(IgnoreReason::PanDisabled);
        }

        self.anchor_point = anchor;
        self.driving_touch = Some(id);
        self.touch_start = location;
        self.previous_span = None;
        self.did_make_change = false;
        self.state = ResizeState::Resizing;
        log::debug!("Gesture began ({}) at {:?}", anchor.name(), location);

        self.notify(|delegate, view| delegate.did_begin_editing(view));
        GestureOutcome::Began(anchor)
    }

    pub fn touches_moved(&mut self, id: TouchId, location: Point) -> GestureOutcome {
        if self.touches.update(id, location).is_none() {
            return GestureOutcome::Ignored(IgnoreReason::NotTracking);
        }
        if !self.state.is_resizing() {
            return GestureOutcome::Ignored(IgnoreReason::NotResizing);
        }
        let is_driving = self.driving_touch == Some(id);

        if self.config.disable || (self.config.disable_on_multi_touch && self.touches.count() > 1) {
            // Keep the reference point current so the frame does not jump
            // once geometry is unfrozen.
            if is_driving {
                self.touch_start = location;
            }
            let reason = if self.config.disable {
                IgnoreReason::Disabled
            } else {
                IgnoreReason::MultiTouch
            };
            return GestureOutcome::Ignored(reason);
        }

        if self.pinch_allowed() && self.previous_span.is_some() && self.touches.count() >= 2 {
            if is_driving {
                self.touch_start = location;
            }
            return self.pinch();
        }

        if !is_driving {
            return GestureOutcome::Unchanged;
        }

        let previous = std::mem::replace(&mut self.touch_start, location);
        let proposed = if self.anchor_point.is_resizing() {
            self.anchor_point.resize(self.frame, previous, location)
        } else {
            AnchorPoint::translate(self.frame, previous, location)
        };
        let frame = self.constrain(proposed);
        log::trace!("Touch {:?} moved to {:?}, frame {:?}", id, location, frame);

        if self.apply_frame(frame) {
            GestureOutcome::FrameChanged(self.frame)
        } else {
            GestureOutcome::Unchanged
        }
    }

    pub fn touches_ended(&mut self, id: TouchId, location: Point) -> GestureOutcome {
        self.finish_touch(id, location, "ended")
    }

    /// Host cancellation. Handled exactly like an end.
    pub fn touches_cancelled(&mut self, id: TouchId, location: Point) -> GestureOutcome {
        self.finish_touch(id, location, "cancelled")
    }

    fn finish_touch(&mut self, id: TouchId, location: Point, how: &str) -> GestureOutcome {
        if !self.touches.release(id) {
            return GestureOutcome::Ignored(IgnoreReason::NotTracking);
        }
        if !self.state.is_resizing() {
            return GestureOutcome::Ignored(IgnoreReason::NotResizing);
        }

        if self.driving_touch != Some(id) {
            self.previous_span = None;
            return GestureOutcome::Unchanged;
        }

        // Handing over turns the gesture into a move, which disable_pan forbids.
        if self.pinch_allowed() && !self.config.disable_pan {
            if let Some(next) = self.touches.first() {
                // The remaining finger carries on as a move.
                self.driving_touch = Some(next);
                self.touch_start = self.touches.position(next).unwrap_or(location);
                self.anchor_point = AnchorPoint::NO_RESIZE;
                self.previous_span = None;
                log::debug!("Touch {:?} {how}, touch {:?} now drives the gesture", id, next);
                return GestureOutcome::Unchanged;
            }
        }

        self.state = ResizeState::Idle;
        self.anchor_point = AnchorPoint::NO_RESIZE;
        self.driving_touch = None;
        self.previous_span = None;
        log::debug!(
            "Gesture {how} at {:?}, frame {:?} (changed: {})",
            location,
            self.frame,
            self.did_make_change
        );

        self.notify(|delegate, view| delegate.did_end_editing(view));
        GestureOutcome::Ended {
            changed: self.did_make_change,
        }
    }

    // --- Internals ---

    fn pinch_allowed(&self) -> bool {
        self.config.multi_touch == MultiTouchPolicy::Pinch && !self.config.disable_on_multi_touch
    }

    fn pinch(&mut self) -> GestureOutcome {
        let (Some(previous), Some(span)) = (self.previous_span, self.touches.span()) else {
            return GestureOutcome::Unchanged;
        };
        self.previous_span = Some(span);
        let delta = span - previous;

        let proposed = self.frame.inflate(delta.x / 2.0, delta.y / 2.0);
        let min = self.config.min_size();
        let mut frame = clamp_min_size_centered(proposed, min);
        if let Some(parent) = self.containment_bounds() {
            frame = clamp_min_size_centered(contain_resize(frame, parent), min);
        }

        if self.apply_frame(frame) {
            GestureOutcome::FrameChanged(self.frame)
        } else {
            GestureOutcome::Unchanged
        }
    }

    /// Apply the min-size clamp (resizes only) and containment to a
    /// proposed frame for the current anchor. Min size wins over
    /// containment when the superview is too small for both.
    fn constrain(&self, proposed: Rect) -> Rect {
        let anchor = self.anchor_point;
        let min = self.config.min_size();

        if !anchor.is_resizing() {
            return match self.containment_bounds() {
                Some(parent) => contain_move(proposed, parent),
                None => proposed,
            };
        }

        let frame = clamp_min_size(proposed, anchor, min);
        match self.containment_bounds() {
            Some(parent) => clamp_min_size(contain_resize(frame, parent), anchor, min),
            None => frame,
        }
    }

    fn containment_bounds(&self) -> Option<Rect> {
        if self.config.prevents_position_outside_superview {
            self.superview_bounds
        } else {
            None
        }
    }

    /// Store `frame`, lay out, and tell the delegate. Returns false (and does
    /// nothing) when the frame is unchanged.
    fn apply_frame(&mut self, frame: Rect) -> bool {
        if frame == self.frame {
            return false;
        }
        self.frame = frame;
        if self.state.is_resizing() {
            self.did_make_change = true;
        }
        self.layout();
        self.notify(|delegate, view| delegate.new_real_frame(view));
        true
    }

    /// Position the overlay grips and the content view for the current
    /// bounds.
    fn layout(&mut self) {
        self.overlay.layout(self.bounds());
        let content_frame = self.content_frame();
        if let Some(content) = self.content_view() {
            match content.try_borrow_mut() {
                Ok(mut content) => content.set_frame(content_frame),
                Err(_) => log::warn!("Content view is borrowed elsewhere, skipping layout"),
            }
        }
    }

    fn notify(&self, callback: impl FnOnce(&dyn ResizableViewDelegate, &ResizableView)) {
        if let Some(delegate) = self.delegate() {
            callback(delegate.as_ref(), self);
        }
    }
}

impl fmt::Debug for ResizableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizableView")
            .field("frame", &self.frame)
            .field("config", &self.config)
            .field("superview_bounds", &self.superview_bounds)
            .field("state", &self.state)
            .field("anchor_point", &self.anchor_point)
            .field("touches", &self.touches.count())
            .field("has_delegate", &self.delegate().is_some())
            .field("has_content", &self.content_view().is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::is_contained;
    use crate::overlay::Corner;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Begin,
        Frame(Rect),
        End,
    }

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<Call>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl ResizableViewDelegate for Recorder {
        fn did_begin_editing(&self, _view: &ResizableView) {
            self.calls.borrow_mut().push(Call::Begin);
        }

        fn did_end_editing(&self, _view: &ResizableView) {
            self.calls.borrow_mut().push(Call::End);
        }

        fn new_real_frame(&self, view: &ResizableView) {
            self.calls.borrow_mut().push(Call::Frame(view.frame()));
        }
    }

    /// Only cares about the end of a gesture.
    #[derive(Default)]
    struct EndOnly {
        ended: RefCell<u32>,
    }

    impl ResizableViewDelegate for EndOnly {
        fn did_end_editing(&self, _view: &ResizableView) {
            *self.ended.borrow_mut() += 1;
        }
    }

    #[derive(Default)]
    struct Content {
        frame: Rect,
    }

    impl ContentView for Content {
        fn set_frame(&mut self, frame: Rect) {
            self.frame = frame;
        }
    }

    const PARENT: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

    fn setup() -> (ResizableView, Rc<Recorder>) {
        let config = ResizableConfig {
            interactive_border_size: 10.0,
            ..Default::default()
        };
        let mut view = ResizableView::new(Rect::new(100.0, 100.0, 200.0, 180.0))
            .with_config(config)
            .unwrap();
        view.set_superview_bounds(Some(PARENT));
        let recorder = Rc::new(Recorder::default());
        view.set_delegate(&recorder);
        (view, recorder)
    }

    fn drag(view: &mut ResizableView, from: (f64, f64), to: (f64, f64)) -> GestureOutcome {
        view.handle_touch(TouchEvent::began(0, from));
        view.handle_touch(TouchEvent::moved(0, to));
        view.handle_touch(TouchEvent::ended(0, to))
    }

    #[test]
    fn test_lower_right_drag_grows() {
        let (mut view, recorder) = setup();
        let outcome = drag(&mut view, (195.0, 175.0), (205.0, 185.0));

        assert_eq!(outcome, GestureOutcome::Ended { changed: true });
        assert_eq!(view.frame(), Rect::new(100.0, 100.0, 210.0, 190.0));
        assert_eq!(
            recorder.calls(),
            vec![Call::Begin, Call::Frame(Rect::new(100.0, 100.0, 210.0, 190.0)), Call::End]
        );
    }

    #[test]
    fn test_upper_left_drag_shrinks_and_shifts() {
        let (mut view, _recorder) = setup();
        drag(&mut view, (102.0, 102.0), (112.0, 107.0));
        assert_eq!(view.frame(), Rect::new(110.0, 105.0, 200.0, 180.0));
    }

    #[test]
    fn test_upper_right_drag() {
        let (mut view, _recorder) = setup();
        let began = view.handle_touch(TouchEvent::began(0, (198.0, 102.0)));
        assert_eq!(began, GestureOutcome::Began(AnchorPoint::UPPER_RIGHT));
        view.handle_touch(TouchEvent::moved(0, (208.0, 110.0)));
        assert_eq!(view.frame(), Rect::new(100.0, 108.0, 210.0, 180.0));
    }

    #[test]
    fn test_lower_left_drag() {
        let (mut view, _recorder) = setup();
        let began = view.handle_touch(TouchEvent::began(0, (102.0, 178.0)));
        assert_eq!(began, GestureOutcome::Began(AnchorPoint::LOWER_LEFT));
        view.handle_touch(TouchEvent::moved(0, (95.0, 190.0)));
        assert_eq!(view.frame(), Rect::new(93.0, 100.0, 200.0, 192.0));
    }

    #[test]
    fn test_upper_middle_drag_ignores_horizontal_travel() {
        let (mut view, _recorder) = setup();
        let began = view.handle_touch(TouchEvent::began(0, (150.0, 101.0)));
        assert_eq!(began, GestureOutcome::Began(AnchorPoint::UPPER_MIDDLE));
        view.handle_touch(TouchEvent::moved(0, (170.0, 91.0)));
        assert_eq!(view.frame(), Rect::new(100.0, 90.0, 200.0, 180.0));
    }

    #[test]
    fn test_lower_middle_drag_ignores_horizontal_travel() {
        let (mut view, _recorder) = setup();
        let began = view.handle_touch(TouchEvent::began(0, (150.0, 179.0)));
        assert_eq!(began, GestureOutcome::Began(AnchorPoint::LOWER_MIDDLE));
        view.handle_touch(TouchEvent::moved(0, (120.0, 199.0)));
        assert_eq!(view.frame(), Rect::new(100.0, 100.0, 200.0, 200.0));
    }

    #[test]
    fn test_edge_drag_changes_one_dimension() {
        let (mut view, _recorder) = setup();
        drag(&mut view, (102.0, 140.0), (90.0, 170.0));
        assert_eq!(view.frame(), Rect::new(88.0, 100.0, 200.0, 180.0));
    }

    #[test]
    fn test_interior_drag_moves_only() {
        let (mut view, _recorder) = setup();
        let began = view.handle_touch(TouchEvent::began(0, (150.0, 140.0)));
        assert_eq!(began, GestureOutcome::Began(AnchorPoint::NO_RESIZE));
        view.handle_touch(TouchEvent::moved(0, (160.0, 150.0)));
        view.handle_touch(TouchEvent::ended(0, (160.0, 150.0)));

        assert_eq!(view.frame(), Rect::new(110.0, 110.0, 210.0, 190.0));
        assert_eq!(view.frame().size(), kurbo::Size::new(100.0, 80.0));
    }

    #[test]
    fn test_min_size_clamp_keeps_origin() {
        let (mut view, _recorder) = setup();
        drag(&mut view, (195.0, 175.0), (0.0, 0.0));
        assert_eq!(view.frame(), Rect::new(100.0, 100.0, 108.0, 108.0));
    }

    #[test]
    fn test_min_size_clamp_keeps_opposite_edge() {
        let (mut view, _recorder) = setup();
        drag(&mut view, (102.0, 102.0), (400.0, 300.0));
        assert_eq!(view.frame(), Rect::new(192.0, 172.0, 200.0, 180.0));
    }

    #[test]
    fn test_move_stays_inside_superview() {
        let (mut view, _recorder) = setup();
        drag(&mut view, (150.0, 140.0), (650.0, 640.0));
        assert_eq!(view.frame(), Rect::new(300.0, 220.0, 400.0, 300.0));
        assert!(is_contained(view.frame(), PARENT));
    }

    #[test]
    fn test_resize_stops_at_superview_edge() {
        let (mut view, _recorder) = setup();
        drag(&mut view, (195.0, 175.0), (600.0, 600.0));
        assert_eq!(view.frame(), Rect::new(100.0, 100.0, 400.0, 300.0));
    }

    #[test]
    fn test_containment_can_be_turned_off() {
        let (mut view, _recorder) = setup();
        view.update_config(|c| c.prevents_position_outside_superview = false).unwrap();
        drag(&mut view, (150.0, 140.0), (650.0, 640.0));
        assert_eq!(view.frame(), Rect::new(600.0, 600.0, 700.0, 680.0));
    }

    #[test]
    fn test_disabled_view_ignores_gesture() {
        let (mut view, recorder) = setup();
        view.update_config(|c| c.disable = true).unwrap();
        let before = view.frame();

        assert_eq!(
            view.handle_touch(TouchEvent::began(0, (195.0, 175.0))),
            GestureOutcome::Ignored(IgnoreReason::Disabled)
        );
        assert!(view.handle_touch(TouchEvent::moved(0, (250.0, 250.0))).is_ignored());
        assert!(view.handle_touch(TouchEvent::ended(0, (250.0, 250.0))).is_ignored());

        assert_eq!(view.frame(), before);
        assert!(recorder.calls().is_empty());
        assert!(!view.is_resizing());
    }

    #[test]
    fn test_disable_pan_ignores_interior_but_allows_edges() {
        let (mut view, recorder) = setup();
        view.update_config(|c| c.disable_pan = true).unwrap();

        assert_eq!(
            view.handle_touch(TouchEvent::began(0, (150.0, 140.0))),
            GestureOutcome::Ignored(IgnoreReason::PanDisabled)
        );
        view.handle_touch(TouchEvent::ended(0, (150.0, 140.0)));
        assert!(recorder.calls().is_empty());

        drag(&mut view, (195.0, 175.0), (205.0, 185.0));
        assert_eq!(view.frame(), Rect::new(100.0, 100.0, 210.0, 190.0));
    }

    #[test]
    fn test_corner_sequence_order() {
        let (mut view, recorder) = setup();
        view.handle_touch(TouchEvent::began(0, (195.0, 175.0)));
        assert!(view.is_resizing());
        view.handle_touch(TouchEvent::moved(0, (200.0, 180.0)));
        view.handle_touch(TouchEvent::moved(0, (205.0, 185.0)));
        view.handle_touch(TouchEvent::ended(0, (205.0, 185.0)));
        assert!(!view.is_resizing());

        let calls = recorder.calls();
        assert_eq!(calls.first(), Some(&Call::Begin));
        assert_eq!(calls.last(), Some(&Call::End));
        assert_eq!(calls.iter().filter(|c| **c == Call::Begin).count(), 1);
        assert_eq!(calls.iter().filter(|c| **c == Call::End).count(), 1);
        assert!(calls.iter().filter(|c| matches!(c, Call::Frame(_))).count() >= 1);
    }

    #[test]
    fn test_reentrant_begin_is_ignored() {
        let (mut view, recorder) = setup();
        view.handle_touch(TouchEvent::began(0, (150.0, 140.0)));
        assert_eq!(
            view.handle_touch(TouchEvent::began(1, (195.0, 175.0))),
            GestureOutcome::Ignored(IgnoreReason::AlreadyResizing)
        );
        assert_eq!(view.anchor_point(), AnchorPoint::NO_RESIZE);
        assert_eq!(recorder.calls(), vec![Call::Begin]);
    }

    #[test]
    fn test_secondary_touch_does_not_drive_geometry() {
        let (mut view, _recorder) = setup();
        view.handle_touch(TouchEvent::began(0, (150.0, 140.0)));
        view.handle_touch(TouchEvent::began(1, (120.0, 120.0)));

        assert_eq!(view.handle_touch(TouchEvent::moved(1, (170.0, 170.0))), GestureOutcome::Unchanged);
        assert_eq!(view.frame(), Rect::new(100.0, 100.0, 200.0, 180.0));

        // Lifting the secondary touch does not end the gesture.
        assert_eq!(view.handle_touch(TouchEvent::ended(1, (170.0, 170.0))), GestureOutcome::Unchanged);
        assert!(view.is_resizing());
    }

    #[test]
    fn test_disable_on_multi_touch_freezes_geometry() {
        let (mut view, _recorder) = setup();
        view.update_config(|c| c.disable_on_multi_touch = true).unwrap();

        view.handle_touch(TouchEvent::began(0, (150.0, 140.0)));
        view.handle_touch(TouchEvent::began(1, (300.0, 250.0)));
        assert_eq!(
            view.handle_touch(TouchEvent::moved(0, (160.0, 150.0))),
            GestureOutcome::Ignored(IgnoreReason::MultiTouch)
        );
        assert_eq!(view.frame(), Rect::new(100.0, 100.0, 200.0, 180.0));

        view.handle_touch(TouchEvent::ended(1, (300.0, 250.0)));
        view.handle_touch(TouchEvent::moved(0, (170.0, 160.0)));
        assert_eq!(view.frame(), Rect::new(110.0, 110.0, 210.0, 190.0));
    }

    #[test]
    fn test_disable_on_multi_touch_rejects_begin() {
        let (mut view, recorder) = setup();
        view.update_config(|c| {
            c.disable_on_multi_touch = true;
            c.disable_pan = true;
        })
        .unwrap();

        // Rejected, but still down.
        view.handle_touch(TouchEvent::began(0, (150.0, 140.0)));
        assert_eq!(
            view.handle_touch(TouchEvent::began(1, (195.0, 175.0))),
            GestureOutcome::Ignored(IgnoreReason::MultiTouch)
        );
        assert_eq!(view.touch_count(), 2);
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_cancel_ends_gesture() {
        let (mut view, recorder) = setup();
        view.handle_touch(TouchEvent::began(0, (150.0, 140.0)));
        view.handle_touch(TouchEvent::moved(0, (155.0, 140.0)));
        let outcome = view.handle_touch(TouchEvent::cancelled(0, (155.0, 140.0)));

        assert_eq!(outcome, GestureOutcome::Ended { changed: true });
        assert!(!view.is_resizing());
        assert_eq!(view.anchor_point(), AnchorPoint::NO_RESIZE);
        assert_eq!(recorder.calls().last(), Some(&Call::End));
    }

    #[test]
    fn test_gesture_without_movement_reports_no_change() {
        let (mut view, _recorder) = setup();
        view.handle_touch(TouchEvent::began(0, (150.0, 140.0)));
        assert_eq!(
            view.handle_touch(TouchEvent::ended(0, (150.0, 140.0))),
            GestureOutcome::Ended { changed: false }
        );
        assert!(!view.did_make_change());
    }

    #[test]
    fn test_unknown_touch_is_ignored() {
        let (mut view, _recorder) = setup();
        assert_eq!(
            view.handle_touch(TouchEvent::moved(4, (1.0, 1.0))),
            GestureOutcome::Ignored(IgnoreReason::NotTracking)
        );
        assert_eq!(
            view.handle_touch(TouchEvent::ended(4, (1.0, 1.0))),
            GestureOutcome::Ignored(IgnoreReason::NotTracking)
        );
    }

    #[test]
    fn test_dropped_delegate_is_skipped() {
        let (mut view, recorder) = setup();
        drop(recorder);
        assert!(view.delegate().is_none());
        drag(&mut view, (195.0, 175.0), (205.0, 185.0));
        assert_eq!(view.frame(), Rect::new(100.0, 100.0, 210.0, 190.0));
    }

    #[test]
    fn test_partial_delegate() {
        let (mut view, _recorder) = setup();
        let end_only = Rc::new(EndOnly::default());
        view.set_delegate(&end_only);
        drag(&mut view, (150.0, 140.0), (160.0, 140.0));
        assert_eq!(*end_only.ended.borrow(), 1);
    }

    #[test]
    fn test_content_view_tracks_bounds() {
        let content = Rc::new(RefCell::new(Content::default()));
        let config = ResizableConfig {
            resizable_inset: 5.0,
            interactive_border_size: 10.0,
            ..Default::default()
        };
        let mut view = ResizableView::with_content(Rect::new(0.0, 0.0, 100.0, 100.0), &content)
            .with_config(config)
            .unwrap();
        assert_eq!(content.borrow().frame, Rect::new(5.0, 5.0, 95.0, 95.0));

        drag(&mut view, (98.0, 98.0), (118.0, 108.0));
        assert_eq!(view.frame(), Rect::new(0.0, 0.0, 120.0, 110.0));
        assert_eq!(content.borrow().frame, Rect::new(5.0, 5.0, 115.0, 105.0));
        assert_eq!(view.content_frame_in_superview(), Rect::new(5.0, 5.0, 115.0, 105.0));
    }

    #[test]
    fn test_dropped_content_view_is_skipped() {
        let content = Rc::new(RefCell::new(Content::default()));
        let mut view = ResizableView::with_content(Rect::new(0.0, 0.0, 100.0, 100.0), &content);
        drop(content);
        assert!(view.content_view().is_none());
        view.set_frame(Rect::new(10.0, 10.0, 50.0, 50.0));
        assert_eq!(view.frame(), Rect::new(10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn test_overlay_follows_frame() {
        let (mut view, _recorder) = setup();
        drag(&mut view, (195.0, 175.0), (215.0, 195.0));
        let overlay = view.overlay();
        assert_eq!(overlay.bounds(), Rect::new(0.0, 0.0, 120.0, 100.0));
        assert_eq!(overlay.icon(Corner::BottomRight).rect.center(), Point::new(120.0, 100.0));
    }

    #[test]
    fn test_pinch_resizes_about_center() {
        let (mut view, _recorder) = setup();
        view.update_config(|c| c.multi_touch = MultiTouchPolicy::Pinch).unwrap();

        view.handle_touch(TouchEvent::began(0, (150.0, 140.0)));
        assert_eq!(view.handle_touch(TouchEvent::began(1, (170.0, 160.0))), GestureOutcome::Unchanged);
        let outcome = view.handle_touch(TouchEvent::moved(1, (190.0, 180.0)));

        assert_eq!(outcome, GestureOutcome::FrameChanged(Rect::new(90.0, 90.0, 210.0, 190.0)));
    }

    #[test]
    fn test_pinch_lift_hands_over_to_remaining_touch() {
        let (mut view, recorder) = setup();
        view.update_config(|c| c.multi_touch = MultiTouchPolicy::Pinch).unwrap();

        view.handle_touch(TouchEvent::began(0, (150.0, 140.0)));
        view.handle_touch(TouchEvent::began(1, (170.0, 160.0)));
        view.handle_touch(TouchEvent::moved(1, (190.0, 180.0)));
        assert_eq!(view.handle_touch(TouchEvent::ended(0, (150.0, 140.0))), GestureOutcome::Unchanged);
        assert!(view.is_resizing());

        view.handle_touch(TouchEvent::moved(1, (200.0, 190.0)));
        assert_eq!(view.frame(), Rect::new(100.0, 100.0, 220.0, 200.0));
        assert_eq!(
            view.handle_touch(TouchEvent::ended(1, (200.0, 190.0))),
            GestureOutcome::Ended { changed: true }
        );
        let calls = recorder.calls();
        assert_eq!(calls.iter().filter(|c| **c == Call::End).count(), 1);
    }

    #[test]
    fn test_pinch_lift_ends_gesture_when_pan_disabled() {
        let (mut view, recorder) = setup();
        view.update_config(|c| {
            c.multi_touch = MultiTouchPolicy::Pinch;
            c.disable_pan = true;
        })
        .unwrap();
        assert_eq!(
            view.handle_touch(TouchEvent::began(5, (150.0, 140.0))),
            GestureOutcome::Ignored(IgnoreReason::PanDisabled)
        );
        view.handle_touch(TouchEvent::ended(5, (150.0, 140.0)));

        view.handle_touch(TouchEvent::began(0, (195.0, 175.0)));
        view.handle_touch(TouchEvent::began(1, (150.0, 140.0)));
        assert_eq!(
            view.handle_touch(TouchEvent::ended(0, (195.0, 175.0))),
            GestureOutcome::Ended { changed: false }
        );
        assert!(!view.is_resizing());

        let outcome = view.handle_touch(TouchEvent::moved(1, (180.0, 170.0)));
        assert_eq!(outcome, GestureOutcome::Ignored(IgnoreReason::NotResizing));
        assert_eq!(view.frame(), Rect::new(100.0, 100.0, 200.0, 180.0));
        assert_eq!(recorder.calls(), vec![Call::Begin, Call::End]);
    }

    #[test]
    fn test_pinch_respects_min_size() {
        let (mut view, _recorder) = setup();
        view.update_config(|c| c.multi_touch = MultiTouchPolicy::Pinch).unwrap();

        view.handle_touch(TouchEvent::began(0, (101.0, 101.0)));
        view.handle_touch(TouchEvent::began(1, (199.0, 179.0)));
        view.handle_touch(TouchEvent::moved(1, (101.0, 101.0)));

        assert_eq!(view.frame().size(), kurbo::Size::new(8.0, 8.0));
        assert_eq!(view.frame().center(), Point::new(150.0, 140.0));
    }

    #[test]
    fn test_set_frame_clamps_and_notifies() {
        let (mut view, recorder) = setup();
        let frame = view.set_frame(Rect::new(396.0, 10.0, 398.0, 60.0));
        assert_eq!(frame, Rect::new(392.0, 10.0, 400.0, 60.0));
        assert_eq!(recorder.calls(), vec![Call::Frame(frame)]);

        view.set_frame(frame);
        assert_eq!(recorder.calls().len(), 1);
    }

    #[test]
    fn test_initial_frame_grown_to_min_size() {
        let view = ResizableView::new(Rect::new(10.0, 10.0, 12.0, 11.0));
        assert_eq!(view.frame(), Rect::new(10.0, 10.0, 18.0, 18.0));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let (mut view, _recorder) = setup();
        let before = view.config().clone();
        assert!(view.update_config(|c| c.min_width = -3.0).is_err());
        assert_eq!(view.config(), &before);
    }

    #[test]
    fn test_raising_min_size_grows_frame() {
        let (mut view, recorder) = setup();
        view.update_config(|c| c.min_width = 150.0).unwrap();
        assert_eq!(view.frame(), Rect::new(100.0, 100.0, 250.0, 180.0));
        assert_eq!(recorder.calls(), vec![Call::Frame(view.frame())]);
    }

    #[test]
    fn test_shrinking_superview_pulls_view_inside() {
        let (mut view, _recorder) = setup();
        view.set_superview_bounds(Some(Rect::new(0.0, 0.0, 150.0, 150.0)));
        assert_eq!(view.frame(), Rect::new(50.0, 70.0, 150.0, 150.0));
    }

    #[test]
    fn test_invariants_hold_over_drag_sequences() {
        let starts = [
            (102.0, 102.0),
            (198.0, 102.0),
            (102.0, 178.0),
            (198.0, 178.0),
            (150.0, 101.0),
            (101.0, 140.0),
            (150.0, 140.0),
        ];
        let moves = [(-300.0, 40.0), (500.0, -500.0), (-2.0, -2.0), (37.5, 61.25), (-90.0, -70.0)];

        for start in starts {
            let (mut view, _recorder) = setup();
            view.handle_touch(TouchEvent::began(0, start));
            let mut at = start;
            for (dx, dy) in moves {
                at = (at.0 + dx, at.1 + dy);
                view.handle_touch(TouchEvent::moved(0, at));
                let frame = view.frame();
                assert!(frame.width() >= 8.0, "width {} from {:?}", frame.width(), start);
                assert!(frame.height() >= 8.0, "height {} from {:?}", frame.height(), start);
                assert!(is_contained(frame, PARENT), "{:?} escaped from {:?}", frame, start);
            }
            view.handle_touch(TouchEvent::ended(0, at));
        }
    }
}
