//! Hosts the demo views: routes touches to them and collects their
//! lifecycle notifications.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use kurbo::{Point, Rect, Size};
use peniko::Color;
use resizable_core::{
    ConfigResult, ContentView, GestureOutcome, ResizableConfig, ResizableView, ResizableViewDelegate,
    TouchEvent, TouchId, TouchPhase,
};
use resizable_render::{FittedText, TextMeasure, TextPaint, VerticalAlignment};

/// Touch id used for the mouse.
pub const MOUSE_TOUCH_ID: TouchId = TouchId(u64::MAX);

/// Number of status lines kept for the UI.
const STATUS_CAPACITY: usize = 8;

/// Text measurer shared by every demo view.
pub type SharedMeasure = Rc<RefCell<dyn TextMeasure>>;

/// Text color inside the demo views.
const TEXT_COLOR: Color = Color::from_rgba8(31, 41, 55, 255);

/// Demo content: a label whose font grows and shrinks with the view.
pub struct DemoContent {
    pub name: String,
    pub text: FittedText<SharedMeasure>,
}

impl DemoContent {
    pub fn frame(&self) -> Rect {
        self.text.frame()
    }

    pub fn paint(&self) -> TextPaint {
        self.text.paint(TEXT_COLOR)
    }
}

impl ContentView for DemoContent {
    fn set_frame(&mut self, frame: Rect) {
        self.text.set_frame(frame);
    }
}

/// Delegate that logs lifecycle events and keeps the latest few for display.
#[derive(Debug, Default)]
pub struct StatusLog {
    lines: RefCell<VecDeque<String>>,
}

impl StatusLog {
    fn push(&self, line: String) {
        log::info!("{line}");
        let mut lines = self.lines.borrow_mut();
        if lines.len() == STATUS_CAPACITY {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Latest lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().iter().cloned().collect()
    }
}

impl ResizableViewDelegate for StatusLog {
    fn did_begin_editing(&self, view: &ResizableView) {
        self.push(format!("began {} at {}", view.anchor_point().name(), describe(view.frame())));
    }

    fn did_end_editing(&self, view: &ResizableView) {
        self.push(format!(
            "ended at {}{}",
            describe(view.frame()),
            if view.did_make_change() { "" } else { " (unchanged)" }
        ));
    }

    fn new_real_frame(&self, view: &ResizableView) {
        log::trace!("new frame {}", describe(view.frame()));
    }
}

fn describe(frame: Rect) -> String {
    format!(
        "({:.0}, {:.0}) {:.0}x{:.0}",
        frame.x0,
        frame.y0,
        frame.width(),
        frame.height()
    )
}

/// A hosted view with the content it wraps.
pub struct DemoView {
    pub id: usize,
    pub view: ResizableView,
    pub content: Rc<RefCell<DemoContent>>,
    pub fill: Color,
}

/// Owns the demo views (back to front) and delivers touch events to them.
pub struct EventHandler {
    views: Vec<DemoView>,
    /// Which view each active touch was delivered to at its begin.
    routes: HashMap<TouchId, usize>,
    status: Rc<StatusLog>,
    viewport: Size,
    measure: SharedMeasure,
    alignment: VerticalAlignment,
}

impl EventHandler {
    /// Create the demo scene for a viewport (logical size). Labels are
    /// fitted with `measure`.
    pub fn new(viewport: Size, config: &ResizableConfig, measure: SharedMeasure) -> ConfigResult<Self> {
        let mut handler = Self {
            views: Vec::new(),
            routes: HashMap::new(),
            status: Rc::new(StatusLog::default()),
            viewport,
            measure,
            alignment: VerticalAlignment::default(),
        };
        handler.reset(config)?;
        Ok(handler)
    }

    /// Recreate the default views.
    pub fn reset(&mut self, config: &ResizableConfig) -> ConfigResult<()> {
        let specs = [
            (
                "amber",
                "DYNAMIC font RESIZING",
                Rect::new(60.0, 80.0, 260.0, 230.0),
                Color::from_rgba8(250, 204, 21, 255),
            ),
            (
                "teal",
                "Drag a corner or an edge to resize",
                Rect::new(320.0, 140.0, 560.0, 320.0),
                Color::from_rgba8(45, 212, 191, 255),
            ),
            (
                "rose",
                "Drag the middle to move",
                Rect::new(180.0, 340.0, 340.0, 460.0),
                Color::from_rgba8(251, 113, 133, 255),
            ),
        ];

        self.views.clear();
        self.routes.clear();
        for (id, (name, label, frame, fill)) in specs.into_iter().enumerate() {
            let text = FittedText::new(label, self.measure.clone()).with_alignment(self.alignment);
            let content = Rc::new(RefCell::new(DemoContent {
                name: name.to_string(),
                text,
            }));
            let mut view = ResizableView::with_content(frame, &content).with_config(config.clone())?;
            view.set_superview_bounds(Some(self.bounds()));
            view.set_delegate(&self.status);
            self.views.push(DemoView {
                id,
                view,
                content,
                fill,
            });
        }
        log::debug!("Created {} demo views", self.views.len());
        Ok(())
    }

    /// Apply a configuration to every view.
    pub fn apply_config(&mut self, config: &ResizableConfig) -> ConfigResult<()> {
        config.validate()?;
        for demo in &mut self.views {
            demo.view.set_config(config.clone())?;
        }
        Ok(())
    }

    /// Vertical alignment of every label.
    pub fn set_alignment(&mut self, alignment: VerticalAlignment) {
        self.alignment = alignment;
        for demo in &self.views {
            demo.content.borrow_mut().text.set_alignment(alignment);
        }
    }

    /// The window was resized (logical size).
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport = size;
        let bounds = self.bounds();
        for demo in &mut self.views {
            demo.view.set_superview_bounds(Some(bounds));
        }
    }

    fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.viewport)
    }

    /// Views back to front.
    pub fn views(&self) -> &[DemoView] {
        &self.views
    }

    pub fn status(&self) -> &Rc<StatusLog> {
        &self.status
    }

    /// Whether any view has a gesture in progress.
    pub fn is_interacting(&self) -> bool {
        self.views.iter().any(|demo| demo.view.is_resizing())
    }

    /// Whether `location` is over any view.
    pub fn hit_test(&self, location: Point) -> bool {
        self.views.iter().any(|demo| demo.view.hit_test(location))
    }

    /// Deliver a touch event.
    ///
    /// A begin goes to the topmost view under the touch, which is raised to
    /// the front. The rest of that touch goes to the same view wherever it
    /// moves. Returns `None` when no view received the event.
    pub fn handle_touch(&mut self, event: TouchEvent) -> Option<GestureOutcome> {
        let id = match event.phase {
            TouchPhase::Began => {
                let index = self
                    .views
                    .iter()
                    .rposition(|demo| demo.view.hit_test(event.location))?;
                let demo = self.views.remove(index);
                let id = demo.id;
                self.views.push(demo);
                self.routes.insert(event.id, id);
                id
            }
            TouchPhase::Moved => *self.routes.get(&event.id)?,
            TouchPhase::Ended | TouchPhase::Cancelled => self.routes.remove(&event.id)?,
        };

        let demo = self.views.iter_mut().find(|demo| demo.id == id)?;
        Some(demo.view.handle_touch(event))
    }
}
