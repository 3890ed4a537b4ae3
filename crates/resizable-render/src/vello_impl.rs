//! Vello-based renderer implementation.

use kurbo::{Affine, BezPath, Point, Rect, Shape, Stroke};
use peniko::{Brush, Color, Fill};
use resizable_core::overlay::Edge;
use resizable_core::ResizableView;
use vello::Scene;

use crate::renderer::{OverlayStyle, RenderContext, Renderer, TextPaint, ViewPaint};
use crate::text_layout::{draw_layout, ParleyText};

/// Corner radius of the content placeholder.
const CONTENT_CORNER_RADIUS: f64 = 4.0;

/// Vello renderer for resizable views.
pub struct VelloRenderer {
    scene: Scene,
    /// Font and layout contexts, kept across frames.
    text: ParleyText,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            text: ParleyText::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn render_view(&mut self, paint: &ViewPaint, style: &OverlayStyle, scale: f64) {
        let view = paint.view;
        // Overlay geometry is view-local.
        let transform = Affine::scale(scale) * Affine::translate(view.frame().origin().to_vec2());

        let content = view.content_frame().to_rounded_rect(CONTENT_CORNER_RADIUS);
        self.scene.fill(Fill::NonZero, transform, paint.fill, None, &content);
        if let Some(text) = &paint.text {
            self.render_text(text, transform);
        }

        if style.show_interactive_border {
            self.render_edge_bands(view, style, transform);
        }
        self.render_border(view, style, transform);
        for icon in view.overlay().icons() {
            self.render_grip(icon.rect, style, transform);
        }
    }

    fn render_border(&mut self, view: &ResizableView, style: &OverlayStyle, transform: Affine) {
        let border = view.overlay().border_rect();
        let mut path = BezPath::new();
        path.move_to(Point::new(border.x0, border.y0));
        path.line_to(Point::new(border.x1, border.y0));
        path.line_to(Point::new(border.x1, border.y1));
        path.line_to(Point::new(border.x0, border.y1));
        path.close_path();

        let stroke = if view.is_resizing() {
            Stroke::new(style.active_border_width)
        } else {
            Stroke::new(style.border_width).with_dashes(0.0, [4.0, 4.0])
        };
        self.scene.stroke(&stroke, transform, style.border_color, None, &path);
    }

    fn render_edge_bands(&mut self, view: &ResizableView, style: &OverlayStyle, transform: Affine) {
        // Left/right bands span the full height; top/bottom only the middle
        // so the corners are not tinted twice.
        let overlay = view.overlay();
        let left = overlay.edge_band(Edge::Left);
        let right = overlay.edge_band(Edge::Right);
        let bands = [
            left,
            right,
            clip_x(overlay.edge_band(Edge::Top), left.x1, right.x0),
            clip_x(overlay.edge_band(Edge::Bottom), left.x1, right.x0),
        ];
        for band in bands {
            if band.area() > 0.0 {
                self.scene.fill(Fill::NonZero, transform, style.band_color, None, &band);
            }
        }
    }

    fn render_text(&mut self, paint: &TextPaint, transform: Affine) {
        if paint.text.trim().is_empty() {
            return;
        }
        let brush = Brush::Solid(paint.color);
        let layout = self
            .text
            .layout(&paint.text, paint.font_size, Some(paint.rect.width().floor()), &brush);
        let origin = paint.rect.origin();
        let drawn = draw_layout(&mut self.scene, &layout, transform * Affine::translate((origin.x, origin.y)));
        if drawn == 0 {
            log::warn!("No glyphs drawn for {:?}, is a sans-serif font installed?", paint.text);
        }
    }

    /// Render a single corner grip.
    fn render_grip(&mut self, rect: Rect, style: &OverlayStyle, transform: Affine) {
        let path = rect.to_path(0.1);
        self.scene.fill(Fill::NonZero, transform, style.grip_fill, None, &path);
        self.scene.stroke(&Stroke::new(1.5), transform, style.border_color, None, &path);
    }

    /// Fill the whole viewport with `color`.
    fn render_background(&mut self, ctx: &RenderContext, color: Color) {
        let viewport = Rect::from_origin_size(Point::ZERO, ctx.viewport_size);
        self.scene.fill(Fill::NonZero, Affine::IDENTITY, color, None, &viewport);
    }
}

fn clip_x(rect: Rect, x0: f64, x1: f64) -> Rect {
    let x0 = rect.x0.max(x0);
    Rect::new(x0, rect.y0, rect.x1.min(x1).max(x0), rect.y1)
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        self.render_background(ctx, self.background_color(ctx));
        for paint in &ctx.views {
            self.render_view(paint, &ctx.overlay_style, ctx.scale_factor);
        }
        log::trace!("Built scene with {} views", ctx.views.len());
    }
}
