//! Renderer trait abstraction.

use kurbo::{Rect, Size};
use peniko::Color;
use resizable_core::ResizableView;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Colors and stroke widths for the border and grips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Border and grip outline color.
    pub border_color: Color,
    /// Grip fill color.
    pub grip_fill: Color,
    /// Border width while idle.
    pub border_width: f64,
    /// Border width while a gesture is in progress.
    pub active_border_width: f64,
    /// Tint for the interactive edge bands, when shown.
    pub band_color: Color,
    /// Draw the interactive edge bands.
    pub show_interactive_border: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            border_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            grip_fill: Color::WHITE,
            border_width: 1.0,
            active_border_width: 2.0,
            band_color: Color::from_rgba8(59, 130, 246, 40),
            show_interactive_border: false,
        }
    }
}

/// Text drawn inside a view's content.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPaint {
    pub text: String,
    pub font_size: f64,
    /// Block the text wraps and centers within, view-local.
    pub rect: Rect,
    pub color: Color,
}

/// One view to paint, with the fill used for its content placeholder.
#[derive(Debug, Clone)]
pub struct ViewPaint<'a> {
    pub view: &'a ResizableView,
    pub fill: Color,
    pub text: Option<TextPaint>,
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Views back to front.
    pub views: Vec<ViewPaint<'a>>,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
    pub overlay_style: OverlayStyle,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(viewport_size: Size) -> Self {
        Self {
            views: Vec::new(),
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            overlay_style: OverlayStyle::default(),
        }
    }

    /// Add a view on top of the ones already added.
    pub fn with_view(mut self, view: &'a ResizableView, fill: Color) -> Self {
        self.views.push(ViewPaint {
            view,
            fill,
            text: None,
        });
        self
    }

    /// Add a view whose content shows `text`.
    pub fn with_text_view(mut self, view: &'a ResizableView, fill: Color, text: TextPaint) -> Self {
        self.views.push(ViewPaint {
            view,
            fill,
            text: Some(text),
        });
        self
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_overlay_style(mut self, style: OverlayStyle) -> Self {
        self.overlay_style = style;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the scene for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
