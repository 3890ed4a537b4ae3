//! Resizable View Render Library
//!
//! Renderer abstraction for painting resizable views, their content and
//! grip overlays, plus text that fits itself to a view's content frame.
//! The default implementation uses Vello and Parley.

mod renderer;
mod text_fit;

#[cfg(feature = "vello-renderer")]
mod text_layout;
#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{
    OverlayStyle, RenderContext, RenderResult, Renderer, RendererError, TextPaint, ViewPaint,
};
pub use text_fit::{
    longest_word, max_font_size, FitOptions, FittedText, TextMeasure, VerticalAlignment,
    ACCURACY_THRESHOLD, MAX_FONT_SIZE, MIN_FONT_SIZE,
};

#[cfg(feature = "vello-renderer")]
pub use text_layout::ParleyText;
#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
