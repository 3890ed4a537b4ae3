//! Text that picks the largest font size fitting its frame.
//!
//! Sizing goes through [`TextMeasure`] so the search can run against any
//! layout engine. The Vello backend measures with Parley.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Rect, Size};
use peniko::Color;
use resizable_core::ContentView;
use serde::{Deserialize, Serialize};

use crate::renderer::TextPaint;

/// Smallest font size the search returns, even when nothing fits.
pub const MIN_FONT_SIZE: f64 = 1.0;
/// Largest font size the search tries.
pub const MAX_FONT_SIZE: f64 = 500.0;
/// The fitted size may fall short of the ideal by up to this much.
pub const ACCURACY_THRESHOLD: f64 = 1.0;
/// Font size used to rank words by width.
const REFERENCE_FONT_SIZE: f64 = 12.0;

/// Measures laid-out text.
pub trait TextMeasure {
    /// Size of `text` at `font_size`, wrapped at `max_width` when given and
    /// kept on one line otherwise.
    fn measure(&mut self, text: &str, font_size: f64, max_width: Option<f64>) -> Size;
}

impl<T: TextMeasure + ?Sized> TextMeasure for Rc<RefCell<T>> {
    fn measure(&mut self, text: &str, font_size: f64, max_width: Option<f64>) -> Size {
        self.borrow_mut().measure(text, font_size, max_width)
    }
}

/// Where the text block sits when it is shorter than its frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlignment {
    Top,
    #[default]
    Center,
    Bottom,
}

impl VerticalAlignment {
    /// Downward shift of a block `content_height` tall inside `available`.
    pub fn offset(self, available: f64, content_height: f64) -> f64 {
        let padding = (available - content_height).max(0.0);
        match self {
            VerticalAlignment::Top => 0.0,
            VerticalAlignment::Center => padding / 2.0,
            VerticalAlignment::Bottom => padding,
        }
    }
}

/// Bounds of the font size search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    pub min_font_size: f64,
    pub max_font_size: f64,
    /// Must be greater than zero.
    pub accuracy: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            min_font_size: MIN_FONT_SIZE,
            max_font_size: MAX_FONT_SIZE,
            accuracy: ACCURACY_THRESHOLD,
        }
    }
}

impl FitOptions {
    fn rounded(&self, font_size: f64) -> f64 {
        (font_size / self.accuracy).round() * self.accuracy
    }

    /// Largest size in `[min, max)` on the accuracy grid for which `fits`
    /// holds, assuming `fits` is monotonic. Returns `min` when the grid
    /// between the bounds is exhausted.
    fn search(&self, mut min: f64, mut max: f64, mut fits: impl FnMut(f64) -> bool) -> f64 {
        loop {
            let candidate = self.rounded((min + max) / 2.0);
            if candidate <= min || candidate >= max {
                return min;
            }
            if fits(candidate) {
                min = candidate;
            } else {
                max = candidate;
            }
        }
    }
}

fn contains(outer: Size, inner: Size) -> bool {
    outer.width >= inner.width && outer.height >= inner.height
}

/// The widest whitespace-separated word of `text`. Empty when the text has
/// no words.
pub fn longest_word<'a, M: TextMeasure + ?Sized>(measure: &mut M, text: &'a str) -> &'a str {
    let mut longest = ("", f64::NEG_INFINITY);
    for word in text.split_whitespace() {
        let width = measure.measure(word, REFERENCE_FONT_SIZE, None).width;
        if width > longest.1 {
            longest = (word, width);
        }
    }
    longest.0
}

/// Largest font size at which `text`, wrapped to the width of `fit`, fits
/// inside `fit`.
///
/// The search is capped first by the size at which `longest_word` still
/// fits on a single line, so no word is ever broken across lines.
pub fn max_font_size<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    longest_word: &str,
    fit: Size,
    options: &FitOptions,
) -> f64 {
    let fit = Size::new(fit.width.floor(), fit.height.floor());
    let word_limit = options.search(options.min_font_size, options.max_font_size, |size| {
        contains(fit, measure.measure(longest_word, size, None))
    });
    // The search never returns its upper bound, so step one past the limit.
    let ceiling = (word_limit + options.accuracy).min(options.max_font_size);
    options.search(options.min_font_size, ceiling, |size| {
        contains(fit, measure.measure(text, size, Some(fit.width)))
    })
}

/// Text content that refits its font size whenever its frame changes.
#[derive(Debug)]
pub struct FittedText<M> {
    text: String,
    longest_word: String,
    alignment: VerticalAlignment,
    options: FitOptions,
    measure: M,
    frame: Rect,
    font_size: f64,
    text_size: Size,
}

impl<M: TextMeasure> FittedText<M> {
    pub fn new(text: impl Into<String>, measure: M) -> Self {
        let mut fitted = Self {
            text: String::new(),
            longest_word: String::new(),
            alignment: VerticalAlignment::default(),
            options: FitOptions::default(),
            measure,
            frame: Rect::ZERO,
            font_size: MIN_FONT_SIZE,
            text_size: Size::ZERO,
        };
        fitted.set_text(text);
        fitted
    }

    pub fn with_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_options(mut self, options: FitOptions) -> Self {
        self.options = options;
        self.refit();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.longest_word = longest_word(&mut self.measure, &self.text).to_string();
        self.refit();
    }

    pub fn longest_word(&self) -> &str {
        &self.longest_word
    }

    pub fn alignment(&self) -> VerticalAlignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: VerticalAlignment) {
        self.alignment = alignment;
    }

    /// Frame from the last layout, in the owning view's coordinates.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Where the wrapped text block is drawn: full frame width, its own
    /// height, shifted per the vertical alignment.
    pub fn text_rect(&self) -> Rect {
        let y0 = self.frame.y0 + self.alignment.offset(self.frame.height(), self.text_size.height);
        Rect::new(self.frame.x0, y0, self.frame.x1, y0 + self.text_size.height)
    }

    pub fn measure_mut(&mut self) -> &mut M {
        &mut self.measure
    }

    /// What the renderer needs to draw the fitted text.
    pub fn paint(&self, color: Color) -> TextPaint {
        TextPaint {
            text: self.text.clone(),
            font_size: self.font_size,
            rect: self.text_rect(),
            color,
        }
    }

    fn refit(&mut self) {
        let fit = self.frame.size();
        if self.text.trim().is_empty() || fit.width < 1.0 || fit.height < 1.0 {
            self.font_size = self.options.min_font_size;
            self.text_size = Size::ZERO;
            return;
        }
        self.font_size =
            max_font_size(&mut self.measure, &self.text, &self.longest_word, fit, &self.options);
        self.text_size = self
            .measure
            .measure(&self.text, self.font_size, Some(fit.width.floor()));
        log::trace!("Fitted {} chars at {}pt into {:?}", self.text.len(), self.font_size, fit);
    }
}

impl<M: TextMeasure> ContentView for FittedText<M> {
    fn set_frame(&mut self, frame: Rect) {
        if frame != self.frame {
            self.frame = frame;
            self.refit();
        }
    }
}
