//! Parley text layout, shared by measuring and drawing.

use kurbo::{Affine, Size};
use parley::layout::PositionedLayoutItem;
use parley::{
    Alignment, AlignmentOptions, FontContext, FontFamily, FontFamilyName, GenericFamily, Layout,
    LayoutContext, StyleProperty,
};
use peniko::{Brush, Fill};
use vello::Scene;

use crate::text_fit::TextMeasure;

/// Parley font and layout contexts. Fonts come from the system collection.
pub struct ParleyText {
    font_cx: FontContext,
    layout_cx: LayoutContext<Brush>,
}

impl Default for ParleyText {
    fn default() -> Self {
        Self::new()
    }
}

impl ParleyText {
    pub fn new() -> Self {
        Self {
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
        }
    }

    /// Lay out `text` in the sans-serif system font. Lines are centered
    /// within `max_width` when one is given.
    pub fn layout(
        &mut self,
        text: &str,
        font_size: f64,
        max_width: Option<f64>,
        brush: &Brush,
    ) -> Layout<Brush> {
        let mut builder = self.layout_cx.ranged_builder(&mut self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(font_size as f32));
        builder.push_default(StyleProperty::Brush(brush.clone()));
        builder.push_default(StyleProperty::FontFamily(FontFamily::Single(FontFamilyName::Generic(
            GenericFamily::SansSerif,
        ))));
        let mut layout = builder.build(text);

        let max_width = max_width.map(|width| width as f32);
        layout.break_all_lines(max_width);
        layout.align(max_width, Alignment::Center, AlignmentOptions::default());
        layout
    }
}

impl TextMeasure for ParleyText {
    fn measure(&mut self, text: &str, font_size: f64, max_width: Option<f64>) -> Size {
        let layout = self.layout(text, font_size, max_width, &Brush::default());
        Size::new(layout.width() as f64, layout.height() as f64)
    }
}

/// Draw every glyph run of `layout`, with the layout's origin at
/// `transform`. Returns the number of glyphs drawn.
pub(crate) fn draw_layout(scene: &mut Scene, layout: &Layout<Brush>, transform: Affine) -> usize {
    let mut glyph_count = 0;
    for line in layout.lines() {
        for item in line.items() {
            let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                continue;
            };
            let mut x = glyph_run.offset();
            let y = glyph_run.baseline();
            let run = glyph_run.run();
            let synthesis = run.synthesis();
            let glyph_xform = synthesis
                .skew()
                .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

            let glyphs: Vec<vello::Glyph> = glyph_run
                .glyphs()
                .map(|glyph| {
                    let gx = x + glyph.x;
                    let gy = y - glyph.y;
                    x += glyph.advance;
                    vello::Glyph {
                        id: glyph.id,
                        x: gx,
                        y: gy,
                    }
                })
                .collect();
            glyph_count += glyphs.len();

            if !glyphs.is_empty() {
                scene
                    .draw_glyphs(run.font())
                    .brush(&glyph_run.style().brush)
                    .hint(true)
                    .transform(transform)
                    .glyph_transform(glyph_xform)
                    .font_size(run.font_size())
                    .normalized_coords(run.normalized_coords())
                    .draw(Fill::NonZero, glyphs.into_iter());
            }
        }
    }
    glyph_count
}
