// File: crates/axes-render-skia/src/text.rs
// Summary: Text shaper over Skia textlayout; measures and paints lines at a baseline.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // System font manager as fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        ts
    }

    pub fn layout(&self, line: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, color));
        builder.add_text(line);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, line: &str, size: f32) -> f32 {
        self.layout(line, size, skia::Color::TRANSPARENT).longest_line()
    }

    /// Paint one line with its left edge at `x` and its baseline at `baseline`.
    pub fn draw_at_baseline(&self, canvas: &skia::Canvas, line: &str, x: f32, baseline: f32, size: f32, color: skia::Color) {
        let mut p = self.layout(line, size, color);
        // Paragraph paints from its top; the ascent is roughly 0.8em
        p.paint(canvas, (x, baseline - size * 0.8));
    }
}
