// File: crates/axes-render-skia/src/lib.rs
// Summary: CPU raster backend: walks a laid-out AxesCanvas and paints it with Skia, producing
// PNG bytes/files or raw RGBA8 pixels.

pub mod colour;
pub mod text;

use std::path::Path;

use anyhow::{anyhow, Result};
use axes_core::primitive::{Group, Line, Marker, Polyline, Primitive, RectShape, Rescalable, Sector, StrokeStyle, Text};
use axes_core::{theme, AxesCanvas, Chart, Point, Theme, ViewBox};
use skia_safe as skia;

use crate::text::TextShaper;

/// Tightly packed RGBA8 pixels, row-major, unpremultiplied.
#[derive(Clone, Debug, PartialEq)]
pub struct RgbaFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub struct SkiaRasterizer {
    theme: Theme,
    shaper: TextShaper,
    /// Text output depends on installed fonts; tests turn it off for stable pixels.
    pub draw_labels: bool,
}

impl SkiaRasterizer {
    pub fn new(theme: Theme) -> Self {
        Self { theme, shaper: TextShaper::new(), draw_labels: true }
    }

    /// Rasterizer using the chart's configured theme.
    pub fn for_chart(chart: &Chart) -> Self {
        Self::new(theme::find(&chart.config.theme))
    }

    pub fn without_labels(mut self) -> Self {
        self.draw_labels = false;
        self
    }

    fn paint_surface(&self, canvas: &AxesCanvas) -> Result<skia::Surface> {
        let size = canvas.view().surface();
        let (w, h) = (size.width.round() as i32, size.height.round() as i32);
        let mut surface =
            skia::surfaces::raster_n32_premul((w, h)).ok_or_else(|| anyhow!("failed to create {w}x{h} raster surface"))?;
        tracing::debug!(width = w, height = h, nodes = canvas.nodes().len(), "rasterizing canvas");
        let sk = surface.canvas();
        sk.clear(colour::parse(&self.theme.background));
        let view = *canvas.view();
        for node in canvas.nodes() {
            self.node(sk, &view, node);
        }
        Ok(surface)
    }

    pub fn render_png_bytes(&self, canvas: &AxesCanvas) -> Result<Vec<u8>> {
        let mut surface = self.paint_surface(canvas)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Write the canvas as a PNG, creating parent directories.
    pub fn render_to_png(&self, canvas: &AxesCanvas, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.render_png_bytes(canvas)?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn render_rgba8(&self, canvas: &AxesCanvas) -> Result<RgbaFrame> {
        let mut surface = self.paint_surface(canvas)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let row_bytes = w as usize * 4;
        let mut pixels = vec![0u8; row_bytes * h as usize];
        if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(anyhow!("reading back {w}x{h} pixels failed"));
        }
        Ok(RgbaFrame { width: w as u32, height: h as u32, pixels })
    }

    fn node(&self, sk: &skia::Canvas, view: &ViewBox, node: &Primitive) {
        match node {
            Primitive::Line(l) => self.line(sk, view, l),
            Primitive::Rect(r) => self.rect(sk, view, r),
            Primitive::Marker(m) => self.marker(sk, view, m),
            Primitive::Polyline(p) => self.polyline(sk, view, p),
            Primitive::Sector(s) => self.sector(sk, view, s),
            Primitive::Text(t) => {
                if self.draw_labels {
                    self.text(sk, view, t);
                }
            }
            Primitive::Group(g) => self.group(sk, view, g),
        }
    }

    fn group(&self, sk: &skia::Canvas, view: &ViewBox, g: &Group) {
        for child in &g.children {
            self.node(sk, view, child);
        }
    }

    fn line(&self, sk: &skia::Canvas, view: &ViewBox, l: &Line) {
        let colour = l.colour.as_deref().unwrap_or(match l.style {
            StrokeStyle::Solid => self.theme.axis_line.as_str(),
            StrokeStyle::MajorGridDash => self.theme.major_grid.as_str(),
            StrokeStyle::MinorGridDash => self.theme.minor_grid.as_str(),
        });
        let mut paint = stroke_paint(colour, l.width);
        if let Some(dash) = l.style.dash_array() {
            let intervals: Vec<f32> = dash.split_whitespace().filter_map(|v| v.parse().ok()).collect();
            paint.set_path_effect(skia::PathEffect::dash(&intervals, 0.0));
        }
        sk.draw_line(px(view, l.from), px(view, l.to), &paint);
    }

    fn rect(&self, sk: &skia::Canvas, view: &ViewBox, r: &RectShape) {
        let (a, b) = (px(view, r.rect.min), px(view, r.rect.max));
        let bounds = skia::Rect::from_ltrb(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y));
        if let Some(fill) = r.fill.as_deref() {
            sk.draw_rect(bounds, &fill_paint(fill));
        }
        if let Some(stroke) = r.stroke.as_deref() {
            sk.draw_rect(bounds, &stroke_paint(stroke, 1.0));
        }
    }

    fn marker(&self, sk: &skia::Canvas, view: &ViewBox, m: &Marker) {
        // Radius is in pixels whatever the scale factors.
        sk.draw_circle(px(view, m.anchor()), m.radius as f32, &fill_paint(&m.colour));
    }

    fn polyline(&self, sk: &skia::Canvas, view: &ViewBox, p: &Polyline) {
        let Some((first, rest)) = p.points.split_first() else {
            return;
        };
        let mut path = skia::Path::new();
        path.move_to(px(view, *first));
        for pt in rest {
            path.line_to(px(view, *pt));
        }
        if let Some(fill) = p.fill.as_deref().filter(|f| *f != "none") {
            sk.draw_path(&path, &fill_paint(fill));
        }
        let mut stroke = stroke_paint(&p.colour, p.width);
        stroke.set_stroke_join(skia::paint::Join::Round);
        sk.draw_path(&path, &stroke);
    }

    fn sector(&self, sk: &skia::Canvas, view: &ViewBox, s: &Sector) {
        let (sx, sy) = view.scale_factors();
        let c = px(view, s.centre);
        let (rx, ry) = ((s.radius * sx) as f32, (s.radius * sy) as f32);
        let oval = skia::Rect::from_ltrb(c.x - rx, c.y - ry, c.x + rx, c.y + ry);
        let sweep = (s.end_angle - s.start_angle).rem_euclid(360.0);
        // Surface angles run clockwise because y points down.
        let mut path = skia::Path::new();
        path.move_to(c);
        path.arc_to(oval, -s.start_angle as f32, -sweep as f32, false);
        path.close();
        sk.draw_path(&path, &fill_paint(&s.colour));
        sk.draw_path(&path, &stroke_paint(&self.theme.background, 1.0));
    }

    fn text(&self, sk: &skia::Canvas, view: &ViewBox, t: &Text) {
        let anchor = px(view, t.anchor());
        let size = t.font_size as f32;
        let colour = colour::parse(&self.theme.axis_label);
        let h = t.position.horizontal() as f32;
        for (line, baseline) in t.lines().iter().zip(t.baselines()) {
            let width = self.shaper.measure_width(line, size);
            self.shaper.draw_at_baseline(sk, line, anchor.x - h * width, anchor.y + baseline as f32, size, colour);
        }
    }
}

fn px(view: &ViewBox, p: Point) -> skia::Point {
    let s = view.to_surface(p);
    skia::Point::new(s.x as f32, s.y as f32)
}

fn stroke_paint(css: &str, width: f64) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width as f32);
    paint.set_color(colour::parse(css));
    paint
}

fn fill_paint(css: &str) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(colour::parse(css));
    paint
}
