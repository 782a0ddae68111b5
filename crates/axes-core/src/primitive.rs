// File: crates/axes-core/src/primitive.rs
// Summary: Drawing primitives in data space and the scale-invariant (`Rescalable`) capability.
// Notes:
// - Coordinates are data units with y up. Stroke widths, marker radii and font sizes are
//   pixels; text and markers keep their pixel size through an inverse-scale transform.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::text;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeStyle {
    #[default]
    Solid,
    MajorGridDash,
    MinorGridDash,
}

impl StrokeStyle {
    /// SVG `stroke-dasharray` in pixels, `None` for solid lines.
    pub fn dash_array(self) -> Option<&'static str> {
        match self {
            StrokeStyle::Solid => None,
            StrokeStyle::MajorGridDash => Some("4 2"),
            StrokeStyle::MinorGridDash => Some("1 3"),
        }
    }
}

/// Where the anchor point sits on the text box, numbered like a phone keypad:
/// 1 top-left, 2 top-centre, 3 top-right, … 9 bottom-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    TopLeft = 1,
    TopCentre = 2,
    TopRight = 3,
    MiddleLeft = 4,
    Centre = 5,
    MiddleRight = 6,
    BottomLeft = 7,
    BottomCentre = 8,
    BottomRight = 9,
}

impl TextAnchor {
    pub fn from_position(n: u8) -> Option<Self> {
        use TextAnchor::*;
        Some(match n {
            1 => TopLeft,
            2 => TopCentre,
            3 => TopRight,
            4 => MiddleLeft,
            5 => Centre,
            6 => MiddleRight,
            7 => BottomLeft,
            8 => BottomCentre,
            9 => BottomRight,
            _ => return None,
        })
    }

    /// Horizontal share of the text box to the left of the anchor (0, ½ or 1).
    pub fn horizontal(self) -> f64 {
        match (self as u8 - 1) % 3 {
            0 => 0.0,
            1 => 0.5,
            _ => 1.0,
        }
    }

    /// Vertical share of the text box above the anchor (0, ½ or 1).
    pub fn vertical(self) -> f64 {
        match (self as u8 - 1) / 3 {
            0 => 0.0,
            1 => 0.5,
            _ => 1.0,
        }
    }

    pub fn svg_text_anchor(self) -> &'static str {
        match (self as u8 - 1) % 3 {
            0 => "start",
            1 => "middle",
            _ => "end",
        }
    }
}

/// `translate(a) scale(1/sx, −1/sy) translate(−a)`: undoes the container mapping around `a`
/// so local offsets from the anchor are pixels with y pointing down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InverseScale {
    pub anchor: Point,
    pub sx: f64,
    pub sy: f64,
}

impl InverseScale {
    pub fn identity_at(anchor: Point) -> Self {
        Self { anchor, sx: 1.0, sy: 1.0 }
    }

    /// Data-space position of a pixel offset from the anchor.
    pub fn apply(&self, dx_px: f64, dy_px: f64) -> Point {
        Point::new(self.anchor.x + dx_px / self.sx, self.anchor.y - dy_px / self.sy)
    }

    pub fn to_svg(&self) -> String {
        let Point { x, y } = self.anchor;
        format!(
            "translate({},{}) scale({},{}) translate({},{})",
            fmt_coord(x),
            fmt_coord(y),
            fmt_coord(1.0 / self.sx),
            fmt_coord(-1.0 / self.sy),
            fmt_coord(-x),
            fmt_coord(-y)
        )
    }
}

/// Content that must keep its on-screen size whatever the canvas scale factors are.
pub trait Rescalable {
    fn anchor(&self) -> Point;
    /// Recompute the inverse transform for new factors `(sx, sy)` in pixels per data unit.
    fn rescale(&mut self, sx: f64, sy: f64);
    fn inverse_scale(&self) -> InverseScale;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub style: StrokeStyle,
    pub colour: Option<String>,
    pub width: f64,
}

impl Line {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to, style: StrokeStyle::Solid, colour: None, width: 1.0 }
    }

    pub fn styled(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn coloured(mut self, colour: impl Into<String>, width: f64) -> Self {
        self.colour = Some(colour.into());
        self.width = width;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RectShape {
    pub rect: Rect,
    pub stroke: Option<String>,
    pub fill: Option<String>,
    pub tooltip: Option<String>,
}

/// Dot of fixed pixel radius at a data point.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub radius: f64,
    pub colour: String,
    pub tooltip: Option<String>,
    transform: InverseScale,
}

impl Marker {
    pub fn new(centre: Point, colour: impl Into<String>) -> Self {
        Self { radius: 3.0, colour: colour.into(), tooltip: None, transform: InverseScale::identity_at(centre) }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn centre(&self) -> Point {
        self.transform.anchor
    }
}

impl Rescalable for Marker {
    fn anchor(&self) -> Point {
        self.transform.anchor
    }

    fn rescale(&mut self, sx: f64, sy: f64) {
        self.transform.sx = sx;
        self.transform.sy = sy;
    }

    fn inverse_scale(&self) -> InverseScale {
        self.transform
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub colour: String,
    pub width: f64,
    pub fill: Option<String>,
    pub tooltip: Option<String>,
}

impl Polyline {
    pub fn new(points: Vec<Point>, colour: impl Into<String>, width: f64) -> Self {
        Self { points, colour: colour.into(), width, fill: None, tooltip: None }
    }
}

/// Pie slice; angles in degrees, counter-clockwise from the positive x axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Sector {
    pub centre: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub colour: String,
    pub tooltip: Option<String>,
}

impl Sector {
    pub fn point_at(&self, degrees: f64) -> Point {
        let r = degrees.to_radians();
        Point::new(self.centre.x + self.radius * r.cos(), self.centre.y + self.radius * r.sin())
    }
}

/// Text anchored at a data point. Wrapped text breaks its words into lines no wider than a
/// pixel width.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub text: String,
    pub position: TextAnchor,
    pub font_size: f64,
    pub wrap_width: Option<f64>,
    pub tooltip: Option<String>,
    transform: InverseScale,
}

impl Text {
    pub fn new(text: impl Into<String>, anchor: Point, position: TextAnchor, font_size: f64) -> Self {
        Self {
            text: text.into(),
            position,
            font_size,
            wrap_width: None,
            tooltip: None,
            transform: InverseScale::identity_at(anchor),
        }
    }

    pub fn wrapped(text: impl Into<String>, anchor: Point, width_px: f64, position: TextAnchor, font_size: f64) -> Self {
        Self { wrap_width: Some(width_px), ..Self::new(text, anchor, position, font_size) }
    }

    pub fn lines(&self) -> Vec<String> {
        match self.wrap_width {
            Some(w) => text::wrap_text(&self.text, w, self.font_size),
            None => text::split_lines(&self.text),
        }
    }

    /// Pixel offset of the text box's top-left corner from the anchor (y down).
    pub fn box_offset(&self) -> (f64, f64) {
        let size = text::extent(&self.lines(), self.font_size);
        (-self.position.horizontal() * size.width, -self.position.vertical() * size.height)
    }

    /// Baseline offsets (pixels, y down) of each line relative to the anchor.
    pub fn baselines(&self) -> Vec<f64> {
        let line_height = self.font_size * text::LINE_HEIGHT_EM;
        let (_, top) = self.box_offset();
        // Ascent of a typical Latin face.
        let ascent = self.font_size * 0.8 + (line_height - self.font_size) / 2.0;
        (0..self.lines().len()).map(|i| top + ascent + i as f64 * line_height).collect()
    }
}

impl Rescalable for Text {
    fn anchor(&self) -> Point {
        self.transform.anchor
    }

    fn rescale(&mut self, sx: f64, sy: f64) {
        self.transform.sx = sx;
        self.transform.sy = sy;
    }

    fn inverse_scale(&self) -> InverseScale {
        self.transform
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
    pub id: Option<String>,
    pub children: Vec<Primitive>,
}

impl Group {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), children: Vec::new() }
    }

    pub fn push(&mut self, p: impl Into<Primitive>) {
        self.children.push(p.into());
    }

    pub fn extend<I: IntoIterator<Item = Primitive>>(&mut self, items: I) {
        self.children.extend(items);
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Line(Line),
    Rect(RectShape),
    Marker(Marker),
    Polyline(Polyline),
    Sector(Sector),
    Text(Text),
    Group(Group),
}

macro_rules! impl_from_primitive {
    ($($ty:ident),*) => {
        $(impl From<$ty> for Primitive {
            fn from(v: $ty) -> Self { Primitive::$ty(v) }
        })*
    };
}
impl_from_primitive!(Line, Marker, Polyline, Sector, Text, Group);

impl From<RectShape> for Primitive {
    fn from(v: RectShape) -> Self {
        Primitive::Rect(v)
    }
}

impl Primitive {
    pub fn as_rescalable_mut(&mut self) -> Option<&mut dyn Rescalable> {
        match self {
            Primitive::Text(t) => Some(t),
            Primitive::Marker(m) => Some(m),
            _ => None,
        }
    }

    pub fn tooltip(&self) -> Option<&str> {
        match self {
            Primitive::Rect(r) => r.tooltip.as_deref(),
            Primitive::Marker(m) => m.tooltip.as_deref(),
            Primitive::Polyline(p) => p.tooltip.as_deref(),
            Primitive::Sector(s) => s.tooltip.as_deref(),
            Primitive::Text(t) => t.tooltip.as_deref(),
            Primitive::Line(_) | Primitive::Group(_) => None,
        }
    }

    /// Child at `path` (indices through nested groups); the empty path is `self`.
    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut Primitive> {
        match path.split_first() {
            None => Some(self),
            Some((&i, rest)) => match self {
                Primitive::Group(g) => g.children.get_mut(i)?.get_mut(rest),
                _ => None,
            },
        }
    }

    /// Paths of every scale-invariant node in this subtree, depth first.
    pub fn rescalable_paths(&self) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        collect_rescalable(self, &mut Vec::new(), &mut out);
        out
    }

    /// Bounding box in data space given the scale factors pixel sizes are converted with.
    pub fn bounds(&self, sx: f64, sy: f64) -> Option<Rect> {
        match self {
            Primitive::Line(l) => Some(Rect::from_corners(l.from, l.to)),
            Primitive::Rect(r) => Some(r.rect),
            Primitive::Polyline(p) => Rect::from_points(p.points.iter().copied()),
            Primitive::Sector(s) => {
                let r = s.radius.abs();
                Some(Rect::from_ltrb(s.centre.x - r, s.centre.y - r, s.centre.x + r, s.centre.y + r))
            }
            Primitive::Marker(m) => {
                let c = m.centre();
                let (rx, ry) = (m.radius / sx, m.radius / sy);
                Some(Rect::from_ltrb(c.x - rx, c.y - ry, c.x + rx, c.y + ry))
            }
            Primitive::Text(t) => {
                let size = text::extent(&t.lines(), t.font_size);
                let (left, top) = t.box_offset();
                let at = InverseScale { anchor: t.anchor(), sx, sy };
                Some(Rect::from_corners(at.apply(left, top), at.apply(left + size.width, top + size.height)))
            }
            Primitive::Group(g) => g
                .children
                .iter()
                .filter_map(|c| c.bounds(sx, sy))
                .reduce(|a, b| a.union(&b)),
        }
    }
}

fn collect_rescalable(node: &Primitive, path: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    match node {
        Primitive::Text(_) | Primitive::Marker(_) => out.push(path.clone()),
        Primitive::Group(g) => {
            for (i, child) in g.children.iter().enumerate() {
                path.push(i);
                collect_rescalable(child, path, out);
                path.pop();
            }
        }
        _ => {}
    }
}

/// Compact decimal for SVG attributes: at most four decimals, no trailing zeros, no "-0".
pub fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        _ => s.to_string(),
    }
}

/// Data-space value at full precision. The container matrix magnifies any rounding here into
/// pixels, so values are written in the shortest form that parses back to the same `f64`.
pub fn fmt_coord(v: f64) -> String {
    if !v.is_finite() || v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}
