// File: crates/axes-core/src/svg.rs
// Summary: SVG serializer for an `AxesCanvas`: one data-space container mapped by the view
// matrix, non-scaling strokes, inverse-scaled text/markers and `<title>` tooltips.

use std::fmt::Write as _;

use crate::canvas::AxesCanvas;
use crate::geometry::Point;
use crate::primitive::{fmt_coord, fmt_num, Group, Line, Marker, Polyline, Primitive, Rescalable, Sector, StrokeStyle, Text};
use crate::theme::Theme;

pub struct SvgWriter<'a> {
    theme: &'a Theme,
}

impl<'a> SvgWriter<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    pub fn write(&self, canvas: &AxesCanvas) -> String {
        let view = canvas.view();
        let size = view.surface();
        let m = view.container_matrix();
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" preserveAspectRatio="none" font-family="sans-serif">"#,
            w = fmt_num(size.width),
            h = fmt_num(size.height)
        );
        let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, self.theme.background);
        let _ = writeln!(
            out,
            r#"<g id="panel" transform="matrix({} {} {} {} {} {})">"#,
            fmt_coord(m[0]),
            fmt_coord(m[1]),
            fmt_coord(m[2]),
            fmt_coord(m[3]),
            fmt_coord(m[4]),
            fmt_coord(m[5])
        );
        for node in canvas.nodes() {
            self.node(&mut out, node);
        }
        out.push_str("</g>\n</svg>\n");
        out
    }

    fn node(&self, out: &mut String, node: &Primitive) {
        match node {
            Primitive::Line(l) => self.line(out, l),
            Primitive::Rect(r) => {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" vector-effect="non-scaling-stroke""#,
                    fmt_coord(r.rect.min.x),
                    fmt_coord(r.rect.min.y),
                    fmt_coord(r.rect.width()),
                    fmt_coord(r.rect.height()),
                    r.fill.as_deref().unwrap_or("none"),
                    r.stroke.as_deref().unwrap_or("none")
                );
                close(out, r.tooltip.as_deref(), "rect");
            }
            Primitive::Marker(m) => self.marker(out, m),
            Primitive::Polyline(p) => self.polyline(out, p),
            Primitive::Sector(s) => self.sector(out, s),
            Primitive::Text(t) => self.text(out, t),
            Primitive::Group(g) => self.group(out, g),
        }
    }

    fn group(&self, out: &mut String, g: &Group) {
        match &g.id {
            Some(id) => {
                let _ = writeln!(out, r#"<g id="{}">"#, escape(id));
            }
            None => out.push_str("<g>\n"),
        }
        for child in &g.children {
            self.node(out, child);
        }
        out.push_str("</g>\n");
    }

    fn line(&self, out: &mut String, l: &Line) {
        let colour = l.colour.as_deref().unwrap_or(match l.style {
            StrokeStyle::Solid => self.theme.axis_line.as_str(),
            StrokeStyle::MajorGridDash => self.theme.major_grid.as_str(),
            StrokeStyle::MinorGridDash => self.theme.minor_grid.as_str(),
        });
        let _ = write!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" vector-effect="non-scaling-stroke""#,
            fmt_coord(l.from.x),
            fmt_coord(l.from.y),
            fmt_coord(l.to.x),
            fmt_coord(l.to.y),
            colour,
            fmt_num(l.width)
        );
        if let Some(dash) = l.style.dash_array() {
            let _ = write!(out, r#" stroke-dasharray="{dash}""#);
        }
        out.push_str("/>\n");
    }

    fn marker(&self, out: &mut String, m: &Marker) {
        let c = m.centre();
        let _ = write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" transform="{}""#,
            fmt_coord(c.x),
            fmt_coord(c.y),
            fmt_num(m.radius),
            m.colour,
            m.inverse_scale().to_svg()
        );
        close(out, m.tooltip.as_deref(), "circle");
    }

    fn polyline(&self, out: &mut String, p: &Polyline) {
        let points: Vec<String> = p.points.iter().map(|pt| format!("{},{}", fmt_coord(pt.x), fmt_coord(pt.y))).collect();
        let _ = write!(
            out,
            r#"<polyline points="{}" fill="{}" stroke="{}" stroke-width="{}" stroke-linejoin="round" vector-effect="non-scaling-stroke""#,
            points.join(" "),
            p.fill.as_deref().unwrap_or("none"),
            p.colour,
            fmt_num(p.width)
        );
        close(out, p.tooltip.as_deref(), "polyline");
    }

    fn sector(&self, out: &mut String, s: &Sector) {
        let (a, b) = (s.point_at(s.start_angle), s.point_at(s.end_angle));
        let sweep = (s.end_angle - s.start_angle).rem_euclid(360.0);
        let large = if sweep > 180.0 { 1 } else { 0 };
        let r = fmt_coord(s.radius);
        let _ = write!(
            out,
            r#"<path d="M {cx} {cy} L {ax} {ay} A {r} {r} 0 {large} 1 {bx} {by} Z" fill="{fill}" stroke="{stroke}" vector-effect="non-scaling-stroke""#,
            cx = fmt_coord(s.centre.x),
            cy = fmt_coord(s.centre.y),
            ax = fmt_coord(a.x),
            ay = fmt_coord(a.y),
            bx = fmt_coord(b.x),
            by = fmt_coord(b.y),
            fill = s.colour,
            stroke = self.theme.background,
        );
        close(out, s.tooltip.as_deref(), "path");
    }

    fn text(&self, out: &mut String, t: &Text) {
        let Point { x, y } = t.anchor();
        let (x, y) = (fmt_coord(x), fmt_coord(y));
        let _ = write!(
            out,
            r#"<text x="{x}" y="{y}" font-size="{}" text-anchor="{}" fill="{}" transform="{}">"#,
            fmt_num(t.font_size),
            t.position.svg_text_anchor(),
            self.theme.axis_label,
            t.inverse_scale().to_svg()
        );
        for (line, baseline) in t.lines().iter().zip(t.baselines()) {
            let _ = write!(out, r#"<tspan x="{x}" y="{}">{}</tspan>"#, fmt_coord(t.anchor().y + baseline), escape(line));
        }
        if let Some(tip) = &t.tooltip {
            let _ = write!(out, "<title>{}</title>", escape(tip));
        }
        out.push_str("</text>\n");
    }
}

fn close(out: &mut String, tooltip: Option<&str>, tag: &str) {
    match tooltip {
        Some(tip) => {
            let _ = writeln!(out, "><title>{}</title></{tag}>", escape(tip));
        }
        None => out.push_str("/>\n"),
    }
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Size};
    use crate::primitive::{RectShape, TextAnchor};

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn text_gets_inverse_scale_and_tspans() {
        let mut c = AxesCanvas::new(Size::new(100.0, 100.0)).unwrap();
        c.set_window(Rect::from_ltrb(0.0, 0.0, 10.0, 50.0)).unwrap();
        c.attach(Text::new("a\nb", Point::new(1.0, 2.0), TextAnchor::TopLeft, 10.0));
        let svg = SvgWriter::new(&Theme::light()).write(&c);
        assert!(svg.contains(r#"transform="matrix(10 0 0 -2 0 100)""#), "{svg}");
        assert!(svg.contains("translate(1,2) scale(0.1,-0.5) translate(-1,-2)"), "{svg}");
        assert_eq!(svg.matches("<tspan").count(), 2);
    }

    #[test]
    fn sector_and_rect_shapes() {
        let mut c = AxesCanvas::new(Size::new(100.0, 100.0)).unwrap();
        c.set_window(Rect::from_ltrb(-2.0, -2.0, 2.0, 2.0)).unwrap();
        c.attach(Sector {
            centre: Point::new(0.0, 0.0),
            radius: 1.0,
            start_angle: 0.0,
            end_angle: 90.0,
            colour: "red".into(),
            tooltip: Some("q1".into()),
        });
        c.attach(RectShape {
            rect: Rect::from_ltrb(-1.0, -1.0, 0.0, 0.0),
            stroke: None,
            fill: Some("blue".into()),
            tooltip: None,
        });
        let svg = SvgWriter::new(&Theme::light()).write(&c);
        assert!(svg.contains(r#"d="M 0 0 L 1 0 A 1 1 0 0 1 "#), "{svg}");
        assert!(svg.contains(r#" 1 Z" fill="red""#), "{svg}");
        assert!(svg.contains("<title>q1</title></path>"), "{svg}");
        assert!(svg.contains(r#"<rect x="-1" y="-1" width="1" height="1" fill="blue" stroke="none""#), "{svg}");
    }
}
