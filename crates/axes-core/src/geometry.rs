// File: crates/axes-core/src/geometry.rs
// Summary: Lightweight geometry helpers for data-space and surface-space math.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Drawing-surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle. In data space `y` grows upward, so `min` is the lower-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub const fn from_ltrb(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self { min: Point::new(xmin, ymin), max: Point::new(xmax, ymax) }
    }

    /// Smallest rectangle holding both corners, whatever order they come in.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        Some(it.fold(Self { min: first, max: first }, |r, p| r.include(p)))
    }

    pub fn width(&self) -> f64 { self.max.x - self.min.x }
    pub fn height(&self) -> f64 { self.max.y - self.min.y }

    /// True when both extents are strictly positive and finite.
    pub fn is_proper(&self) -> bool {
        let (w, h) = (self.width(), self.height());
        w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0
    }

    pub fn include(&self, p: Point) -> Self {
        Self {
            min: Point::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    pub fn union(&self, other: &Rect) -> Self {
        self.include(other.min).include(other.max)
    }
}

/// Float comparison scaled to the magnitude of the step being walked.
#[inline]
pub fn approx_eq(a: f64, b: f64, step: f64) -> bool {
    (a - b).abs() <= step.abs() * 1e-9 + f64::EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_spans_all() {
        let r = Rect::from_points([Point::new(1.0, 5.0), Point::new(-2.0, 3.0), Point::new(4.0, -1.0)]).unwrap();
        assert_eq!(r, Rect::from_ltrb(-2.0, -1.0, 4.0, 5.0));
        assert!(Rect::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn proper_rejects_flat() {
        assert!(Rect::from_ltrb(0.0, 0.0, 1.0, 1.0).is_proper());
        assert!(!Rect::from_ltrb(0.0, 0.0, 0.0, 1.0).is_proper());
        assert!(!Rect::from_ltrb(0.0, 0.0, f64::INFINITY, 1.0).is_proper());
    }
}
