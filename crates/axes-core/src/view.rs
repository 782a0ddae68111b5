// File: crates/axes-core/src/view.rs
// Summary: View box: visible data window, drawing surface and the scale factors between them.

use crate::error::{LayoutError, Result};
use crate::geometry::{Point, Rect, Size};

/// Maps a data-space window (y up) onto a pixel surface (y down) with independent x/y factors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
    window: Rect,
    surface: Size,
    sx: f64,
    sy: f64,
}

impl ViewBox {
    /// Starts with the window equal to the surface (factors 1, 1).
    pub fn new(surface: Size) -> Result<Self> {
        let Size { width, height } = surface;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(LayoutError::InvalidSurface { width, height });
        }
        Ok(Self { window: Rect::from_ltrb(0.0, 0.0, width, height), surface, sx: 1.0, sy: 1.0 })
    }

    /// Replace the window and recompute both factors. A window without positive finite extent
    /// is rejected and the previous state is kept.
    pub fn set_window(&mut self, window: Rect) -> Result<()> {
        if !window.is_proper() {
            tracing::warn!(width = window.width(), height = window.height(), "rejected degenerate view window");
            return Err(LayoutError::DegenerateWindow { width: window.width(), height: window.height() });
        }
        self.window = window;
        self.sx = self.surface.width / window.width();
        self.sy = self.surface.height / window.height();
        Ok(())
    }

    /// `(sx, sy)` in pixels per data unit.
    pub fn scale_factors(&self) -> (f64, f64) {
        (self.sx, self.sy)
    }

    pub fn window(&self) -> Rect {
        self.window
    }

    pub fn surface(&self) -> Size {
        self.surface
    }

    pub fn to_surface(&self, p: Point) -> Point {
        Point::new((p.x - self.window.min.x) * self.sx, (self.window.max.y - p.y) * self.sy)
    }

    pub fn to_data(&self, p: Point) -> Point {
        Point::new(self.window.min.x + p.x / self.sx, self.window.max.y - p.y / self.sy)
    }

    /// SVG `matrix(a b c d e f)` of the data container: `(sx, −sy)` plus the window offset.
    pub fn container_matrix(&self) -> [f64; 6] {
        [self.sx, 0.0, 0.0, -self.sy, -self.window.min.x * self.sx, self.window.max.y * self.sy]
    }

    /// Zoom about a data point; `factor < 1` zooms in.
    pub fn zoom_at(&mut self, focus: Point, factor: f64) -> Result<()> {
        let w = self.window;
        let scale = |v: f64, f: f64| f + (v - f) * factor;
        self.set_window(Rect::from_ltrb(
            scale(w.min.x, focus.x),
            scale(w.min.y, focus.y),
            scale(w.max.x, focus.x),
            scale(w.max.y, focus.y),
        ))
    }

    /// Drag by a pixel delta; content follows the pointer.
    pub fn pan_by(&mut self, dx_px: f64, dy_px: f64) -> Result<()> {
        let (dx, dy) = (-dx_px / self.sx, dy_px / self.sy);
        let w = self.window;
        self.set_window(Rect::from_ltrb(w.min.x + dx, w.min.y + dy, w.max.x + dx, w.max.y + dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_follow_window() {
        let mut v = ViewBox::new(Size::new(400.0, 200.0)).unwrap();
        v.set_window(Rect::from_ltrb(0.0, -1.0, 100.0, 1.0)).unwrap();
        assert_eq!(v.scale_factors(), (4.0, 100.0));
        assert_eq!(v.to_surface(Point::new(50.0, 0.0)), Point::new(200.0, 100.0));
        assert_eq!(v.to_data(Point::new(200.0, 100.0)), Point::new(50.0, 0.0));
    }

    #[test]
    fn rejects_invalid_surface() {
        assert!(matches!(ViewBox::new(Size::new(0.0, 10.0)), Err(LayoutError::InvalidSurface { .. })));
    }

    #[test]
    fn zoom_keeps_focus() {
        let mut v = ViewBox::new(Size::new(100.0, 100.0)).unwrap();
        v.set_window(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0)).unwrap();
        v.zoom_at(Point::new(5.0, 5.0), 0.5).unwrap();
        assert_eq!(v.window(), Rect::from_ltrb(2.5, 2.5, 7.5, 7.5));
        assert_eq!(v.scale_factors(), (20.0, 20.0));
    }

    #[test]
    fn pan_moves_window_against_drag() {
        let mut v = ViewBox::new(Size::new(100.0, 100.0)).unwrap();
        v.set_window(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0)).unwrap();
        v.pan_by(10.0, 10.0).unwrap();
        assert_eq!(v.window(), Rect::from_ltrb(-1.0, 1.0, 9.0, 11.0));
    }
}
