// File: crates/axes-core/src/canvas.rs
// Summary: Axes canvas: owns the view box, the attached primitives and the registry of
// scale-invariant nodes that are rescaled after every window change.

use crate::error::{LayoutError, Result};
use crate::geometry::{Point, Rect, Size};
use crate::primitive::Primitive;
use crate::view::ViewBox;

/// Handle to a top-level node attached to a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
pub struct AxesCanvas {
    view: ViewBox,
    nodes: Vec<Primitive>,
    /// `(node index, path inside the node)` of every Text/Marker.
    rescalable: Vec<(usize, Vec<usize>)>,
    best_fit: Option<Rect>,
    rescale_passes: usize,
}

impl AxesCanvas {
    pub fn new(surface: Size) -> Result<Self> {
        Ok(Self {
            view: ViewBox::new(surface)?,
            nodes: Vec::new(),
            rescalable: Vec::new(),
            best_fit: None,
            rescale_passes: 0,
        })
    }

    pub fn view(&self) -> &ViewBox {
        &self.view
    }

    pub fn scale_factors(&self) -> (f64, f64) {
        self.view.scale_factors()
    }

    pub fn nodes(&self) -> &[Primitive] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Primitive> {
        self.nodes.get(id.0)
    }

    /// Number of registered scale-invariant nodes.
    pub fn rescalable_count(&self) -> usize {
        self.rescalable.len()
    }

    /// How many rescale passes have run since the canvas was created.
    pub fn rescale_passes(&self) -> usize {
        self.rescale_passes
    }

    /// Attach a primitive (or group). Text and markers inside it are registered and sized for
    /// the current factors straight away.
    pub fn attach(&mut self, primitive: impl Into<Primitive>) -> NodeId {
        let mut primitive = primitive.into();
        let index = self.nodes.len();
        let (sx, sy) = self.view.scale_factors();
        for path in primitive.rescalable_paths() {
            if let Some(r) = primitive.get_mut(&path).and_then(Primitive::as_rescalable_mut) {
                r.rescale(sx, sy);
            }
            self.rescalable.push((index, path));
        }
        self.nodes.push(primitive);
        NodeId(index)
    }

    pub fn attach_all<I, P>(&mut self, primitives: I) -> Vec<NodeId>
    where
        I: IntoIterator<Item = P>,
        P: Into<Primitive>,
    {
        primitives.into_iter().map(|p| self.attach(p)).collect()
    }

    /// Set the window then rescale every registered node once.
    pub fn set_window(&mut self, window: Rect) -> Result<()> {
        self.view.set_window(window)?;
        self.rescale_all();
        Ok(())
    }

    pub fn zoom_at(&mut self, focus: Point, factor: f64) -> Result<()> {
        self.view.zoom_at(focus, factor)?;
        self.rescale_all();
        Ok(())
    }

    pub fn pan_by(&mut self, dx_px: f64, dy_px: f64) -> Result<()> {
        self.view.pan_by(dx_px, dy_px)?;
        self.rescale_all();
        Ok(())
    }

    fn rescale_all(&mut self) {
        let (sx, sy) = self.view.scale_factors();
        for (index, path) in &self.rescalable {
            let node = self.nodes.get_mut(*index).and_then(|n| n.get_mut(path));
            if let Some(r) = node.and_then(Primitive::as_rescalable_mut) {
                r.rescale(sx, sy);
            }
        }
        self.rescale_passes += 1;
    }

    /// Union of all attached bounds, measured with the current factors.
    pub fn content_bounds(&self) -> Option<Rect> {
        let (sx, sy) = self.view.scale_factors();
        self.nodes.iter().filter_map(|n| n.bounds(sx, sy)).reduce(|a, b| a.union(&b))
    }

    /// Make everything attached visible: the pinned best fit when there is one, otherwise the
    /// content bounds at the current factors. Returns the window applied.
    pub fn fit_to_content(&mut self) -> Result<Rect> {
        let window = match self.best_fit {
            Some(pinned) => pinned,
            None => self.content_bounds().ok_or(LayoutError::NothingToFit)?,
        };
        self.set_window(window)?;
        Ok(window)
    }

    /// Fix the window later fits return to, e.g. after a legend has been placed outside the
    /// data area.
    pub fn pin_best_fit(&mut self, window: Rect) {
        self.best_fit = Some(window);
    }

    pub fn best_fit(&self) -> Option<Rect> {
        self.best_fit
    }

    /// Drop all nodes and the pinned fit; the window is left as is.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.rescalable.clear();
        self.best_fit = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{Group, Line, Marker, Rescalable, Text, TextAnchor};

    fn canvas() -> AxesCanvas {
        AxesCanvas::new(Size::new(200.0, 100.0)).unwrap()
    }

    #[test]
    fn registers_nested_text_and_markers() {
        let mut c = canvas();
        let mut g = Group::new("g");
        g.push(Line::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0)));
        g.push(Text::new("a", Point::new(0.0, 0.0), TextAnchor::Centre, 12.0));
        c.attach(g);
        c.attach(Marker::new(Point::new(5.0, 5.0), "red"));
        assert_eq!(c.rescalable_count(), 2);
    }

    #[test]
    fn fit_rescales_exactly_once() {
        let mut c = canvas();
        let id = c.attach(Marker::new(Point::new(5.0, 5.0), "red"));
        c.attach(Line::new(Point::new(0.0, 0.0), Point::new(20.0, 10.0)));
        let window = c.fit_to_content().unwrap();
        assert_eq!(c.rescale_passes(), 1);
        assert_eq!(window, Rect::from_ltrb(0.0, 0.0, 20.0, 10.0));
        let (sx, sy) = c.scale_factors();
        assert_eq!((sx, sy), (10.0, 10.0));
        match c.node(id) {
            Some(Primitive::Marker(m)) => assert_eq!((m.inverse_scale().sx, m.inverse_scale().sy), (sx, sy)),
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn attach_all_then_clear() {
        let mut c = canvas();
        let ids = c.attach_all([
            Primitive::from(Marker::new(Point::new(1.0, 1.0), "red")),
            Primitive::from(Line::new(Point::new(0.0, 0.0), Point::new(2.0, 2.0))),
        ]);
        assert_eq!(ids.len(), 2);
        assert!(matches!(c.node(ids[1]), Some(Primitive::Line(_))));
        c.pin_best_fit(Rect::from_ltrb(0.0, 0.0, 1.0, 1.0));
        c.clear();
        assert!(c.nodes().is_empty());
        assert_eq!(c.rescalable_count(), 0);
        assert_eq!(c.best_fit(), None);
    }

    #[test]
    fn pinned_fit_wins() {
        let mut c = canvas();
        c.attach(Line::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)));
        c.pin_best_fit(Rect::from_ltrb(-1.0, -1.0, 3.0, 3.0));
        assert_eq!(c.fit_to_content().unwrap(), Rect::from_ltrb(-1.0, -1.0, 3.0, 3.0));
    }

    #[test]
    fn empty_canvas_has_nothing_to_fit() {
        assert_eq!(canvas().fit_to_content(), Err(LayoutError::NothingToFit));
    }

    #[test]
    fn rejected_window_keeps_state() {
        let mut c = canvas();
        c.set_window(Rect::from_ltrb(0.0, 0.0, 2.0, 1.0)).unwrap();
        let before = *c.view();
        assert!(c.set_window(Rect::from_ltrb(1.0, 0.0, 1.0, 5.0)).is_err());
        assert_eq!(*c.view(), before);
        assert_eq!(c.rescale_passes(), 1);
    }
}
