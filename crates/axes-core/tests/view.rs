// File: crates/axes-core/tests/view.rs
// Purpose: View box scale factors, window rejection and rescale-after-zoom behaviour.

use axes_core::{AxesCanvas, LayoutError, Marker, Point, Primitive, Rect, Rescalable, Size, ViewBox};

#[test]
fn factors_are_surface_over_window() {
    for &(w, h) in &[(800.0, 500.0), (1.0, 1.0), (1920.0, 1080.0)] {
        let mut v = ViewBox::new(Size::new(w, h)).unwrap();
        for window in [
            Rect::from_ltrb(0.0, 0.0, 100.0, 1.0),
            Rect::from_ltrb(-3.5, -1e-3, 2.5, 1e-3),
            Rect::from_ltrb(1e6, 5.0, 1e6 + 40.0, 500.0),
        ] {
            v.set_window(window).unwrap();
            assert_eq!(v.scale_factors(), (w / window.width(), h / window.height()));
        }
    }
}

#[test]
fn zero_extent_window_is_rejected() {
    let mut v = ViewBox::new(Size::new(800.0, 500.0)).unwrap();
    v.set_window(Rect::from_ltrb(0.0, 0.0, 8.0, 5.0)).unwrap();
    for bad in [
        Rect::from_ltrb(2.0, 0.0, 2.0, 5.0),
        Rect::from_ltrb(0.0, 1.0, 8.0, 1.0),
        Rect::from_ltrb(0.0, 0.0, f64::NAN, 5.0),
        Rect::from_ltrb(0.0, 0.0, -4.0, 5.0),
    ] {
        let err = v.set_window(bad).unwrap_err();
        assert!(matches!(err, LayoutError::DegenerateWindow { .. }));
        assert_eq!(v.scale_factors(), (100.0, 100.0));
        assert_eq!(v.window(), Rect::from_ltrb(0.0, 0.0, 8.0, 5.0));
    }
}

#[test]
fn zoom_and_pan_rescale_markers_once_each() {
    let mut c = AxesCanvas::new(Size::new(100.0, 100.0)).unwrap();
    let id = c.attach(Marker::new(Point::new(5.0, 5.0), "red"));
    c.set_window(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0)).unwrap();
    c.zoom_at(Point::new(5.0, 5.0), 0.5).unwrap();
    c.pan_by(20.0, 0.0).unwrap();
    assert_eq!(c.rescale_passes(), 3);
    assert_eq!(c.scale_factors(), (20.0, 20.0));
    match c.node(id) {
        Some(Primitive::Marker(m)) => assert_eq!(m.inverse_scale().sx, 20.0),
        other => panic!("unexpected {other:?}"),
    }
    // a rejected zoom leaves everything as it was
    assert!(c.zoom_at(Point::new(5.0, 5.0), 0.0).is_err());
    assert_eq!(c.rescale_passes(), 3);
}
