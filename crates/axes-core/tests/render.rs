// File: crates/axes-core/tests/render.rs
// Purpose: Axis placement, crossing omission, degenerate skips and scale-invariant content.

use axes_core::{
    draw_axes, draw_axes_titled, AxesCanvas, Axis, AxisOptions, Direction, Group, LayoutError, Primitive, Rescalable,
    Size, StrokeStyle,
};

fn canvas() -> AxesCanvas {
    AxesCanvas::new(Size::new(600.0, 400.0)).unwrap()
}

fn group<'a>(canvas: &'a AxesCanvas, id: &str) -> &'a Group {
    canvas
        .nodes()
        .iter()
        .find_map(|n| match n {
            Primitive::Group(g) if g.id.as_deref() == Some(id) => Some(g),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no group {id}"))
}

fn texts(g: &Group) -> Vec<String> {
    g.children
        .iter()
        .filter_map(|c| match c {
            Primitive::Text(t) => Some(t.text.clone()),
            _ => None,
        })
        .collect()
}

fn grid_positions(g: &Group, style: StrokeStyle) -> Vec<f64> {
    g.children
        .iter()
        .filter_map(|c| match c {
            Primitive::Line(l) if l.style == style => Some(l.from.x),
            _ => None,
        })
        .collect()
}

#[test]
fn axis_sits_at_zero_or_nearest_end() {
    let x = Axis::numeric(-5.0, 5.0, "", AxisOptions::default());
    let y = Axis::numeric(2.0, 8.0, "", AxisOptions::default());
    let p = draw_axes(&x, &y, &mut canvas()).unwrap().unwrap();
    assert_eq!(p.x.position, 2.0);
    assert_eq!(p.y.position, 0.0);

    let y = Axis::numeric(-8.0, -2.0, "", AxisOptions::default());
    let p = draw_axes(&x, &y, &mut canvas()).unwrap().unwrap();
    assert_eq!(p.x.position, -2.0);
}

#[test]
fn crossing_label_omitted_only_inside_range() {
    let both = Axis::numeric(-4.0, 4.0, "", AxisOptions::default());
    let mut c = canvas();
    draw_axes(&both, &both, &mut c).unwrap();
    assert_eq!(texts(group(&c, "x-axis")), ["-4", "-2", "2", "4"]);
    assert_eq!(texts(group(&c, "y-axis")), ["-4", "-2", "2", "4"]);

    // the y axis sits on x = 0, which is the end of the x range
    let x = Axis::numeric(0.0, 4.0, "", AxisOptions::default());
    let mut c = canvas();
    draw_axes(&x, &both, &mut c).unwrap();
    assert_eq!(texts(group(&c, "x-axis"))[0], "0");
}

#[test]
fn crossing_kept_when_other_axis_hidden() {
    let x = Axis::numeric(-4.0, 4.0, "", AxisOptions::default());
    let hidden = AxisOptions { show_axis: false, ..AxisOptions::default() };
    let y = Axis::numeric(-4.0, 4.0, "", hidden);
    let mut c = canvas();
    draw_axes(&x, &y, &mut c).unwrap();
    assert!(texts(group(&c, "x-axis")).contains(&"0".to_string()));
    assert!(grid_positions(group(&c, "x-axis"), StrokeStyle::MajorGridDash).contains(&0.0));
    assert!(c.nodes().iter().all(|n| !matches!(n, Primitive::Group(g) if g.id.as_deref() == Some("y-axis"))));
}

#[test]
fn gridlines_skip_the_other_axis() {
    let x = Axis::numeric(-4.0, 4.0, "", AxisOptions::default());
    let y = Axis::numeric(0.0, 10.0, "", AxisOptions::default());
    let mut c = canvas();
    draw_axes(&x, &y, &mut c).unwrap();
    let majors = grid_positions(group(&c, "x-axis"), StrokeStyle::MajorGridDash);
    assert!(!majors.contains(&0.0));
    assert_eq!(majors, [-4.0, -3.0, -2.0, -1.0, 1.0, 2.0, 3.0, 4.0]);
    assert!(!grid_positions(group(&c, "x-axis"), StrokeStyle::MinorGridDash).is_empty());
}

#[test]
fn degenerate_range_skips_draw() {
    let x = Axis::numeric(1.0, 1.0, "", AxisOptions::default());
    let y = Axis::numeric(0.0, 10.0, "", AxisOptions::default());
    let mut c = canvas();
    assert!(draw_axes(&x, &y, &mut c).unwrap().is_none());
    assert!(matches!(x.ensure_drawable(Direction::X), Err(LayoutError::DegenerateRange { .. })));
    assert!(c.nodes().is_empty());
    assert_eq!(c.rescale_passes(), 0);
}

#[test]
fn text_is_rescaled_to_final_window() {
    let x = Axis::numeric(0.0, 100.0, "x", AxisOptions::default().with_arrow());
    let y = Axis::numeric(0.0, 1.0, "y", AxisOptions::default());
    let mut c = canvas();
    draw_axes_titled(&x, &y, Some("Title"), &mut c).unwrap();
    let (sx, sy) = c.scale_factors();
    let mut seen = 0;
    let mut check = |p: &Primitive| {
        if let Primitive::Text(t) = p {
            let s = t.inverse_scale();
            assert_eq!((s.sx, s.sy), (sx, sy), "{}", t.text);
            seen += 1;
        }
    };
    for node in c.nodes() {
        match node {
            Primitive::Group(g) => g.children.iter().for_each(&mut check),
            other => check(other),
        }
    }
    assert_eq!(seen, c.rescalable_count());
    // window was set for the axes, then once more by the fit
    assert_eq!(c.rescale_passes(), 2);
}

#[test]
fn arrow_adds_two_strokes() {
    let plain = Axis::numeric(0.0, 10.0, "", AxisOptions::bare());
    let arrowed = Axis::numeric(0.0, 10.0, "", AxisOptions::bare().with_arrow());
    let mut a = canvas();
    let mut b = canvas();
    draw_axes(&plain, &plain, &mut a).unwrap();
    draw_axes(&arrowed, &plain, &mut b).unwrap();
    assert_eq!(group(&a, "x-axis").children.len(), 1);
    assert_eq!(group(&b, "x-axis").children.len(), 3);
}
