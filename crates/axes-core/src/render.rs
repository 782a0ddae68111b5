// File: crates/axes-core/src/render.rs
// Summary: Axis rendering: turns a pair of axes into line/text primitives on an `AxesCanvas`.
// Notes:
// - Draw order: window from the axis ranges → placements → primitives → attach → fit.
// - Tick and arrow lengths are fixed in pixels and converted to data units with the factor
//   of the direction they extend in.

use crate::axis::{Axis, Direction};
use crate::canvas::AxesCanvas;
use crate::error::Result;
use crate::geometry::{approx_eq, Point, Rect};
use crate::grid::without;
use crate::primitive::{Group, Line, Primitive, StrokeStyle, Text, TextAnchor};
use crate::view::ViewBox;

/// Major tick length in pixels for a 12px font; scales linearly with the font size.
pub const BASE_TICK_PX: f64 = 10.0;

pub fn tick_pixels(font_size: f64) -> f64 {
    BASE_TICK_PX * font_size / 12.0
}

/// Where the axis line sits on the opposite axis: 0 when that range straddles 0, otherwise
/// the end nearest 0.
pub fn crossing(other_min: f64, other_max: f64) -> f64 {
    if other_min > 0.0 {
        other_min
    } else if other_max < 0.0 {
        other_max
    } else {
        0.0
    }
}

/// Renderer-derived geometry for one axis, computed once per draw pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisPlacement {
    /// Coordinate on the opposite axis where this axis line is drawn.
    pub position: f64,
    /// Major tick length in data units of the opposite direction.
    pub tick_length: f64,
    /// Arrowhead length in data units along this axis.
    pub arrow_length: f64,
}

impl AxisPlacement {
    pub fn derive(direction: Direction, axis: &Axis, other: &Axis, view: &ViewBox) -> Self {
        let (along, across) = factors(direction, view);
        let px = tick_pixels(axis.font_size());
        Self { position: crossing(other.min(), other.max()), tick_length: px / across, arrow_length: px / along }
    }
}

/// Placements of both axes after a draw pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxesPlacement {
    pub x: AxisPlacement,
    pub y: AxisPlacement,
}

/// `(factor along the axis, factor across it)`.
fn factors(direction: Direction, view: &ViewBox) -> (f64, f64) {
    let (sx, sy) = view.scale_factors();
    match direction {
        Direction::X => (sx, sy),
        Direction::Y => (sy, sx),
    }
}

/// Point `along` this axis and `across` it.
fn at(direction: Direction, along: f64, across: f64) -> Point {
    match direction {
        Direction::X => Point::new(along, across),
        Direction::Y => Point::new(across, along),
    }
}

pub struct AxisRenderer;

impl AxisRenderer {
    /// Primitives for one axis, or `None` when the axis is hidden or either range is degenerate.
    pub fn render(
        direction: Direction,
        axis: &Axis,
        placement: &AxisPlacement,
        other: &Axis,
        other_placement: &AxisPlacement,
        view: &ViewBox,
    ) -> Option<Group> {
        if axis.is_degenerate() || other.is_degenerate() {
            tracing::debug!(%direction, "degenerate range; axis not drawn");
            return None;
        }
        let opts = axis.options();
        if !opts.show_axis {
            return None;
        }

        let (along, across) = factors(direction, view);
        let (min, max) = (axis.min(), axis.max());
        let pos = placement.position;
        let tick = placement.tick_length;
        let font = axis.font_size();
        let mut group = Group::new(format!("{direction}-axis"));

        group.push(Line::new(at(direction, min, pos), at(direction, max, pos)));
        if !axis.label().is_empty() {
            group.push(match direction {
                Direction::X => Text::new(
                    axis.label(),
                    Point::new(max, pos - tick - 1.5 * font / across),
                    TextAnchor::TopRight,
                    font,
                ),
                Direction::Y => Text::new(axis.label(), Point::new(pos, max), TextAnchor::BottomLeft, font),
            });
        }
        if opts.show_arrow {
            let tip = at(direction, max, pos);
            let back = max - placement.arrow_length;
            group.push(Line::new(tip, at(direction, back, pos - tick)));
            group.push(Line::new(tip, at(direction, back, pos + tick)));
        }

        let tick_px = tick * across;
        let minor_visible = axis.minor_tick_interval() * along >= tick_px / 2.0;
        if !minor_visible && (opts.show_minor_ticks || opts.show_minor_grid) {
            tracing::debug!(%direction, spacing_px = axis.minor_tick_interval() * along, "minor marks suppressed");
        }

        let tick_lines = |positions: Vec<f64>, length: f64| {
            positions
                .into_iter()
                .map(move |v| Primitive::from(Line::new(at(direction, v, pos), at(direction, v, pos - length))))
        };
        if opts.show_minor_ticks && minor_visible {
            group.extend(tick_lines(axis.minor_positions(), tick / 2.0));
        }
        if opts.show_major_ticks {
            group.extend(tick_lines(axis.major_positions(), tick));
        }

        if opts.show_scale {
            let crossing = other_placement.position;
            let omit = (other.options().show_axis && min < crossing && crossing < max).then_some(crossing);
            let step = axis.scale_interval();
            for mark in axis.scale_marks() {
                if omit.is_some_and(|o| approx_eq(mark.value, o, step)) {
                    continue;
                }
                group.push(match direction {
                    Direction::X => Text::new(mark.text, Point::new(mark.value, pos - tick), TextAnchor::TopCentre, font),
                    Direction::Y => {
                        Text::new(mark.text, Point::new(pos - tick, mark.value), TextAnchor::MiddleRight, font)
                    }
                });
            }
        }

        let grid_omit = other.options().show_axis.then_some(other_placement.position);
        let grid_lines = |positions: Vec<f64>, step: f64, style: StrokeStyle| {
            without(positions, grid_omit, step).into_iter().map(move |v| {
                Primitive::from(Line::new(at(direction, v, other.min()), at(direction, v, other.max())).styled(style))
            })
        };
        if opts.show_minor_grid && minor_visible {
            group.extend(grid_lines(axis.minor_positions(), axis.minor_tick_interval(), StrokeStyle::MinorGridDash));
        }
        if opts.show_major_grid {
            group.extend(grid_lines(axis.major_positions(), axis.major_tick_interval(), StrokeStyle::MajorGridDash));
        }

        Some(group)
    }
}

/// Draw both axes onto `canvas` and fit the view to them.
pub fn draw_axes(x: &Axis, y: &Axis, canvas: &mut AxesCanvas) -> Result<Option<AxesPlacement>> {
    draw_axes_titled(x, y, None, canvas)
}

/// [`draw_axes`] plus an optional title centred above the plot at 1.25 × the y axis font.
///
/// A degenerate axis skips the draw: it is logged, nothing is attached and `Ok(None)` comes back.
pub fn draw_axes_titled(
    x: &Axis,
    y: &Axis,
    title: Option<&str>,
    canvas: &mut AxesCanvas,
) -> Result<Option<AxesPlacement>> {
    for (direction, axis) in [(Direction::X, x), (Direction::Y, y)] {
        if let Err(err) = axis.ensure_drawable(direction) {
            tracing::debug!(%err, "skipping axes draw");
            return Ok(None);
        }
    }

    canvas.set_window(Rect::from_ltrb(x.min(), y.min(), x.max(), y.max()))?;
    let view = *canvas.view();
    let placement = AxesPlacement {
        x: AxisPlacement::derive(Direction::X, x, y, &view),
        y: AxisPlacement::derive(Direction::Y, y, x, &view),
    };

    if let Some(group) = AxisRenderer::render(Direction::X, x, &placement.x, y, &placement.y, &view) {
        canvas.attach(group);
    }
    if let Some(group) = AxisRenderer::render(Direction::Y, y, &placement.y, x, &placement.x, &view) {
        canvas.attach(group);
    }
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        let (_, sy) = view.scale_factors();
        let font = y.font_size();
        canvas.attach(Text::new(
            title,
            Point::new((x.min() + x.max()) / 2.0, y.max() + 1.5 * font / sy),
            TextAnchor::BottomCentre,
            font * 1.25,
        ));
    }

    if !canvas.nodes().is_empty() {
        canvas.fit_to_content()?;
    }
    Ok(Some(placement))
}
