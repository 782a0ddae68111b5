// File: crates/axes-core/tests/time_scale.rs
// Purpose: Calendar rounding properties and the ten-hour time axis fixture.

use axes_core::time::{ceil_instant, choose_time_scale, floor_instant, round_time_down, round_time_up};
use axes_core::{
    draw_axes, AxesCanvas, Axis, AxisOptions, Primitive, Size, TimeInterval, TimeScaleContext, TimeUnit,
};
use chrono::{NaiveDate, NaiveDateTime};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
}

fn intervals() -> Vec<TimeInterval> {
    let mut out = Vec::new();
    for unit in TimeUnit::ALL {
        for &step in unit.ladder() {
            out.push(TimeInterval::new(step as f64, unit));
        }
    }
    out
}

#[test]
fn round_up_is_aligned_or_one_interval_later() {
    let ctx = TimeScaleContext::default();
    let instants = [
        at(2024, 1, 1, 0, 0, 0),
        at(2024, 2, 29, 23, 59, 59),
        at(2023, 7, 14, 9, 30, 0),
        at(1999, 12, 31, 12, 0, 1),
        at(2021, 3, 7, 0, 0, 0),
    ];
    for interval in intervals() {
        for &t in &instants {
            let coord = ctx.coordinate(t);
            let down = round_time_down(&ctx, &coord, &interval).unwrap();
            let up = round_time_up(&ctx, &coord, &interval).unwrap();
            assert!(down.instant() <= t, "{interval}: {t} floored to {}", down.instant());
            if down.instant() == t {
                assert_eq!(up.instant(), t, "{interval}: aligned {t} moved");
            } else {
                assert_eq!(Some(up.instant()), interval.add_to(down.instant()), "{interval}: {t}");
                assert!(up.instant() >= t);
            }
            // an aligned instant is a fixed point of both
            assert_eq!(ceil_instant(down.instant(), &interval), Some(down.instant()));
            assert_eq!(floor_instant(down.instant(), &interval), Some(down.instant()));
        }
    }
}

#[test]
fn rounding_resets_finer_fields() {
    let t = at(2024, 8, 17, 13, 47, 29);
    assert_eq!(floor_instant(t, &TimeInterval::new(1.0, TimeUnit::Year)), Some(at(2024, 1, 1, 0, 0, 0)));
    assert_eq!(floor_instant(t, &TimeInterval::new(5.0, TimeUnit::Year)), Some(at(2020, 1, 1, 0, 0, 0)));
    assert_eq!(floor_instant(t, &TimeInterval::new(6.0, TimeUnit::Month)), Some(at(2024, 7, 1, 0, 0, 0)));
    assert_eq!(floor_instant(t, &TimeInterval::new(7.0, TimeUnit::Day)), Some(at(2024, 8, 14, 0, 0, 0)));
    assert_eq!(floor_instant(t, &TimeInterval::new(5.0, TimeUnit::Hour)), Some(at(2024, 8, 17, 10, 0, 0)));
    assert_eq!(floor_instant(t, &TimeInterval::new(15.0, TimeUnit::Minute)), Some(at(2024, 8, 17, 13, 45, 0)));
    // day-of-month never drops to zero
    assert_eq!(floor_instant(at(2024, 8, 3, 0, 0, 0), &TimeInterval::new(7.0, TimeUnit::Day)), Some(at(2024, 8, 1, 0, 0, 0)));
}

#[test]
fn formats_follow_granularity() {
    assert_eq!(TimeInterval::new(6.0, TimeUnit::Hour).format, "%H:%M\n%d/%m");
    assert_eq!(TimeInterval::new(2.0, TimeUnit::Hour).format, "%H:%M");
    assert_eq!(TimeInterval::new(28.0, TimeUnit::Day).format, "%b %Y");
    assert_eq!(TimeInterval::new(1.0, TimeUnit::Second).format, "%H:%M:%S");
}

#[test]
fn context_is_hour_scaled_and_positive() {
    let (t0, t1) = (at(2024, 1, 1, 0, 0, 0), at(2024, 1, 1, 10, 0, 0));
    let ctx = TimeScaleContext::from_range(t0, t1);
    assert_eq!(ctx.scale, 10.0);
    assert_eq!(ctx.default_format, "%H:%M");
    assert_eq!(ctx.project(t0), 3600.0);
    assert_eq!(ctx.project(t1), 7200.0);
}

fn ten_hour_axes() -> (Axis, Axis) {
    let (t0, t1) = (at(2024, 1, 1, 0, 0, 0), at(2024, 1, 1, 10, 0, 0));
    let ctx = TimeScaleContext::from_range(t0, t1);
    let x = Axis::time(t0, t1, "time", AxisOptions::default(), &ctx);
    let y = Axis::numeric(0.0, 10.0, "value", AxisOptions::default());
    (x, y)
}

/// Vertical lines in the x axis group that are `length` long.
fn x_ticks(canvas: &AxesCanvas, length: f64) -> usize {
    let group = canvas.nodes().iter().find_map(|n| match n {
        Primitive::Group(g) if g.id.as_deref() == Some("x-axis") => Some(g),
        _ => None,
    });
    group
        .map(|g| {
            g.children
                .iter()
                .filter(|c| match c {
                    Primitive::Line(l) => l.from.x == l.to.x && ((l.from.y - l.to.y).abs() - length).abs() < 1e-9,
                    _ => false,
                })
                .count()
        })
        .unwrap_or(0)
}

#[test]
fn ten_hours_in_five_divisions_is_hourly() {
    let c = choose_time_scale(at(2024, 1, 1, 0, 0, 0), at(2024, 1, 1, 10, 0, 0), 5);
    assert_eq!(c.scale, TimeInterval::new(5.0, TimeUnit::Hour));
    assert_eq!(c.major.magnitude, 5.0);
    assert_eq!(c.minor, TimeInterval::new(1.0, TimeUnit::Hour));

    let (x, _) = ten_hour_axes();
    let (lo, hi) = x.time_bounds().unwrap();
    assert_eq!((lo.instant(), hi.instant()), (at(2024, 1, 1, 0, 0, 0), at(2024, 1, 1, 10, 0, 0)));
    let labels: Vec<String> = x.scale_marks().into_iter().map(|m| m.text).collect();
    assert_eq!(labels, ["00:00", "05:00", "10:00"]);
}

#[test]
fn minor_ticks_depend_on_zoom() {
    let (x, y) = ten_hour_axes();

    // 800px for ten hours: 80px between hourly minor ticks
    let mut wide = AxesCanvas::new(Size::new(800.0, 500.0)).unwrap();
    let placement = draw_axes(&x, &y, &mut wide).unwrap().unwrap();
    assert_eq!(x_ticks(&wide, placement.x.tick_length / 2.0), 11);
    assert_eq!(x_ticks(&wide, placement.x.tick_length), 3);

    // 40px for ten hours: 4px apart, under half the 10px tick
    let mut narrow = AxesCanvas::new(Size::new(40.0, 500.0)).unwrap();
    let placement = draw_axes(&x, &y, &mut narrow).unwrap().unwrap();
    assert_eq!(x_ticks(&narrow, placement.x.tick_length / 2.0), 0);
    assert_eq!(x_ticks(&narrow, placement.x.tick_length), 3);
}
