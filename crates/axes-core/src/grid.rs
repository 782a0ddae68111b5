// File: crates/axes-core/src/grid.rs
// Summary: Tick/grid position helpers: every multiple of a step between two bounds.

use chrono::{Datelike, Months, NaiveDateTime, NaiveTime};

use crate::geometry::approx_eq;
use crate::time::TimeInterval;

/// Upper bound on marks per axis; protects against pathological step/range ratios.
pub const MAX_MARKS: usize = 10_000;

/// `min, min + step, …` up to and including `max` (within float tolerance).
/// Positions are computed as `min + k·step` so rounding error does not accumulate.
pub fn steps(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0 && min.is_finite() && max.is_finite()) || max < min {
        return Vec::new();
    }
    let count = ((max - min) / step + 1e-9).floor();
    if count >= MAX_MARKS as f64 {
        tracing::debug!(min, max, step, "too many marks requested; dropping them");
        return Vec::new();
    }
    let mut out: Vec<f64> = (0..=count as usize).map(|k| min + k as f64 * step).collect();
    if let Some(last) = out.last_mut() {
        if approx_eq(*last, max, step) {
            *last = max;
        }
    }
    out
}

/// Calendar analogue of [`steps`]: repeatedly adds `step` starting from `min`.
///
/// A fraction of a month divides each calendar month evenly, so marks restart on the 1st.
pub fn time_steps(min: NaiveDateTime, max: NaiveDateTime, step: &TimeInterval) -> Vec<NaiveDateTime> {
    let mut out = Vec::new();
    if !(step.magnitude.is_finite() && step.magnitude > 0.0) {
        return out;
    }
    if let Some(parts) = step.parts_per_month() {
        return month_parts(min, max, parts);
    }
    let mut t = min;
    while t <= max && out.len() < MAX_MARKS {
        out.push(t);
        match step.add_to(t) {
            Some(next) if next > t => t = next,
            _ => break,
        }
    }
    out
}

fn month_parts(min: NaiveDateTime, max: NaiveDateTime, parts: u32) -> Vec<NaiveDateTime> {
    let mut out = Vec::new();
    let Some(first) = min.date().with_day(1) else {
        return out;
    };
    let parts = parts.clamp(1, MAX_MARKS as u32) as i32;
    let mut start = first.and_time(NaiveTime::MIN);
    while start <= max {
        let Some(next) = start.checked_add_months(Months::new(1)) else {
            break;
        };
        let month = next - start;
        for k in 0..parts {
            let t = start + month * k / parts;
            if t > max || out.len() >= MAX_MARKS {
                return out;
            }
            if t >= min {
                out.push(t);
            }
        }
        start = next;
    }
    out
}

/// Drops positions equal to `omit` (the crossing of the perpendicular axis).
pub fn without(positions: Vec<f64>, omit: Option<f64>, step: f64) -> Vec<f64> {
    match omit {
        Some(o) => positions.into_iter().filter(|&v| !approx_eq(v, o, step)).collect(),
        None => positions,
    }
}
