// File: crates/axes-core/src/axis.rs
// Summary: Axis model: rounded range, scale/tick intervals and display options.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::grid::{steps, time_steps};
use crate::scale::{choose_scale, format_scale_value, round_down_to_multiple, round_up_to_multiple};
use crate::time::{
    choose_time_scale, format_instant, round_time_down, round_time_up, TimeCoordinate, TimeScaleChoice,
    TimeScaleContext,
};

/// Default target for the number of labelled divisions.
pub const DEFAULT_MIN_DIVISIONS: usize = 5;
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    X,
    Y,
}

impl Direction {
    pub fn other(self) -> Self {
        match self {
            Direction::X => Direction::Y,
            Direction::Y => Direction::X,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::X => "x",
            Direction::Y => "y",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Numeric,
    Time,
}

/// Display options for one axis. Every field has a default, so configs only name what changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptions {
    pub font_size: f64,
    pub min_divisions: usize,
    pub show_scale: bool,
    pub show_major_ticks: bool,
    pub show_minor_ticks: bool,
    pub show_major_grid: bool,
    pub show_minor_grid: bool,
    pub show_arrow: bool,
    pub show_axis: bool,
    /// Numeric axes only: replace the chosen scale interval.
    pub scale_interval: Option<f64>,
    /// Numeric axes only: replace the derived major tick spacing.
    pub major_tick_interval: Option<f64>,
    /// Numeric axes only: replace the derived minor tick spacing.
    pub minor_tick_interval: Option<f64>,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            min_divisions: DEFAULT_MIN_DIVISIONS,
            show_scale: true,
            show_major_ticks: true,
            show_minor_ticks: true,
            show_major_grid: true,
            show_minor_grid: true,
            show_arrow: false,
            show_axis: true,
            scale_interval: None,
            major_tick_interval: None,
            minor_tick_interval: None,
        }
    }
}

impl AxisOptions {
    /// Line and label only: no scale values, ticks or grid (category axes of bar charts).
    pub fn bare() -> Self {
        Self {
            show_scale: false,
            show_major_ticks: false,
            show_minor_ticks: false,
            show_major_grid: false,
            show_minor_grid: false,
            ..Self::default()
        }
    }

    pub fn with_grid(mut self, major: bool, minor: bool) -> Self {
        self.show_major_grid = major;
        self.show_minor_grid = minor;
        self
    }

    pub fn with_arrow(mut self) -> Self {
        self.show_arrow = true;
        self
    }
}

/// A labelled value on the scale.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleMark {
    pub value: f64,
    pub text: String,
}

#[derive(Clone, Debug)]
enum Range {
    Numeric { min: f64, max: f64, scale: f64, major: f64, minor: f64 },
    Time { min: TimeCoordinate, max: TimeCoordinate, choice: TimeScaleChoice, context: TimeScaleContext },
}

/// One dimension of a chart. Built once from a raw range; never re-derives its ticks.
#[derive(Clone, Debug)]
pub struct Axis {
    label: String,
    options: AxisOptions,
    range: Range,
}

impl Axis {
    /// Numeric axis whose bounds are snapped outward to the chosen scale interval.
    /// A zero-width range is kept as is and reported by [`is_degenerate`](Self::is_degenerate).
    pub fn numeric(min: f64, max: f64, label: impl Into<String>, options: AxisOptions) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let choice = choose_scale(min, max, options.min_divisions);
        let scale = options.scale_interval.filter(|s| *s > 0.0).unwrap_or(choice.interval);
        let major = options
            .major_tick_interval
            .filter(|s| *s > 0.0)
            .unwrap_or(scale / choice.major_divisor as f64);
        let minor = options
            .minor_tick_interval
            .filter(|s| *s > 0.0)
            .unwrap_or(scale / choice.minor_divisor as f64);

        let (min, max) = if max > min && (max - min).is_finite() {
            (round_down_to_multiple(min, scale), round_up_to_multiple(max, scale))
        } else {
            tracing::debug!(min, max, "degenerate numeric range; axis left unscaled");
            (min, max)
        };
        Self { label: label.into(), options, range: Range::Numeric { min, max, scale, major, minor } }
    }

    /// Time axis snapped outward to calendar boundaries of the chosen interval.
    pub fn time(
        min: NaiveDateTime,
        max: NaiveDateTime,
        label: impl Into<String>,
        options: AxisOptions,
        context: &TimeScaleContext,
    ) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let choice = choose_time_scale(min, max, options.min_divisions);
        let raw_min = context.coordinate_with_format(min, &choice.scale.format);
        let raw_max = context.coordinate_with_format(max, &choice.scale.format);
        let (min, max) = if max > min {
            let lo = round_time_down(context, &raw_min, &choice.scale);
            let hi = round_time_up(context, &raw_max, &choice.scale);
            match (lo, hi) {
                (Ok(lo), Ok(hi)) => (lo, hi),
                _ => {
                    tracing::warn!("time axis bounds could not be rounded; using raw range");
                    (raw_min, raw_max)
                }
            }
        } else {
            (raw_min, raw_max)
        };
        Self {
            label: label.into(),
            options,
            range: Range::Time { min, max, choice, context: context.clone() },
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &AxisOptions {
        &self.options
    }

    pub fn font_size(&self) -> f64 {
        self.options.font_size
    }

    pub fn kind(&self) -> AxisKind {
        match self.range {
            Range::Numeric { .. } => AxisKind::Numeric,
            Range::Time { .. } => AxisKind::Time,
        }
    }

    /// Lower bound in data space (projected value for time axes).
    pub fn min(&self) -> f64 {
        match &self.range {
            Range::Numeric { min, .. } => *min,
            Range::Time { min, .. } => min.as_float(),
        }
    }

    pub fn max(&self) -> f64 {
        match &self.range {
            Range::Numeric { max, .. } => *max,
            Range::Time { max, .. } => max.as_float(),
        }
    }

    pub fn span(&self) -> f64 {
        self.max() - self.min()
    }

    /// True when there is nothing to draw: `min ≥ max` or a non-finite bound.
    pub fn is_degenerate(&self) -> bool {
        let (lo, hi) = (self.min(), self.max());
        !(lo.is_finite() && hi.is_finite() && hi > lo)
    }

    /// Reports a degenerate axis as an error, for callers that must not continue.
    pub fn ensure_drawable(&self, direction: Direction) -> Result<()> {
        if self.is_degenerate() {
            return Err(LayoutError::DegenerateRange { direction, min: self.min(), max: self.max() });
        }
        Ok(())
    }

    pub fn scale_interval(&self) -> f64 {
        match &self.range {
            Range::Numeric { scale, .. } => *scale,
            Range::Time { choice, context, .. } => choice.scale.as_float(context),
        }
    }

    pub fn major_tick_interval(&self) -> f64 {
        match &self.range {
            Range::Numeric { major, .. } => *major,
            Range::Time { choice, context, .. } => choice.major.as_float(context),
        }
    }

    pub fn minor_tick_interval(&self) -> f64 {
        match &self.range {
            Range::Numeric { minor, .. } => *minor,
            Range::Time { choice, context, .. } => choice.minor.as_float(context),
        }
    }

    /// Rounded bounds as calendar coordinates; `None` for numeric axes.
    pub fn time_bounds(&self) -> Option<(&TimeCoordinate, &TimeCoordinate)> {
        match &self.range {
            Range::Time { min, max, .. } => Some((min, max)),
            Range::Numeric { .. } => None,
        }
    }

    pub fn time_intervals(&self) -> Option<&TimeScaleChoice> {
        match &self.range {
            Range::Time { choice, .. } => Some(choice),
            Range::Numeric { .. } => None,
        }
    }

    pub fn major_positions(&self) -> Vec<f64> {
        match &self.range {
            Range::Numeric { min, max, major, .. } => steps(*min, *max, *major),
            Range::Time { min, max, choice, context } => {
                project_all(context, time_steps(min.instant(), max.instant(), &choice.major))
            }
        }
    }

    pub fn minor_positions(&self) -> Vec<f64> {
        match &self.range {
            Range::Numeric { min, max, minor, .. } => steps(*min, *max, *minor),
            Range::Time { min, max, choice, context } => {
                project_all(context, time_steps(min.instant(), max.instant(), &choice.minor))
            }
        }
    }

    /// Values labelled on the scale, with their display text.
    pub fn scale_marks(&self) -> Vec<ScaleMark> {
        match &self.range {
            Range::Numeric { min, max, scale, .. } => steps(*min, *max, *scale)
                .into_iter()
                .map(|value| ScaleMark { value, text: format_scale_value(value, *scale) })
                .collect(),
            Range::Time { min, max, choice, context } => time_steps(min.instant(), max.instant(), &choice.scale)
                .into_iter()
                .map(|t| ScaleMark { value: context.project(t), text: format_instant(t, &choice.scale.format) })
                .collect(),
        }
    }
}

fn project_all(context: &TimeScaleContext, instants: Vec<NaiveDateTime>) -> Vec<f64> {
    instants.into_iter().map(|t| context.project(t)).collect()
}

/// `(min, max)` of a dataset; an empty one is a caller error.
pub fn data_range<I: IntoIterator<Item = f64>>(values: I) -> Result<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or(LayoutError::EmptyDataset)
}
