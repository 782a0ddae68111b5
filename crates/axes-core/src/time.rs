// File: crates/axes-core/src/time.rs
// Summary: Calendar-aware scale intervals, time coordinates and their per-chart projection.
// Notes:
// - Every coordinate of a chart is projected through one `TimeScaleContext`; the chart
//   creates it once from the first observed range and never changes it afterwards.
// - Month and year steps are calendar steps (Jan 31 + 1 month = Feb 28/29); finer units
//   and fractional months use their nominal length in seconds.

use std::cmp::Ordering;
use std::fmt::{self, Write as _};

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Format used when the chart has not chosen one.
pub const DEFAULT_FORMAT: &str = "%d/%m/%y %H:%M";
const MONTH_FORMAT: &str = "%b %Y";
const DAY_HOUR_FORMAT: &str = "%H:%M\n%d/%m";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 6] = [
        TimeUnit::Year,
        TimeUnit::Month,
        TimeUnit::Day,
        TimeUnit::Hour,
        TimeUnit::Minute,
        TimeUnit::Second,
    ];

    /// Position from coarsest (year = 0) to finest (second = 5).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn coarser(self) -> Option<TimeUnit> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    /// How many of `self` make up one of the next coarser unit.
    fn per_coarser(self) -> f64 {
        match self {
            TimeUnit::Year => 1.0,
            TimeUnit::Month => 12.0,
            TimeUnit::Day => 30.0,
            TimeUnit::Hour => 24.0,
            TimeUnit::Minute | TimeUnit::Second => 60.0,
        }
    }

    /// Nominal length; a month counts as 30 days and a year as 12 such months.
    pub fn nominal_seconds(self) -> f64 {
        match self {
            TimeUnit::Second => 1.0,
            TimeUnit::Minute => 60.0,
            TimeUnit::Hour => 3_600.0,
            TimeUnit::Day => 86_400.0,
            TimeUnit::Month => 30.0 * 86_400.0,
            TimeUnit::Year => 360.0 * 86_400.0,
        }
    }

    /// Allowed scale steps for this unit, ascending.
    pub fn ladder(self) -> &'static [u32] {
        match self {
            TimeUnit::Year => &[1, 2, 5, 10, 20, 50, 100],
            TimeUnit::Month => &[1, 2, 3, 4, 6, 12],
            TimeUnit::Day => &[1, 2, 7, 14, 28, 91, 364],
            TimeUnit::Hour | TimeUnit::Minute | TimeUnit::Second => &[1, 2, 5, 10, 15, 30],
        }
    }

    /// `(major, minor)` divisors for a ladder step. Steps outside the ladder fall back to (1, 1).
    pub fn divisors(self, step: u32) -> (u32, u32) {
        match (self, step) {
            (TimeUnit::Year, 1) => (1, 4),
            (TimeUnit::Year, 2) => (2, 4),
            (TimeUnit::Year, 5) => (1, 5),
            (TimeUnit::Year, 10) => (2, 10),
            (TimeUnit::Year, 20) => (2, 4),
            (TimeUnit::Year, 50) => (1, 5),
            (TimeUnit::Year, 100) => (2, 10),

            (TimeUnit::Month, 1 | 2) => (2, 6),
            (TimeUnit::Month, 3) => (3, 6),
            (TimeUnit::Month, 4) => (4, 8),
            (TimeUnit::Month, 6) => (6, 12),
            (TimeUnit::Month, 12) => (3, 12),

            (TimeUnit::Day, 1 | 2) => (2, 6),
            (TimeUnit::Day, 7) => (7, 14),
            (TimeUnit::Day, 14) => (2, 14),
            (TimeUnit::Day, 28) => (2, 4),
            (TimeUnit::Day, 91 | 364) => (1, 13),

            (_, 1 | 2) => (2, 6),
            (_, 5) => (1, 5),
            (_, 10) => (2, 10),
            (_, 15) => (3, 15),
            (_, 30) => (3, 6),
            _ => (1, 1),
        }
    }

    fn default_format(self) -> &'static str {
        match self {
            TimeUnit::Year => "%Y",
            TimeUnit::Month => MONTH_FORMAT,
            TimeUnit::Day => "%d/%m/%y",
            TimeUnit::Hour | TimeUnit::Minute => "%H:%M",
            TimeUnit::Second => "%H:%M:%S",
        }
    }

    fn name(self) -> &'static str {
        match self {
            TimeUnit::Year => "year",
            TimeUnit::Month => "month",
            TimeUnit::Day => "day",
            TimeUnit::Hour => "hour",
            TimeUnit::Minute => "minute",
            TimeUnit::Second => "second",
        }
    }
}

/// A calendar duration: `magnitude` of `unit`, plus the format its scale labels use.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeInterval {
    pub magnitude: f64,
    pub unit: TimeUnit,
    pub format: String,
}

impl TimeInterval {
    pub fn new(magnitude: f64, unit: TimeUnit) -> Self {
        let format = match unit {
            TimeUnit::Hour if magnitude >= 6.0 => DAY_HOUR_FORMAT,
            TimeUnit::Day if magnitude >= 28.0 => MONTH_FORMAT,
            _ => unit.default_format(),
        };
        Self { magnitude, unit, format: format.to_string() }
    }

    /// Same unit and format, magnitude multiplied by `k`.
    pub fn scaled(&self, k: f64) -> Self {
        Self { magnitude: self.magnitude * k, unit: self.unit, format: self.format.clone() }
    }

    pub fn seconds(&self) -> f64 {
        self.magnitude * self.unit.nominal_seconds()
    }

    /// Length in the projected units of `ctx`.
    pub fn as_float(&self, ctx: &TimeScaleContext) -> f64 {
        self.seconds() / ctx.scale
    }

    /// Whole calendar months, when this interval is one.
    fn whole_months(&self) -> Option<u32> {
        let months = match self.unit {
            TimeUnit::Year => self.magnitude * 12.0,
            TimeUnit::Month => self.magnitude,
            _ => return None,
        };
        (months >= 1.0 && months.fract() == 0.0 && months <= u32::MAX as f64).then(|| months as u32)
    }

    /// Equal parts each calendar month splits into, when this is a fraction of a month.
    pub fn parts_per_month(&self) -> Option<u32> {
        let months = match self.unit {
            TimeUnit::Year => self.magnitude * 12.0,
            TimeUnit::Month => self.magnitude,
            _ => return None,
        };
        (months > 0.0 && months < 1.0).then(|| (1.0 / months).round().min(u32::MAX as f64) as u32)
    }

    /// `instant + self`, or `None` when the result leaves chrono's calendar.
    pub fn add_to(&self, instant: NaiveDateTime) -> Option<NaiveDateTime> {
        if let Some(months) = self.whole_months() {
            return instant.checked_add_months(Months::new(months));
        }
        let millis = (self.seconds() * 1000.0).round();
        if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
            return None;
        }
        instant.checked_add_signed(Duration::milliseconds(millis as i64))
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.magnitude == 1.0 { "" } else { "s" };
        write!(f, "{} {}{}", self.magnitude, self.unit.name(), plural)
    }
}

/// Projection shared by all time coordinates of one chart.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeScaleContext {
    /// Timestamp (seconds) projected to 0.
    pub start: f64,
    /// Seconds per projected unit.
    pub scale: f64,
    pub default_format: String,
}

impl Default for TimeScaleContext {
    fn default() -> Self {
        Self { start: 0.0, scale: 1.0, default_format: DEFAULT_FORMAT.to_string() }
    }
}

impl TimeScaleContext {
    pub fn new(start: f64, scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        Self { start, scale, ..Self::default() }
    }

    /// Context for data spanning `first..=last`. The origin sits one span before `first`,
    /// so projected values are strictly positive, and the scale is the span in whole hours.
    pub fn from_range(first: NaiveDateTime, last: NaiveDateTime) -> Self {
        let (t0, t1) = (timestamp(first).min(timestamp(last)), timestamp(first).max(timestamp(last)));
        let hours = ((t1 - t0) / 3_600.0).round();
        let default_format = if hours < 5.0 {
            "%H:%M:%S"
        } else if hours < 24.0 {
            "%H:%M"
        } else if hours < 840.0 {
            "%d/%m %H:%M"
        } else {
            "%d/%m/%y"
        };
        Self {
            start: 2.0 * t0 - t1,
            scale: if hours > 0.0 { hours } else { 1.0 },
            default_format: default_format.to_string(),
        }
    }

    /// Context covering every instant of a dataset.
    pub fn from_instants<I: IntoIterator<Item = NaiveDateTime>>(instants: I) -> Result<Self> {
        let mut it = instants.into_iter();
        let first = it.next().ok_or(LayoutError::EmptyDataset)?;
        let (lo, hi) = it.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Ok(Self::from_range(lo, hi))
    }

    pub fn project(&self, instant: NaiveDateTime) -> f64 {
        (timestamp(instant) - self.start) / self.scale
    }

    /// Inverse of [`project`](Self::project), to the millisecond.
    pub fn instant_at(&self, value: f64) -> Option<NaiveDateTime> {
        let millis = ((value * self.scale + self.start) * 1000.0).round();
        if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
            return None;
        }
        chrono::DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.naive_utc())
    }

    pub fn coordinate(&self, instant: NaiveDateTime) -> TimeCoordinate {
        self.coordinate_with_format(instant, &self.default_format)
    }

    pub fn coordinate_with_format(&self, instant: NaiveDateTime, format: &str) -> TimeCoordinate {
        TimeCoordinate { instant, text: format_instant(instant, format), value: self.project(instant) }
    }
}

/// A calendar instant with its display text and projected value.
#[derive(Clone, Debug)]
pub struct TimeCoordinate {
    instant: NaiveDateTime,
    text: String,
    value: f64,
}

impl TimeCoordinate {
    pub fn instant(&self) -> NaiveDateTime {
        self.instant
    }

    pub fn as_float(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// `instant + interval`, labelled with the interval's format.
    pub fn checked_add(&self, interval: &TimeInterval, ctx: &TimeScaleContext) -> Option<TimeCoordinate> {
        interval.add_to(self.instant).map(|t| ctx.coordinate_with_format(t, &interval.format))
    }
}

impl PartialEq for TimeCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for TimeCoordinate {}

impl PartialOrd for TimeCoordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeCoordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl fmt::Display for TimeCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Outcome of [`choose_time_scale`]; all three intervals share one unit.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeScaleChoice {
    pub scale: TimeInterval,
    pub major: TimeInterval,
    pub minor: TimeInterval,
}

/// Pick a calendar step giving roughly `min_divisions` labelled instants between `start` and `end`.
pub fn choose_time_scale(start: NaiveDateTime, end: NaiveDateTime, min_divisions: usize) -> TimeScaleChoice {
    let span = (timestamp(end) - timestamp(start)).abs();
    if span == 0.0 {
        let unit = TimeInterval::new(1.0, TimeUnit::Second);
        return TimeScaleChoice { scale: unit.clone(), major: unit.clone(), minor: unit };
    }
    let divisions = min_divisions.max(2) - 1;

    let mut value = span / divisions as f64;
    let mut unit = TimeUnit::Second;
    // Intraday reduction never climbs past days.
    while unit.index() > TimeUnit::Day.index() {
        let next = value / unit.per_coarser();
        if next < 1.0 {
            break;
        }
        value = next;
        unit = unit.coarser().unwrap_or(TimeUnit::Day);
    }
    // A value beyond the unit's ladder moves up; days only reach months and years this way.
    while let (Some(coarser), Some(&largest)) = (unit.coarser(), unit.ladder().last()) {
        if value <= largest as f64 {
            break;
        }
        value /= unit.per_coarser();
        unit = coarser;
    }

    let ladder = unit.ladder();
    let step = ladder
        .iter()
        .copied()
        .find(|&s| value <= s as f64 + 1e-9)
        .unwrap_or(ladder[ladder.len() - 1]);
    let (major, minor) = unit.divisors(step);
    let scale = TimeInterval::new(step as f64, unit);
    tracing::trace!(span, min_divisions, %scale, "chose time scale");
    TimeScaleChoice {
        major: TimeInterval::new(step as f64 / major as f64, unit),
        minor: TimeInterval::new(step as f64 / minor as f64, unit),
        scale,
    }
}

/// Truncate `instant` to a boundary of `interval`: fields finer than its unit reset, its own
/// field floored to a multiple of the magnitude. Day-of-month and month never drop below 1.
pub fn floor_instant(instant: NaiveDateTime, interval: &TimeInterval) -> Option<NaiveDateTime> {
    let m = interval.magnitude.floor().max(1.0) as i64;
    let floor = |x: i64| x.div_euclid(m) * m;
    let (y, mo, d) = (instant.year(), instant.month(), instant.day());
    let date = |y: i32, mo: u32, d: u32| NaiveDate::from_ymd_opt(y, mo, d);
    let rounded = match interval.unit {
        TimeUnit::Year => date(floor(y as i64) as i32, 1, 1)?.and_hms_opt(0, 0, 0)?,
        TimeUnit::Month => date(y, (floor(mo as i64 - 1) + 1) as u32, 1)?.and_hms_opt(0, 0, 0)?,
        TimeUnit::Day => date(y, mo, floor(d as i64).max(1) as u32)?.and_hms_opt(0, 0, 0)?,
        TimeUnit::Hour => date(y, mo, d)?.and_hms_opt(floor(instant.hour() as i64) as u32, 0, 0)?,
        TimeUnit::Minute => {
            date(y, mo, d)?.and_hms_opt(instant.hour(), floor(instant.minute() as i64) as u32, 0)?
        }
        TimeUnit::Second => date(y, mo, d)?.and_hms_opt(
            instant.hour(),
            instant.minute(),
            floor(instant.second() as i64) as u32,
        )?,
    };
    Some(rounded)
}

/// `instant` itself when already on a boundary, else the next boundary up.
pub fn ceil_instant(instant: NaiveDateTime, interval: &TimeInterval) -> Option<NaiveDateTime> {
    let down = floor_instant(instant, interval)?;
    if down == instant { Some(down) } else { interval.add_to(down) }
}

pub fn round_time_down(
    ctx: &TimeScaleContext,
    coord: &TimeCoordinate,
    interval: &TimeInterval,
) -> Result<TimeCoordinate> {
    let t = floor_instant(coord.instant, interval).ok_or(LayoutError::TimeOutOfRange)?;
    Ok(ctx.coordinate_with_format(t, &interval.format))
}

pub fn round_time_up(
    ctx: &TimeScaleContext,
    coord: &TimeCoordinate,
    interval: &TimeInterval,
) -> Result<TimeCoordinate> {
    let t = ceil_instant(coord.instant, interval).ok_or(LayoutError::TimeOutOfRange)?;
    Ok(ctx.coordinate_with_format(t, &interval.format))
}

/// Seconds since the Unix epoch, treating naive instants as UTC.
pub fn timestamp(instant: NaiveDateTime) -> f64 {
    instant.and_utc().timestamp_millis() as f64 / 1000.0
}

/// `strftime` formatting that falls back to [`DEFAULT_FORMAT`] instead of panicking on a bad
/// user-supplied pattern.
pub fn format_instant(instant: NaiveDateTime, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", instant.format(format)).is_ok() {
        return out;
    }
    out.clear();
    let _ = write!(out, "{}", instant.format(DEFAULT_FORMAT));
    out
}
