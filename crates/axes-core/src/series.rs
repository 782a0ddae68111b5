// File: crates/axes-core/src/series.rs
// Summary: Line series model: named numeric or time-stamped points with optional colour.

use chrono::NaiveDateTime;

use crate::error::{LayoutError, Result};
use crate::geometry::Point;
use crate::scale::round_sig_figs;
use crate::time::TimeScaleContext;

/// Significant figures shown for values in point tooltips.
pub const TOOLTIP_SIG_FIGS: u32 = 4;

#[derive(Clone, Debug, PartialEq)]
pub enum SeriesData {
    Numeric(Vec<(f64, f64)>),
    Time(Vec<(NaiveDateTime, f64)>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub data: SeriesData,
    /// Overrides the palette colour.
    pub colour: Option<String>,
}

impl LineSeries {
    pub fn numeric(name: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self { name: name.into(), data: SeriesData::Numeric(points), colour: None }
    }

    pub fn time(name: impl Into<String>, points: Vec<(NaiveDateTime, f64)>) -> Self {
        Self { name: name.into(), data: SeriesData::Time(points), colour: None }
    }

    pub fn with_colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = Some(colour.into());
        self
    }

    pub fn len(&self) -> usize {
        match &self.data {
            SeriesData::Numeric(p) => p.len(),
            SeriesData::Time(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_time(&self) -> bool {
        matches!(self.data, SeriesData::Time(_))
    }

    /// Instants of a time series; empty for numeric data.
    pub fn instants(&self) -> Vec<NaiveDateTime> {
        match &self.data {
            SeriesData::Time(p) => p.iter().map(|(t, _)| *t).collect(),
            SeriesData::Numeric(_) => Vec::new(),
        }
    }

    pub fn y_values(&self) -> Vec<f64> {
        match &self.data {
            SeriesData::Numeric(p) => p.iter().map(|(_, y)| *y).collect(),
            SeriesData::Time(p) => p.iter().map(|(_, y)| *y).collect(),
        }
    }

    /// Points in data space; time stamps go through `ctx`, which a time series requires.
    pub fn projected(&self, ctx: Option<&TimeScaleContext>) -> Result<Vec<Point>> {
        match &self.data {
            SeriesData::Numeric(p) => Ok(p.iter().map(|&(x, y)| Point::new(x, y)).collect()),
            SeriesData::Time(p) => {
                let ctx = ctx.ok_or_else(|| LayoutError::Config {
                    message: format!("time series '{}' drawn without a time context", self.name),
                })?;
                Ok(p.iter().map(|&(t, y)| Point::new(ctx.project(t), y)).collect())
            }
        }
    }

    /// Tooltip text per point: the series name over the `(x, y)` pair.
    pub fn tooltips(&self, ctx: Option<&TimeScaleContext>) -> Vec<String> {
        let y = |v: f64| round_sig_figs(v, TOOLTIP_SIG_FIGS);
        match &self.data {
            SeriesData::Numeric(p) => p
                .iter()
                .map(|&(px, py)| self.tooltip(format!("({}, {})", y(px), y(py))))
                .collect(),
            SeriesData::Time(p) => p
                .iter()
                .map(|&(t, py)| {
                    let when = match ctx {
                        Some(ctx) => ctx.coordinate(t).to_string(),
                        None => t.to_string(),
                    };
                    self.tooltip(format!("({when}, {})", y(py)))
                })
                .collect(),
        }
    }

    fn tooltip(&self, coords: String) -> String {
        if self.name.is_empty() {
            coords
        } else {
            format!("{}\n{coords}", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn numeric_tooltips_round() {
        let s = LineSeries::numeric("rain", vec![(1.0, 2.345678)]);
        assert_eq!(s.tooltips(None), vec!["rain\n(1, 2.346)".to_string()]);
    }

    #[test]
    fn time_series_needs_context() {
        let t = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let s = LineSeries::time("a", vec![(t, 1.0)]);
        assert!(s.projected(None).is_err());
        let ctx = TimeScaleContext::new(0.0, 1.0);
        assert_eq!(s.projected(Some(&ctx)).unwrap()[0].x, 1_704_067_200.0);
    }
}
