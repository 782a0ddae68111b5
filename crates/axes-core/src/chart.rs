// File: crates/axes-core/src/chart.rs
// Summary: Line chart composition: axes from the data range, one polyline per series,
// point markers with tooltips and a key to the right of the plot; SVG output.

use std::cell::OnceCell;
use std::path::Path;

use chrono::Duration;

use crate::axis::{data_range, Axis};
use crate::canvas::AxesCanvas;
use crate::config::ChartConfig;
use crate::error::{LayoutError, Result};
use crate::geometry::Point;
use crate::primitive::{Group, Line, Marker, Polyline, Text, TextAnchor};
use crate::render::draw_axes_titled;
use crate::series::LineSeries;
use crate::svg::SvgWriter;
use crate::theme::{self, default_palette, palette_colour, Theme};
use crate::time::TimeScaleContext;

/// Width in pixels of the sample line drawn in the key.
pub const KEY_SAMPLE_PX: f64 = 20.0;

/// Half-width given to a numeric data range whose values are all equal.
pub const FLAT_RANGE_PAD: f64 = 0.5;

pub struct Chart {
    pub config: ChartConfig,
    series: Vec<LineSeries>,
    palette: Vec<String>,
    /// Projection of every time coordinate; fixed by the first time series added.
    time_context: OnceCell<TimeScaleContext>,
}

impl Chart {
    pub fn new(config: ChartConfig) -> Self {
        Self { config, series: Vec::new(), palette: default_palette(), time_context: OnceCell::new() }
    }

    pub fn with_palette(mut self, palette: Vec<String>) -> Self {
        self.palette = palette;
        self
    }

    pub fn series(&self) -> &[LineSeries] {
        &self.series
    }

    pub fn time_context(&self) -> Option<&TimeScaleContext> {
        self.time_context.get()
    }

    /// Add a series. Empty series are rejected, as is mixing time and numeric x values.
    pub fn add_series(&mut self, series: LineSeries) -> Result<()> {
        if series.is_empty() {
            return Err(LayoutError::EmptyDataset);
        }
        if let Some(first) = self.series.first() {
            if first.is_time() != series.is_time() {
                return Err(LayoutError::Config {
                    message: format!("series '{}' mixes time and numeric x values", series.name),
                });
            }
        }
        if series.is_time() && self.time_context.get().is_none() {
            let ctx = TimeScaleContext::from_instants(series.instants())?;
            tracing::trace!(start = ctx.start, scale = ctx.scale, "fixed time context");
            let _ = self.time_context.set(ctx);
        }
        self.series.push(series);
        Ok(())
    }

    fn theme(&self) -> Theme {
        theme::find(&self.config.theme)
    }

    fn colour(&self, index: usize) -> String {
        self.series[index].colour.clone().unwrap_or_else(|| palette_colour(&self.palette, index))
    }

    /// Axes covering every series: numeric x, or time x through the chart's context.
    ///
    /// Flat data is widened by [`FLAT_RANGE_PAD`] (an hour either side for time) so a constant
    /// series still gets drawable axes.
    pub fn axes(&self) -> Result<(Axis, Axis)> {
        let ys = widen_flat(data_range(self.series.iter().flat_map(|s| s.y_values()))?);
        let y = Axis::numeric(ys.0, ys.1, self.config.y_label.clone(), self.config.y_axis.clone());
        let x = match self.time_context.get() {
            Some(ctx) => {
                let instants: Vec<_> = self.series.iter().flat_map(|s| s.instants()).collect();
                let mut lo = instants.iter().min().copied().ok_or(LayoutError::EmptyDataset)?;
                let mut hi = instants.iter().max().copied().ok_or(LayoutError::EmptyDataset)?;
                if lo == hi {
                    tracing::debug!(%lo, "widening flat time range");
                    lo -= Duration::hours(1);
                    hi += Duration::hours(1);
                }
                Axis::time(lo, hi, self.config.x_label.clone(), self.config.x_axis.clone(), ctx)
            }
            None => {
                let mut xs = Vec::new();
                for s in &self.series {
                    xs.extend(s.projected(None)?.into_iter().map(|p| p.x));
                }
                let (lo, hi) = widen_flat(data_range(xs)?);
                Axis::numeric(lo, hi, self.config.x_label.clone(), self.config.x_axis.clone())
            }
        };
        Ok((x, y))
    }

    /// Full layout pass: axes, series, key, then a pinned best fit.
    pub fn layout(&self) -> Result<AxesCanvas> {
        let (x_axis, y_axis) = self.axes()?;
        let mut canvas = AxesCanvas::new(self.config.render.surface())?;
        draw_axes_titled(&x_axis, &y_axis, self.config.title.as_deref(), &mut canvas)?;

        let ctx = self.time_context.get();
        let render = &self.config.render;
        let mut key_entries = Vec::with_capacity(self.series.len());
        for (i, series) in self.series.iter().enumerate() {
            let colour = self.colour(i);
            let points = series.projected(ctx)?;
            let mut group = Group::new(format!("series-{i}"));
            group.push(Polyline::new(points.clone(), colour.clone(), render.line_width));
            if render.marker_radius > 0.0 {
                for (p, tip) in points.iter().zip(series.tooltips(ctx)) {
                    let mut marker = Marker::new(*p, colour.clone()).with_tooltip(tip);
                    marker.radius = render.marker_radius;
                    group.push(marker);
                }
            }
            canvas.attach(group);
            if let Some(last) = points.last() {
                key_entries.push((last.y, series.name.clone(), colour));
            }
        }

        if self.series.len() > 1 {
            self.attach_key(&mut canvas, &x_axis, &y_axis, key_entries);
        }
        let fit = canvas.fit_to_content()?;
        canvas.pin_best_fit(fit);
        Ok(canvas)
    }

    /// Key entries ordered by each series' final value, highest first, so labels roughly line
    /// up with the line ends.
    fn attach_key(&self, canvas: &mut AxesCanvas, x: &Axis, y: &Axis, mut entries: Vec<(f64, String, String)>) {
        let (sx, sy) = canvas.scale_factors();
        let font = self.config.render.font_size;
        let sample = KEY_SAMPLE_PX / sx;
        let step = font * 2.0 / sy;
        entries.sort_by(|a, b| b.0.total_cmp(&a.0));
        let mut at = Point::new(x.max() + sample, y.max());
        let mut key = Group::new("key");
        for (_, name, colour) in entries {
            key.push(Line::new(at, at.offset(sample, 0.0)).coloured(colour, 2.0));
            key.push(Text::new(name, at.offset(sample * 1.25, 0.0), TextAnchor::MiddleLeft, font));
            at = at.offset(0.0, -step);
        }
        canvas.attach(key);
    }

    pub fn to_svg(&self) -> Result<String> {
        let canvas = self.layout()?;
        Ok(SvgWriter::new(&self.theme()).write(&canvas))
    }

    /// Lay out and write the chart as an SVG file, creating parent directories.
    pub fn render_to_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        let svg = self.to_svg()?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, svg)?;
        Ok(())
    }
}

fn widen_flat((lo, hi): (f64, f64)) -> (f64, f64) {
    if lo < hi {
        return (lo, hi);
    }
    tracing::debug!(value = lo, "widening flat data range");
    (lo - FLAT_RANGE_PAD, hi + FLAT_RANGE_PAD)
}
