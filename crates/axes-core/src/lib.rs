// File: crates/axes-core/src/lib.rs
// Summary: Core library entry point; exports the axis scaling, layout and SVG output API.

pub mod axis;
pub mod canvas;
pub mod chart;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod primitive;
pub mod render;
pub mod scale;
pub mod series;
pub mod svg;
pub mod text;
pub mod theme;
pub mod time;
pub mod view;

pub use axis::{data_range, Axis, AxisKind, AxisOptions, Direction, ScaleMark};
pub use canvas::{AxesCanvas, NodeId};
pub use chart::Chart;
pub use config::{ChartConfig, RenderOptions};
pub use error::{LayoutError, Result};
pub use geometry::{Point, Rect, Size};
pub use primitive::{Group, Line, Marker, Polyline, Primitive, RectShape, Rescalable, Sector, StrokeStyle, Text, TextAnchor};
pub use render::{draw_axes, draw_axes_titled, AxesPlacement, AxisPlacement, AxisRenderer};
pub use scale::{choose_scale, ScaleChoice};
pub use series::{LineSeries, SeriesData};
pub use svg::SvgWriter;
pub use theme::Theme;
pub use time::{choose_time_scale, TimeCoordinate, TimeInterval, TimeScaleChoice, TimeScaleContext, TimeUnit};
pub use view::ViewBox;
