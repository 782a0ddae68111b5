// File: crates/axes-core/src/config.rs
// Summary: Serde-backed chart configuration (surface size, per-axis options, theme, title).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::axis::AxisOptions;
use crate::error::{LayoutError, Result};
use crate::geometry::Size;

pub const WIDTH: f64 = 800.0;
pub const HEIGHT: f64 = 500.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub width: f64,
    pub height: f64,
    /// Font size of the title and the series key.
    pub font_size: f64,
    /// Radius in pixels of per-point markers; 0 hides them.
    pub marker_radius: f64,
    pub line_width: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT, font_size: 14.0, marker_radius: 3.0, line_width: 2.0 }
    }
}

impl RenderOptions {
    pub fn surface(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Everything needed to lay out a chart, loadable from JSON. Missing fields take defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub render: RenderOptions,
    pub x_axis: AxisOptions,
    pub y_axis: AxisOptions,
    pub x_label: String,
    pub y_label: String,
    pub theme: String,
    pub title: Option<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            // Line charts keep the minor grid off so major lines stay readable.
            x_axis: AxisOptions::default().with_grid(true, false),
            y_axis: AxisOptions::default().with_grid(true, false),
            x_label: String::new(),
            y_label: String::new(),
            theme: "light".to_string(),
            title: None,
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    fn validate(&self) -> Result<()> {
        let r = &self.render;
        if !(r.width > 0.0 && r.height > 0.0 && r.width.is_finite() && r.height.is_finite()) {
            return Err(LayoutError::InvalidSurface { width: r.width, height: r.height });
        }
        for (name, axis) in [("x_axis", &self.x_axis), ("y_axis", &self.y_axis)] {
            if !(axis.font_size > 0.0 && axis.font_size.is_finite()) {
                return Err(LayoutError::Config { message: format!("{name}.font_size must be positive") });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let c = ChartConfig::from_json_str(r#"{"render": {"width": 640}, "y_axis": {"min_divisions": 8}}"#).unwrap();
        assert_eq!(c.render.width, 640.0);
        assert_eq!(c.render.height, HEIGHT);
        assert_eq!(c.y_axis.min_divisions, 8);
        assert!(c.y_axis.show_scale);
        assert_eq!(c.theme, "light");
    }

    #[test]
    fn saved_config_loads_back() {
        let c = ChartConfig::default().with_title("t").with_labels("x", "y");
        let json = c.to_json_string().unwrap();
        assert!(json.contains("\"show_minor_grid\": false"));
        assert_eq!(ChartConfig::from_json_str(&json).unwrap(), c);
    }

    #[test]
    fn rejects_bad_surface() {
        let err = ChartConfig::from_json_str(r#"{"render": {"height": 0}}"#).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidSurface { .. }));
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(ChartConfig::from_json_str("{"), Err(LayoutError::Config { .. })));
    }
}
