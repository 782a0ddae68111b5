// File: crates/axes-core/src/theme.rs
// Summary: Light/Dark theming for axes, text and grid colours, plus the series palette.

use serde::{Deserialize, Serialize};

/// Colours are CSS strings so they drop straight into SVG attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub background: String,
    pub axis_line: String,
    pub axis_label: String,
    pub major_grid: String,
    pub minor_grid: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".into(),
            background: "#121214".into(),
            axis_line: "#b4b4be".into(),
            axis_label: "#ebebf5".into(),
            major_grid: "#3c3c46".into(),
            minor_grid: "#28282d".into(),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".into(),
            background: "#fafafc".into(),
            axis_line: "#000000".into(),
            axis_label: "#14141e".into(),
            major_grid: "#a0a0a0".into(),
            minor_grid: "#d3d3d3".into(),
        }
    }
}

/// Built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() {
        if t.name.eq_ignore_ascii_case(name) {
            return t;
        }
    }
    tracing::debug!(name, "unknown theme; using light");
    Theme::light()
}

/// Sixteen well-separated series colours: hues 135° apart, stepping saturation down every
/// six colours and nudging the hue by 22.5° once the circle has been covered three times.
pub fn default_palette() -> Vec<String> {
    (0..2160u32)
        .step_by(135)
        .map(|a| {
            let hue = (a % 360) as f64 + 22.5 * (a / 1080) as f64;
            let saturation = (3 - a / 810) * 100 / 3;
            format!("hsl({hue},{saturation}%,50%)")
        })
        .collect()
}

/// Palette colour for series `index`, cycling.
pub fn palette_colour(palette: &[String], index: usize) -> String {
    if palette.is_empty() {
        return "black".to_string();
    }
    palette[index % palette.len()].clone()
}
