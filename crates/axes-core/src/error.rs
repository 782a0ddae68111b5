// File: crates/axes-core/src/error.rs
// Summary: Layout error taxonomy shared by the scale, view and render layers.

use crate::axis::Direction;

pub type Result<T> = std::result::Result<T, LayoutError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// An axis whose rounded range has no extent. Charts may legitimately receive flat
    /// data, so callers skip the draw instead of surfacing this.
    #[error("degenerate {direction} axis range [{min}, {max}]")]
    DegenerateRange { direction: Direction, min: f64, max: f64 },

    #[error("degenerate view window {width} x {height}")]
    DegenerateWindow { width: f64, height: f64 },

    #[error("drawing surface must have a positive size, got {width} x {height}")]
    InvalidSurface { width: f64, height: f64 },

    #[error("cannot compute an axis range from an empty dataset")]
    EmptyDataset,

    #[error("nothing attached to the canvas to fit")]
    NothingToFit,

    #[error("time axis bound outside the representable calendar range")]
    TimeOutOfRange,

    #[error("invalid chart configuration: {message}")]
    Config { message: String },

    #[error("i/o error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for LayoutError {
    fn from(err: std::io::Error) -> Self {
        LayoutError::Io { message: err.to_string() }
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        LayoutError::Config { message: err.to_string() }
    }
}
