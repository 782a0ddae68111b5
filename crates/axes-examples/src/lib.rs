// File: crates/axes-examples/src/lib.rs
// Summary: Shared output helper for the example binaries.

use std::path::PathBuf;

use anyhow::Result;
use axes_core::{Chart, ChartConfig};

/// Config from the first CLI argument (a JSON file) or defaults.
pub fn config_from_args() -> Result<ChartConfig> {
    match std::env::args().nth(1) {
        Some(path) => Ok(ChartConfig::from_path(path)?),
        None => Ok(ChartConfig::default()),
    }
}

/// Write `target/out/<stem>.svg`, plus a PNG when built with `png`.
pub fn write_outputs(chart: &Chart, stem: &str) -> Result<()> {
    let svg = PathBuf::from(format!("target/out/{stem}.svg"));
    chart.render_to_svg(&svg)?;
    println!("Wrote {}", svg.display());

    #[cfg(feature = "png")]
    {
        let png = PathBuf::from(format!("target/out/{stem}.png"));
        let canvas = chart.layout()?;
        axes_render_skia::SkiaRasterizer::for_chart(chart).render_to_png(&canvas, &png)?;
        println!("Wrote {}", png.display());
    }
    Ok(())
}
