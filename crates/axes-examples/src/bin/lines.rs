// File: crates/axes-examples/src/bin/lines.rs
// Summary: Numeric line charts: a positive range and one straddling zero on both axes.

use anyhow::Result;
use axes_core::{Chart, LineSeries};
use axes_examples::{config_from_args, write_outputs};

fn main() -> Result<()> {
    let config = config_from_args()?;

    let mut chart = Chart::new(config.clone().with_title("Rainfall").with_labels("Day", "mm"));
    chart.add_series(LineSeries::numeric(
        "north",
        vec![(0.0, 0.0), (1.0, 1.2), (2.0, 0.8), (3.0, 1.8), (4.0, 1.4), (5.0, 2.0)],
    ))?;
    chart.add_series(LineSeries::numeric("south", vec![(0.0, 0.4), (2.5, 1.1), (5.0, 0.7)]))?;
    write_outputs(&chart, "example_lines")?;

    // Both axes cross zero, so labels at the crossing are dropped.
    let mut crossing = Chart::new(config.with_title("Deviation").with_labels("t", "dev"));
    let wave: Vec<(f64, f64)> = (0..=40)
        .map(|i| {
            let x = -4.0 + i as f64 * 0.25;
            (x, (x * 1.3).sin() * 2.5)
        })
        .collect();
    crossing.add_series(LineSeries::numeric("sin", wave))?;
    write_outputs(&crossing, "example_crossing")
}
