// File: crates/axes-examples/src/bin/timeline.rs
// Summary: Time-axis line chart over three days of hourly readings.

use anyhow::{anyhow, Result};
use axes_core::{Chart, LineSeries};
use axes_examples::{config_from_args, write_outputs};
use chrono::{Duration, NaiveDate};

fn main() -> Result<()> {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(6, 0, 0))
        .ok_or_else(|| anyhow!("invalid start instant"))?;
    let readings: Vec<_> = (0..72)
        .map(|h| {
            let t = start + Duration::hours(h);
            let temp = 8.0 + 6.0 * ((h as f64 - 8.0) / 24.0 * std::f64::consts::TAU).sin();
            (t, temp)
        })
        .collect();

    let mut chart = Chart::new(config_from_args()?.with_title("Temperature").with_labels("Time", "°C"));
    chart.add_series(LineSeries::time("outside", readings))?;
    write_outputs(&chart, "example_timeline")
}
