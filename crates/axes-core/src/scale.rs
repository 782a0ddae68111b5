// File: crates/axes-core/src/scale.rs
// Summary: "Nice" scale interval selection for numeric axes plus rounding/formatting helpers.

/// Allowed normalized steps, in the order they are tried.
const LADDER: [f64; 4] = [1.0, 2.0, 5.0, 10.0];

/// A ladder step is accepted while the raw step overshoots it by at most this factor, so a
/// 0..100 range in five divisions lands on 20 rather than jumping to 50.
const COVER_TOLERANCE: f64 = 1.25;

/// Largest number of decimals a scale label may carry.
pub const MAX_DECIMALS: i32 = 10;

/// Outcome of [`choose_scale`]: the labelled interval and how it is subdivided.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleChoice {
    pub interval: f64,
    pub major_divisor: u32,
    pub minor_divisor: u32,
}

impl ScaleChoice {
    pub fn major_step(&self) -> f64 {
        self.interval / self.major_divisor as f64
    }

    pub fn minor_step(&self) -> f64 {
        self.interval / self.minor_divisor as f64
    }

    /// `(scale interval, major tick interval, minor tick interval)`.
    pub fn steps(&self) -> (f64, f64, f64) {
        (self.interval, self.major_step(), self.minor_step())
    }

    fn single(interval: f64) -> Self {
        Self { interval, major_divisor: 1, minor_divisor: 1 }
    }
}

/// Choose a 1/2/5 × 10^k scale interval giving roughly `min_divisions` labelled values.
///
/// * `max == min` yields the `(1, 1, 1)` placeholder; callers treat it as "no scale".
/// * `min_divisions < 2` makes the whole span a single division.
///
/// When the normalized step rounds to 5 the major ticks sit on the scale marks
/// themselves (major divisor 1); for 1, 2 and 10 major ticks fall halfway between.
pub fn choose_scale(min: f64, max: f64, min_divisions: usize) -> ScaleChoice {
    let span = max - min;
    if span == 0.0 || !span.is_finite() {
        return ScaleChoice::single(1.0);
    }
    let span = span.abs();
    if min_divisions < 2 {
        return ScaleChoice::single(span);
    }

    let raw = span / (min_divisions - 1) as f64;
    let mut magnitude = 10f64.powi(raw.log10().floor() as i32);
    let mut normalized = raw / magnitude;
    // log10 is not exact for every power of ten; keep `normalized` in [1, 10).
    if normalized >= 10.0 {
        magnitude *= 10.0;
        normalized /= 10.0;
    } else if normalized < 1.0 {
        magnitude /= 10.0;
        normalized *= 10.0;
    }

    let nice = LADDER
        .iter()
        .copied()
        .find(|&v| normalized <= v * COVER_TOLERANCE)
        .unwrap_or(10.0);

    let (major_divisor, minor_divisor) = if nice == 5.0 { (1, 5) } else { (2, 5) };
    let choice = ScaleChoice { interval: nice * magnitude, major_divisor, minor_divisor };
    tracing::trace!(min, max, min_divisions, interval = choice.interval, "chose numeric scale");
    choice
}

pub fn round_down_to_multiple(x: f64, step: f64) -> f64 {
    (x / step).floor() * step
}

pub fn round_up_to_multiple(x: f64, step: f64) -> f64 {
    (x / step).ceil() * step
}

/// Decimal places needed to print values spaced `interval` apart, clamped to `0..=10`.
pub fn decimal_places(interval: f64) -> usize {
    if !(interval.is_finite() && interval > 0.0) {
        return 0;
    }
    let n = (1.0 - interval.log10()).ceil();
    n.clamp(0.0, MAX_DECIMALS as f64) as usize
}

/// Text for a numeric scale mark: whole numbers print bare, the rest with
/// [`decimal_places`] digits.
pub fn format_scale_value(value: f64, interval: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() <= interval.abs() * 1e-9 {
        // Avoids "-0".
        return format!("{}", rounded as i64);
    }
    let text = format!("{:.*}", decimal_places(interval), value);
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

/// Round to `sf` significant figures; used for tooltip values.
pub fn round_sig_figs(x: f64, sf: u32) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    let digits = sf as i32 - 1 - x.abs().log10().floor() as i32;
    if digits >= 0 {
        let p = 10f64.powi(digits);
        (x * p).round() / p
    } else {
        let p = 10f64.powi(-digits);
        (x / p).round() * p
    }
}
