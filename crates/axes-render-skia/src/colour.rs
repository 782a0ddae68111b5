// File: crates/axes-render-skia/src/colour.rs
// Summary: CSS colour strings (hex, hsl(), a few names) to Skia colours.

use skia_safe as skia;

/// Parse the colour forms the core emits. Unknown input maps to opaque black.
pub fn parse(css: &str) -> skia::Color {
    let s = css.trim();
    let parsed = if let Some(hex) = s.strip_prefix('#') {
        parse_hex(hex)
    } else if let Some(body) = s.strip_prefix("hsl(").and_then(|b| b.strip_suffix(')')) {
        parse_hsl(body)
    } else {
        named(s)
    };
    parsed.unwrap_or_else(|| {
        tracing::debug!(colour = css, "unparsed colour; using black");
        skia::Color::BLACK
    })
}

fn parse_hex(hex: &str) -> Option<skia::Color> {
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some(skia::Color::from_argb(255, byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(skia::Color::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
        3 => {
            let nibble = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok().map(|v| v * 17);
            Some(skia::Color::from_argb(255, nibble(0)?, nibble(1)?, nibble(2)?))
        }
        _ => None,
    }
}

fn parse_hsl(body: &str) -> Option<skia::Color> {
    let mut parts = body.split(',').map(|p| p.trim().trim_end_matches('%').trim());
    let h: f32 = parts.next()?.parse().ok()?;
    let s: f32 = parts.next()?.parse::<f32>().ok()? / 100.0;
    let l: f32 = parts.next()?.parse::<f32>().ok()? / 100.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Some(skia::Color::from_argb(255, to_u8(r), to_u8(g), to_u8(b)))
}

fn named(name: &str) -> Option<skia::Color> {
    Some(match name.to_ascii_lowercase().as_str() {
        "black" => skia::Color::BLACK,
        "white" => skia::Color::WHITE,
        "red" => skia::Color::RED,
        "green" => skia::Color::from_rgb(0, 128, 0),
        "blue" => skia::Color::BLUE,
        "yellow" => skia::Color::YELLOW,
        "grey" | "gray" => skia::Color::from_rgb(128, 128, 128),
        "none" | "transparent" => skia::Color::TRANSPARENT,
        _ => return None,
    })
}
