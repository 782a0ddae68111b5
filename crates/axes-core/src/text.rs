// File: crates/axes-core/src/text.rs
// Summary: Font-independent text metrics (unicode display width) and greedy word wrapping.

use unicode_width::UnicodeWidthStr;

use crate::geometry::Size;

/// Average glyph advance as a fraction of the font size.
pub const CHAR_ADVANCE_EM: f64 = 0.6;
pub const LINE_HEIGHT_EM: f64 = 1.2;

/// Estimated width in pixels of a single line.
pub fn line_width(line: &str, font_size: f64) -> f64 {
    UnicodeWidthStr::width(line) as f64 * font_size * CHAR_ADVANCE_EM
}

/// Pixel extent of `lines` set at `font_size`.
pub fn extent<S: AsRef<str>>(lines: &[S], font_size: f64) -> Size {
    let width = lines.iter().map(|l| line_width(l.as_ref(), font_size)).fold(0.0, f64::max);
    Size::new(width, lines.len() as f64 * font_size * LINE_HEIGHT_EM)
}

/// Split on explicit newlines only.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

/// Greedy word wrap into lines no wider than `width` pixels. Explicit newlines are kept and
/// a single word wider than `width` gets a line of its own.
pub fn wrap_text(text: &str, width: f64, font_size: f64) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if line_width(&candidate, font_size) <= width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }
    lines
}
