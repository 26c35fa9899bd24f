//! Nearest-entry glyph lookup.

use super::palette::{COLOR_PALETTE, GRAY_PALETTE};

/// BT.601 luma of an RGB triple, rounded to the nearest integer.
///
/// Integer math: coefficients scaled by 1000 (299 + 587 + 114), +500 for
/// rounding instead of truncation.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
}

/// Glyph from the grayscale ramp closest to `gray` by absolute difference.
/// Ties resolve to the earliest table entry.
pub fn nearest_gray_glyph(gray: u8) -> &'static str {
    let mut best = GRAY_PALETTE[0].glyph;
    let mut smallest = u16::MAX;

    for entry in &GRAY_PALETTE {
        let d = gray.abs_diff(entry.gray) as u16;
        if d < smallest {
            smallest = d;
            best = entry.glyph;
        }
    }
    best
}

/// Glyph from the color set closest to (r, g, b) by squared Euclidean
/// distance in RGB space. Ties resolve to the earliest table entry.
pub fn nearest_color_glyph(r: u8, g: u8, b: u8) -> &'static str {
    let mut best = COLOR_PALETTE[0].glyph;
    let mut smallest = u32::MAX;

    for entry in &COLOR_PALETTE {
        let dr = r.abs_diff(entry.rgb[0]) as u32;
        let dg = g.abs_diff(entry.rgb[1]) as u32;
        let db = b.abs_diff(entry.rgb[2]) as u32;

        let d = dr * dr + dg * dg + db * db;
        if d < smallest {
            smallest = d;
            best = entry.glyph;
        }
    }
    best
}
