//! Glyph palette definitions.
//!
//! Two fixed tables: a grayscale ramp used before the presence goal is
//! reached, and a color set used afterwards. Representative values are
//! what the nearest-match lookup compares against; table order matters
//! because ties resolve to the earliest entry.

/// A glyph with its representative gray level.
#[derive(Debug, Clone, Copy)]
pub struct GrayGlyph {
    pub glyph: &'static str,
    pub gray: u8,
}

/// A glyph with its representative RGB color.
#[derive(Debug, Clone, Copy)]
pub struct ColorGlyph {
    pub glyph: &'static str,
    pub rgb: [u8; 3],
}

/// Grayscale ramp, darkest to brightest (11 levels).
pub const GRAY_PALETTE: [GrayGlyph; 11] = [
    GrayGlyph { glyph: "⬛", gray: 0 },
    GrayGlyph { glyph: "◾", gray: 55 },
    GrayGlyph { glyph: "▪", gray: 80 },
    GrayGlyph { glyph: "●", gray: 105 },
    GrayGlyph { glyph: "◐", gray: 130 },
    GrayGlyph { glyph: "◑", gray: 160 },
    GrayGlyph { glyph: "○", gray: 190 },
    GrayGlyph { glyph: "▫", gray: 215 },
    GrayGlyph { glyph: "◽", gray: 235 },
    GrayGlyph { glyph: "◻", gray: 245 },
    GrayGlyph { glyph: "⬜", gray: 255 },
];

/// Color glyph set (9 entries).
pub const COLOR_PALETTE: [ColorGlyph; 9] = [
    ColorGlyph { glyph: "⚫", rgb: [18, 18, 22] },
    ColorGlyph { glyph: "⚪", rgb: [235, 235, 240] },
    ColorGlyph { glyph: "🟤", rgb: [120, 85, 60] },
    ColorGlyph { glyph: "🔴", rgb: [220, 55, 50] },
    ColorGlyph { glyph: "🟠", rgb: [240, 140, 45] },
    ColorGlyph { glyph: "🟡", rgb: [245, 215, 65] },
    ColorGlyph { glyph: "🟢", rgb: [65, 195, 95] },
    ColorGlyph { glyph: "🔵", rgb: [60, 125, 235] },
    ColorGlyph { glyph: "🟣", rgb: [150, 85, 215] },
];
