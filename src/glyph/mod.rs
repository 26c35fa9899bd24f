//! Glyph quantization: map a pixel's brightness or color to the nearest
//! entry of a fixed glyph palette.
//!
//! Both lookups are pure, deterministic and O(table size); the tables are
//! small enough that nothing fancier than a linear scan is warranted.

mod mapper;
mod palette;

pub use mapper::{luma, nearest_color_glyph, nearest_gray_glyph};
pub use palette::{ColorGlyph, GrayGlyph, COLOR_PALETTE, GRAY_PALETTE};
