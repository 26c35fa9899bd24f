//! Glyph mosaic rendering.
//!
//! Lays a grid of glyph cells over the output surface, samples the source
//! frame at grid resolution and draws one glyph per cell through the
//! injected [`Display`].

use std::io;

use crate::camera::Frame;
use crate::display::{Display, GlyphFill};
use crate::glyph::{luma, nearest_color_glyph, nearest_gray_glyph};

/// Minimum grid dimension in cells, so tiny surfaces still show a mosaic.
const MIN_GRID_CELLS: u32 = 12;

/// Mosaic grid geometry for a given surface and cell size.
///
/// Offsets center the cell block within the surface; they go negative when
/// the minimum grid size makes the block larger than the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub cols: u32,
    pub rows: u32,
    pub x_offset_px: i32,
    pub y_offset_px: i32,
}

impl GridLayout {
    pub fn new(surface_width: u32, surface_height: u32, cell_size: u32) -> Self {
        let cols = (surface_width / cell_size).max(MIN_GRID_CELLS);
        let rows = (surface_height / cell_size).max(MIN_GRID_CELLS);

        let x_offset_px = (surface_width as i64 - (cols * cell_size) as i64) as i32 / 2;
        let y_offset_px = (surface_height as i64 - (rows * cell_size) as i64) as i32 / 2;

        Self {
            cols,
            rows,
            x_offset_px,
            y_offset_px,
        }
    }
}

/// Render one mosaic frame.
///
/// `frame` must already be resized to exactly `layout.cols` x `layout.rows`;
/// anything else means the frame belongs to a different grid generation and
/// the caller must blank instead. Cells are drawn left-to-right,
/// top-to-bottom. With mirroring enabled, cell (x, y) samples source column
/// `cols - 1 - x`; rows are never flipped.
pub fn render_mosaic(
    frame: &Frame,
    layout: &GridLayout,
    mirror: bool,
    color_unlocked: bool,
    display: &mut impl Display,
) -> io::Result<()> {
    debug_assert!(frame.width == layout.cols && frame.height == layout.rows);

    display.blank()?;

    for y in 0..layout.rows {
        for x in 0..layout.cols {
            let sx = if mirror { layout.cols - 1 - x } else { x };
            let (r, g, b) = frame.rgb_at(sx, y);

            if color_unlocked {
                let glyph = nearest_color_glyph(r, g, b);
                display.draw_glyph(x as u16, y as u16, glyph, GlyphFill::White)?;
            } else {
                let gray = luma(r, g, b);
                let glyph = nearest_gray_glyph(gray);
                display.draw_glyph(x as u16, y as u16, glyph, GlyphFill::Gray(gray))?;
            }
        }
    }

    Ok(())
}
