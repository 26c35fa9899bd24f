//! Display collaborator boundary.
//!
//! The session never talks to a concrete rendering technology; it draws
//! through this trait. The terminal implementation lives in
//! [`terminal`]; tests substitute a recording implementation.

mod terminal;

pub use terminal::TerminalDisplay;

use std::io;

/// Fill style for a drawn glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphFill {
    /// Grayscale fill: the glyph dims/brightens with the cell's luma in
    /// addition to its shape.
    Gray(u8),
    /// Plain white fill, used once color is unlocked so the palette color
    /// of the glyph itself carries the visual weight.
    White,
}

/// Output surface for the mosaic and the HUD.
pub trait Display {
    /// Surface dimensions in pixels, used to size the mosaic grid.
    fn surface_size(&self) -> (u32, u32);

    /// Blank the whole surface.
    fn blank(&mut self) -> io::Result<()>;

    /// Draw one glyph at a grid position (column, row).
    fn draw_glyph(&mut self, x: u16, y: u16, glyph: &str, fill: GlyphFill) -> io::Result<()>;

    /// Replace the HUD line.
    fn set_hud_text(&mut self, text: &str) -> io::Result<()>;

    /// Flush everything drawn since the last call to the surface.
    fn present(&mut self) -> io::Result<()>;
}
