//! Terminal implementation of the display boundary.
//!
//! Draws the mosaic with raw ANSI escape sequences batched into a single
//! string per frame, written and flushed once, to keep flicker down. Each
//! glyph cell occupies two terminal columns (emoji are double-width) and
//! one row; the bottom row is reserved for the HUD.

use std::io::{self, Write};

use crossterm::terminal;

use super::{Display, GlyphFill};

/// Terminal-backed display surface.
///
/// The surface is reported in pixels at `cell_size` pixels per glyph cell,
/// so the mosaic grid computed from it lands on exactly one glyph per
/// two-column terminal cell.
pub struct TerminalDisplay {
    /// Pending escape-sequence output for the current frame
    buffer: String,
    term_cols: u16,
    term_rows: u16,
    cell_size: u32,
}

impl TerminalDisplay {
    /// Set up the terminal (raw mode, alternate screen, hidden cursor) and
    /// return a display sized to it.
    pub fn new(cell_size: u32) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let (term_cols, term_rows) = terminal::size()?;

        let mut stdout = io::stdout();
        // Alternate screen, hidden cursor, cleared surface
        stdout.write_all(b"\x1b[?1049h\x1b[?25l\x1b[2J")?;
        stdout.flush()?;

        Ok(Self {
            buffer: String::new(),
            term_cols,
            term_rows,
            cell_size,
        })
    }

    /// Track a terminal resize (SIGWINCH arrives as a crossterm event).
    pub fn handle_resize(&mut self, cols: u16, rows: u16) {
        self.term_cols = cols;
        self.term_rows = rows;
        // The old frame no longer fits the new geometry
        self.buffer.push_str("\x1b[2J");
    }

    /// Glyph grid offered by the terminal: two columns per glyph, bottom
    /// row reserved for the HUD.
    fn glyph_grid(&self) -> (u16, u16) {
        (self.term_cols / 2, self.term_rows.saturating_sub(1))
    }
}

impl Display for TerminalDisplay {
    fn surface_size(&self) -> (u32, u32) {
        let (cols, rows) = self.glyph_grid();
        (cols as u32 * self.cell_size, rows as u32 * self.cell_size)
    }

    fn blank(&mut self) -> io::Result<()> {
        self.buffer.push_str("\x1b[2J");
        Ok(())
    }

    fn draw_glyph(&mut self, x: u16, y: u16, glyph: &str, fill: GlyphFill) -> io::Result<()> {
        let (cols, rows) = self.glyph_grid();
        if x >= cols || y >= rows {
            // Off-surface cells (minimum grid on a tiny terminal) are
            // clipped rather than wrapped by the terminal.
            return Ok(());
        }

        // 1-based ANSI coordinates, two terminal columns per glyph
        self.buffer
            .push_str(&format!("\x1b[{};{}H", y + 1, x * 2 + 1));

        let (r, g, b) = match fill {
            GlyphFill::Gray(v) => (v, v, v),
            GlyphFill::White => (255, 255, 255),
        };
        // ANSI true color (24-bit) foreground
        self.buffer
            .push_str(&format!("\x1b[38;2;{};{};{}m", r, g, b));
        self.buffer.push_str(glyph);
        Ok(())
    }

    fn set_hud_text(&mut self, text: &str) -> io::Result<()> {
        // Bottom row: clear it, then draw the HUD dimmed
        self.buffer
            .push_str(&format!("\x1b[{};1H\x1b[2K\x1b[0m\x1b[2m{}", self.term_rows, text));
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.buffer.push_str("\x1b[0m");

        let mut stdout = io::stdout();
        stdout.write_all(self.buffer.as_bytes())?;
        stdout.flush()?;
        self.buffer.clear();
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        // Best effort: leave the alternate screen and restore the cursor
        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x1b[0m\x1b[?25h\x1b[?1049l");
        let _ = stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}
