//! Text and terminal output
//!
//! Rows are printed north first, so the top line of output is `y = height - 1`.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use super::{cell_color, glyphs::glyph, RenderMode};
use crate::world::generation::GridResult;

/// Plain text rendering, one line per row, no colour codes
pub fn render_text(result: &GridResult, mode: RenderMode) -> String {
    let grid = &result.grid;
    let mut out = String::with_capacity(grid.cells.len() * 2 + grid.height.max(0) as usize);
    for y in (0..grid.height).rev() {
        for x in 0..grid.width {
            out.push(cell_glyph(result, mode, x, y));
        }
        out.push('\n');
    }
    out
}

/// Write the cave to a terminal. `RenderMode::Color` adds 24-bit colours.
pub fn write_terminal<W: Write>(out: &mut W, result: &GridResult, mode: RenderMode) -> io::Result<()> {
    if !mode.uses_color() {
        out.write_all(render_text(result, mode).as_bytes())?;
        return out.flush();
    }

    let grid = &result.grid;
    for y in (0..grid.height).rev() {
        let mut last = None;
        for x in 0..grid.width {
            let (r, g, b) = cell_color(result, x, y);
            // Only emit a colour change when it differs from the previous cell
            if last != Some((r, g, b)) {
                queue!(out, SetForegroundColor(Color::Rgb { r, g, b }))?;
                last = Some((r, g, b));
            }
            queue!(out, Print(cell_glyph(result, mode, x, y)))?;
        }
        queue!(out, ResetColor, Print('\n'))?;
    }
    out.flush()
}

fn cell_glyph(result: &GridResult, mode: RenderMode, x: i32, y: i32) -> char {
    match result.variant_at(x, y) {
        Some(variant) => glyph(mode, variant, result.decoration_at(x, y)),
        None => ' ',
    }
}
