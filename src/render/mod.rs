//! Preview renderers
//!
//! Generation output is meant for an external tile renderer; these are
//! quick ways to look at a cave from the command line:
//! - glyphs: ASCII or Unicode text
//! - terminal: coloured text through crossterm
//! - preview: PNG image, one block per cell

pub mod glyphs;
pub mod mode;
pub mod preview;
pub mod terminal;

pub use mode::{detect_render_mode, RenderMode};
pub use preview::{render_image, save_png};
pub use terminal::{render_text, write_terminal};

use crate::config::Rgb;
use crate::world::generation::GridResult;

/// Multiply a base colour by the tint
pub fn tinted(base: (u8, u8, u8), tint: Rgb) -> (u8, u8, u8) {
    let scale = |c: u8, t: f32| (c as f32 * t.clamp(0.0, 1.0)).round() as u8;
    (scale(base.0, tint.r), scale(base.1, tint.g), scale(base.2, tint.b))
}

/// Tinted colour of the cell at `(x, y)`. Floors take their decoration colour.
pub fn cell_color(result: &GridResult, x: i32, y: i32) -> (u8, u8, u8) {
    let base = match (result.variant_at(x, y), result.decoration_at(x, y)) {
        (Some(_), Some(decor)) => decor.color(),
        (Some(variant), None) => variant.color(),
        (None, _) => (0, 0, 0),
    };
    tinted(base, result.tint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_tint_is_identity() {
        assert_eq!(tinted((130, 110, 90), Rgb::default()), (130, 110, 90));
    }

    #[test]
    fn test_tint_scales_channels() {
        assert_eq!(tinted((200, 100, 50), Rgb::new(0.5, 0.0, 1.0)), (100, 0, 50));
    }
}
