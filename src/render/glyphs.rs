//! Character tables for text output

use super::RenderMode;
use crate::world::{FloorDecor, TileVariant};

/// Glyph for one cell. Decorations only matter on floor cells.
pub fn glyph(mode: RenderMode, variant: TileVariant, decor: Option<FloorDecor>) -> char {
    if mode.uses_unicode() {
        unicode_char(variant, decor)
    } else {
        ascii_char(variant, decor)
    }
}

/// ASCII characters for tiles
fn ascii_char(variant: TileVariant, decor: Option<FloorDecor>) -> char {
    match variant {
        TileVariant::Floor => match decor {
            Some(FloorDecor::Uncommon(_)) => ',',
            Some(FloorDecor::Rare) => '*',
            _ => '.',
        },
        _ => '#',
    }
}

/// Unicode characters for tiles. Wall pieces trace the floor outline.
fn unicode_char(variant: TileVariant, decor: Option<FloorDecor>) -> char {
    use TileVariant::*;

    match variant {
        Floor => match decor {
            Some(FloorDecor::Uncommon(_)) => '∙',
            Some(FloorDecor::Rare) => '✦',
            _ => '·',
        },
        EdgeN | EdgeS => '─',
        EdgeE | EdgeW => '│',
        OuterCornerNW | InnerCornerNW => '┌',
        OuterCornerNE | InnerCornerNE => '┐',
        OuterCornerSW | InnerCornerSW => '└',
        OuterCornerSE | InnerCornerSE => '┘',
        InnerCornerNWSE | InnerCornerNESW => '┼',
        Background => '█',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_plain() {
        for v in TileVariant::ALL {
            let c = glyph(RenderMode::Ascii, v, None);
            assert!(c.is_ascii(), "{:?} -> {}", v, c);
            assert_eq!(c == '#', v.is_wall());
        }
    }

    #[test]
    fn test_decorations_show_on_floor() {
        assert_eq!(glyph(RenderMode::Ascii, TileVariant::Floor, Some(FloorDecor::Plain)), '.');
        assert_eq!(glyph(RenderMode::Ascii, TileVariant::Floor, Some(FloorDecor::Uncommon(3))), ',');
        assert_eq!(glyph(RenderMode::Ascii, TileVariant::Floor, Some(FloorDecor::Rare)), '*');
        assert_eq!(glyph(RenderMode::Unicode, TileVariant::Floor, Some(FloorDecor::Rare)), '✦');
    }

    #[test]
    fn test_unicode_walls_differ_from_floor() {
        let floor = glyph(RenderMode::Unicode, TileVariant::Floor, None);
        for v in TileVariant::ALL.iter().filter(|v| v.is_wall()) {
            assert_ne!(glyph(RenderMode::Unicode, *v, None), floor);
        }
        assert_eq!(glyph(RenderMode::Color, TileVariant::EdgeS, None), '─');
    }
}
