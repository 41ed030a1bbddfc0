//! Colours for the board and tiles
//!
//! The tile table covers 2 through 512. Larger values reuse the last
//! colour so long games keep rendering.

use ratatui::style::Color;

use crate::game::Tile;

pub const BACKGROUND: Color = Color::Rgb(205, 192, 180);
pub const OUTLINE: Color = Color::Rgb(187, 173, 160);
pub const FONT_DARK: Color = Color::Rgb(119, 110, 101);
pub const FONT_LIGHT: Color = Color::Rgb(249, 246, 242);

pub const TILE_COLORS: [Color; 9] = [
    Color::Rgb(237, 229, 218),
    Color::Rgb(238, 225, 201),
    Color::Rgb(243, 178, 122),
    Color::Rgb(246, 150, 101),
    Color::Rgb(247, 124, 95),
    Color::Rgb(247, 95, 59),
    Color::Rgb(237, 208, 115),
    Color::Rgb(237, 204, 99),
    Color::Rgb(236, 202, 80),
];

/// Fill colour for a tile, clamped to the last entry past 512
pub fn tile_color(tile: &Tile) -> Color {
    TILE_COLORS[tile.palette_index().min(TILE_COLORS.len() - 1)]
}

/// Text colour that stays readable on the tile's fill
pub fn text_color(tile: &Tile) -> Color {
    if tile.value <= 4 { FONT_DARK } else { FONT_LIGHT }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    fn tile(value: u32) -> Tile {
        Tile::new(value, Cell::new(0, 0), 200, 200)
    }

    #[test]
    fn test_palette_order() {
        assert_eq!(tile_color(&tile(2)), TILE_COLORS[0]);
        assert_eq!(tile_color(&tile(16)), TILE_COLORS[3]);
        assert_eq!(tile_color(&tile(512)), TILE_COLORS[8]);
    }

    #[test]
    fn test_overflow_clamps_to_last_colour() {
        assert_eq!(tile_color(&tile(1024)), TILE_COLORS[8]);
        assert_eq!(tile_color(&tile(131_072)), TILE_COLORS[8]);
    }

    #[test]
    fn test_text_contrast() {
        assert_eq!(text_color(&tile(2)), FONT_DARK);
        assert_eq!(text_color(&tile(8)), FONT_LIGHT);
    }
}
