use std::fmt;

use serde::{Deserialize, Serialize};

/// A (row, col) address on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell one step along (d_col, d_row), if it is not negative
    pub fn offset(&self, d_col: i32, d_row: i32) -> Option<Cell> {
        let row = self.row.checked_add_signed(d_row as isize)?;
        let col = self.col.checked_add_signed(d_col as isize)?;
        Some(Cell { row, col })
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Continuous board-pixel coordinates of a tile's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// How a sliding tile's position is converted back to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Floor,
    Ceil,
}

impl Rounding {
    fn apply(self, value: f32) -> usize {
        let rounded = match self {
            Rounding::Floor => value.floor(),
            Rounding::Ceil => value.ceil(),
        };
        rounded.max(0.0) as usize
    }
}

/// A numbered tile on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Power of two shown on the tile
    pub value: u32,
    /// Grid cell the tile belongs to
    pub cell: Cell,
    /// Animated position; equals the cell's corner whenever the board is settled
    pub position: Point,
}

impl Tile {
    /// Create a tile resting on `cell` for the given cell extent
    pub fn new(value: u32, cell: Cell, cell_width: u32, cell_height: u32) -> Self {
        let mut tile = Self {
            value,
            cell,
            position: Point::default(),
        };
        tile.snap_to_cell(cell_width, cell_height);
        tile
    }

    /// Index into a colour table ordered 2, 4, 8, ...
    ///
    /// Callers decide what to do when the index runs past their table.
    pub fn palette_index(&self) -> usize {
        self.value.max(2).ilog2() as usize - 1
    }

    /// Advance the animated position by one tick's step
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.position.x += dx;
        self.position.y += dy;
    }

    /// Recompute the cell from the animated position
    pub fn settle_cell(&mut self, rounding: Rounding, cell_width: u32, cell_height: u32) {
        self.cell = Cell {
            row: rounding.apply(self.position.y / cell_height as f32),
            col: rounding.apply(self.position.x / cell_width as f32),
        };
    }

    /// Put the animated position exactly on the current cell
    pub fn snap_to_cell(&mut self, cell_width: u32, cell_height: u32) {
        self.position = Point {
            x: (self.cell.col as u32 * cell_width) as f32,
            y: (self.cell.row as u32 * cell_height) as f32,
        };
    }

    /// True when the animated position sits exactly on the cell's corner
    pub fn is_grid_aligned(&self, cell_width: u32, cell_height: u32) -> bool {
        self.position.x == (self.cell.col as u32 * cell_width) as f32
            && self.position.y == (self.cell.row as u32 * cell_height) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tile_is_aligned() {
        let tile = Tile::new(2, Cell::new(1, 3), 200, 100);
        assert_eq!(tile.position, Point { x: 600.0, y: 100.0 });
        assert!(tile.is_grid_aligned(200, 100));
    }

    #[test]
    fn test_palette_index() {
        let index = |value| Tile::new(value, Cell::new(0, 0), 200, 200).palette_index();
        assert_eq!(index(2), 0);
        assert_eq!(index(4), 1);
        assert_eq!(index(512), 8);
        assert_eq!(index(2048), 10);
    }

    #[test]
    fn test_settle_rounding_keeps_departure_cell_mid_slide() {
        // Sliding left from column 1: ceiling keeps it in column 1 until it arrives
        let mut tile = Tile::new(2, Cell::new(0, 1), 200, 200);
        tile.move_by(-20.0, 0.0);
        tile.settle_cell(Rounding::Ceil, 200, 200);
        assert_eq!(tile.cell, Cell::new(0, 1));
        tile.move_by(-180.0, 0.0);
        tile.settle_cell(Rounding::Ceil, 200, 200);
        assert_eq!(tile.cell, Cell::new(0, 0));

        // Sliding down from row 1: floor keeps it in row 1 until it arrives
        let mut tile = Tile::new(2, Cell::new(1, 0), 200, 200);
        tile.move_by(0.0, 180.0);
        tile.settle_cell(Rounding::Floor, 200, 200);
        assert_eq!(tile.cell, Cell::new(1, 0));
        tile.move_by(0.0, 20.0);
        tile.settle_cell(Rounding::Floor, 200, 200);
        assert_eq!(tile.cell, Cell::new(2, 0));
    }

    #[test]
    fn test_snap_to_cell() {
        let mut tile = Tile::new(8, Cell::new(2, 2), 200, 200);
        tile.move_by(-20.0, 0.0);
        assert!(!tile.is_grid_aligned(200, 200));
        tile.snap_to_cell(200, 200);
        assert!(tile.is_grid_aligned(200, 200));
    }

    #[test]
    fn test_cell_offset() {
        let cell = Cell::new(0, 2);
        assert_eq!(cell.offset(-1, 0), Some(Cell::new(0, 1)));
        assert_eq!(cell.offset(0, -1), None);
        assert_eq!(cell.offset(0, 1), Some(Cell::new(1, 2)));
    }
}
