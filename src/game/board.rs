use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;

use super::config::GameConfig;
use super::error::{BoardError, BoardResult};
use super::tile::{Cell, Tile};

/// Mapping from grid cell to tile on a fixed rows x cols grid
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cell_width: u32,
    cell_height: u32,
    tiles: HashMap<Cell, Tile>,
}

impl Board {
    /// Create an empty board with the grid and cell geometry of `config`
    pub fn new(config: &GameConfig) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
            cell_width: config.cell_width,
            cell_height: config.cell_height,
            tiles: HashMap::with_capacity(config.capacity()),
        }
    }

    /// Build a board from row-major values, where 0 marks an empty cell
    ///
    /// Rows or columns beyond the grid are rejected as out of bounds.
    pub fn from_values(config: &GameConfig, values: &[&[u32]]) -> BoardResult<Self> {
        let mut board = Self::new(config);
        for (row, line) in values.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value != 0 {
                    board.place(board.tile(value, Cell::new(row, col)))?;
                }
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell extent in board pixels as (width, height)
    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tiles.len() == self.capacity()
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// A grid-aligned tile for this board's geometry
    pub fn tile(&self, value: u32, cell: Cell) -> Tile {
        Tile::new(value, cell, self.cell_width, self.cell_height)
    }

    pub fn get(&self, cell: Cell) -> Option<&Tile> {
        self.tiles.get(&cell)
    }

    /// Insert a tile at its cell
    pub fn place(&mut self, tile: Tile) -> BoardResult<()> {
        let cell = tile.cell;
        if !self.in_bounds(cell) {
            return Err(BoardError::OutOfBounds {
                cell,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.tiles.contains_key(&cell) {
            return Err(BoardError::CellOccupied(cell));
        }
        self.tiles.insert(cell, tile);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// Take every tile off the board, leaving it empty
    pub fn drain(&mut self) -> Vec<Tile> {
        self.tiles.drain().map(|(_, tile)| tile).collect()
    }

    /// Clear the board and re-key it from `tiles`
    pub fn rebuild(&mut self, tiles: impl IntoIterator<Item = Tile>) -> BoardResult<()> {
        self.clear();
        for tile in tiles {
            self.place(tile)?;
        }
        Ok(())
    }

    /// Read-only view of all tiles, in no particular order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Unoccupied cells in row-major order
    pub fn empty_cells(&self) -> Vec<Cell> {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| Cell::new(row, col)))
            .filter(|cell| !self.tiles.contains_key(cell))
            .collect()
    }

    /// Uniformly sample an unoccupied cell
    pub fn random_empty_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> BoardResult<Cell> {
        self.empty_cells()
            .choose(rng)
            .copied()
            .ok_or(BoardError::BoardFull)
    }

    /// True when two orthogonally adjacent tiles hold the same value
    pub fn has_available_merge(&self) -> bool {
        self.tiles.values().any(|tile| {
            [(1, 0), (0, 1)].into_iter().any(|(d_col, d_row)| {
                tile.cell
                    .offset(d_col, d_row)
                    .and_then(|next| self.tiles.get(&next))
                    .is_some_and(|next| next.value == tile.value)
            })
        })
    }

    /// Full with no merge left: no direction can change the board
    pub fn is_stuck(&self) -> bool {
        self.is_full() && !self.has_available_merge()
    }

    /// Row-major snapshot of values, 0 for empty cells
    pub fn values(&self) -> Vec<Vec<u32>> {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| self.get(Cell::new(row, col)).map_or(0, |tile| tile.value))
                    .collect()
            })
            .collect()
    }

    /// Sum of all tile values
    pub fn total_value(&self) -> u64 {
        self.tiles.values().map(|tile| u64::from(tile.value)).sum()
    }

    /// Largest tile value, 0 on an empty board
    pub fn max_value(&self) -> u32 {
        self.tiles.values().map(|tile| tile.value).max().unwrap_or(0)
    }
}
