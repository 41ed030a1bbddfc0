use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::palette;
use crate::game::{Board, Tile};

/// Where the board lands in the terminal and how big one cell is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Outer frame, grid lines included
    pub frame: Rect,
    /// Terminal columns per cell, including one grid line
    pub cell_cols: u16,
    /// Terminal rows per cell, including one grid line
    pub cell_rows: u16,
}

impl Geometry {
    const MIN_CELL_COLS: u16 = 5;
    const MIN_CELL_ROWS: u16 = 2;

    /// Largest roughly square cells that fit `area`, centred; `None` if too small
    pub fn fit(area: Rect, rows: usize, cols: usize) -> Option<Self> {
        let (rows, cols) = (u16::try_from(rows).ok()?, u16::try_from(cols).ok()?);
        if rows == 0 || cols == 0 {
            return None;
        }

        // Terminal cells are about twice as tall as they are wide
        let cell_cols = (area.width.saturating_sub(1) / cols).min(area.height.saturating_sub(1) / rows * 2);
        let cell_rows = (area.height.saturating_sub(1) / rows).min(cell_cols / 2);
        if cell_cols < Self::MIN_CELL_COLS || cell_rows < Self::MIN_CELL_ROWS {
            return None;
        }

        let width = cols * cell_cols + 1;
        let height = rows * cell_rows + 1;
        let frame = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );
        Some(Self {
            frame,
            cell_cols,
            cell_rows,
        })
    }

    /// Terminal rectangle of a tile at its current animated position
    pub fn tile_rect(&self, tile: &Tile, cell_width: u32, cell_height: u32) -> Rect {
        let col = tile.position.x / cell_width as f32 * f32::from(self.cell_cols);
        let row = tile.position.y / cell_height as f32 * f32::from(self.cell_rows);
        let x = self.frame.x.saturating_add(1).saturating_add(col.round().max(0.0) as u16);
        let y = self.frame.y.saturating_add(1).saturating_add(row.round().max(0.0) as u16);

        Rect::new(x, y, self.cell_cols - 1, self.cell_rows - 1).intersection(self.frame)
    }
}

/// Draws the grid and every tile, mid-slide positions included
pub struct BoardView<'a> {
    board: &'a Board,
}

impl<'a> BoardView<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    fn draw_tile(&self, buf: &mut Buffer, geometry: &Geometry, tile: &Tile) {
        let (cell_width, cell_height) = self.board.cell_size();
        let rect = geometry.tile_rect(tile, cell_width, cell_height);
        if rect.is_empty() {
            return;
        }

        buf.set_style(rect, Style::default().bg(palette::tile_color(tile)));

        let label = tile.value.to_string();
        let len = label.len() as u16;
        if len <= rect.width {
            buf.set_string(
                rect.x + (rect.width - len) / 2,
                rect.y + rect.height / 2,
                label,
                Style::default()
                    .fg(palette::text_color(tile))
                    .add_modifier(Modifier::BOLD),
            );
        }
    }

    fn draw_grid_lines(&self, buf: &mut Buffer, geometry: &Geometry) {
        let frame = geometry.frame;
        let line = Style::default().bg(palette::OUTLINE);

        for col in 0..=self.board.cols() as u16 {
            let x = frame.x + col * geometry.cell_cols;
            for y in frame.y..frame.bottom() {
                buf[(x, y)].set_symbol(" ").set_style(line);
            }
        }
        for row in 0..=self.board.rows() as u16 {
            let y = frame.y + row * geometry.cell_rows;
            for x in frame.x..frame.right() {
                buf[(x, y)].set_symbol(" ").set_style(line);
            }
        }
    }
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(geometry) = Geometry::fit(area, self.board.rows(), self.board.cols()) else {
            if !area.is_empty() {
                buf.set_string(area.x, area.y, "terminal too small", Style::default());
            }
            return;
        };

        buf.set_style(geometry.frame, Style::default().bg(palette::BACKGROUND));
        for tile in self.board.tiles() {
            self.draw_tile(buf, &geometry, tile);
        }
        self.draw_grid_lines(buf, &geometry);
    }
}
