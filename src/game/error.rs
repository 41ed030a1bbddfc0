//! Error types for the game core
//!
//! Board errors are structural violations: they mean an invariant was broken
//! upstream and are never caused by player input.

use super::tile::Cell;

/// Structural violations on the board mapping
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A tile was placed on a cell that already holds one
    #[error("cell {0} is already occupied")]
    CellOccupied(Cell),

    /// A cell outside the grid was addressed
    #[error("cell {cell} is outside the {rows}x{cols} grid")]
    OutOfBounds { cell: Cell, rows: usize, cols: usize },

    /// An empty cell was requested from a full board
    #[error("no empty cell left on the board")]
    BoardFull,

    /// A move kept changing the board past its pass limit
    #[error("move did not settle after {passes} passes")]
    Unsettled { passes: usize },
}

/// A direction name that is not one of the four recognised values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: {0:?}")]
pub struct InvalidDirection(pub String);

/// Rejected game configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("cell extent must be positive (got {width}x{height})")]
    EmptyCell { width: u32, height: u32 },

    #[error("move velocity {velocity} must be positive and evenly divide the cell extent {extent}")]
    Velocity { velocity: u32, extent: u32 },

    #[error("frame rate must be positive")]
    FrameRate,

    #[error("four-tile probability {0} is outside [0, 1]")]
    Probability(f64),

    #[error("initial tile count {count} exceeds the {capacity} cells of the board")]
    InitialTiles { count: usize, capacity: usize },
}

/// Result type alias for board operations
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors surfaced by a game session
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("board invariant violated: {0}")]
    Board(#[from] BoardError),
}
