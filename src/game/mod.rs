//! Core game logic module for 2048
//!
//! This module contains the board-state transition engine without any I/O or
//! rendering dependencies. Renderers read tiles through the session; input
//! layers drive it with directions.

pub mod action;
pub mod board;
pub mod config;
pub mod error;
pub mod resolver;
pub mod session;
pub mod tile;

// Re-export commonly used types
pub use action::Direction;
pub use board::Board;
pub use config::GameConfig;
pub use error::{BoardError, BoardResult, ConfigError, GameError, InvalidDirection};
pub use resolver::{MoveResolver, MoveRules, MoveSummary, PassOutcome};
pub use session::{GameSession, GameStatus, MoveReport};
pub use tile::{Cell, Point, Rounding, Tile};
