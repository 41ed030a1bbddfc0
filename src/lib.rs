//! Twenty48 - the 2048 sliding-tile game in the terminal
//!
//! This library provides:
//! - Core game logic: board, tiles, move resolution and the game session (game module)
//! - Terminal rendering of the board, including sliding animation (render module)
//! - Keyboard mapping (input module)
//! - Per-process play statistics (metrics module)
//! - The interactive game loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
