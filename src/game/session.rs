use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::{
    action::Direction,
    board::Board,
    config::GameConfig,
    error::{BoardResult, GameError},
    resolver::{MoveResolver, MoveSummary},
    tile::Tile,
};

/// Whether the game can still be played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Continue,
    Lost,
}

/// Result of a completed (or refused) move
#[derive(Debug, Clone, PartialEq)]
pub struct MoveReport {
    pub direction: Direction,
    /// Resolution totals; `None` when the move was refused without resolving
    pub summary: Option<MoveSummary>,
    /// Tile spawned after the move, if any
    pub spawned: Option<Tile>,
    /// Status after the move
    pub status: GameStatus,
}

impl MoveReport {
    /// True when at least one tile moved or merged
    pub fn changed(&self) -> bool {
        self.summary.as_ref().is_some_and(|summary| summary.changed)
    }
}

/// A single-player game: the board, its status and the move in progress
pub struct GameSession {
    config: GameConfig,
    board: Board,
    status: GameStatus,
    score: u64,
    moves: u32,
    rng: StdRng,
    active: Option<MoveResolver>,
}

impl GameSession {
    /// Start a new game seeded from system entropy
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Start a new game with a deterministic random sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, GameError> {
        config.validate()?;
        let mut session = Self {
            board: Board::new(&config),
            config,
            status: GameStatus::Continue,
            score: 0,
            moves: 0,
            rng,
            active: None,
        };
        session.new_game()?;
        Ok(session)
    }

    /// Continue from an arbitrary board, e.g. a prepared position
    pub fn from_board(config: GameConfig, board: Board, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        let status = if board.is_stuck() {
            GameStatus::Lost
        } else {
            GameStatus::Continue
        };
        Ok(Self {
            config,
            board,
            status,
            score: 0,
            moves: 0,
            rng: StdRng::seed_from_u64(seed),
            active: None,
        })
    }

    /// Clear the board and place the opening value-2 tiles
    pub fn new_game(&mut self) -> BoardResult<()> {
        self.board.clear();
        self.status = GameStatus::Continue;
        self.score = 0;
        self.moves = 0;
        self.active = None;

        for _ in 0..self.config.initial_tiles {
            let cell = self.board.random_empty_cell(&mut self.rng)?;
            self.board.place(self.board.tile(2, cell))?;
        }

        info!(rows = self.config.rows, cols = self.config.cols, "new game");
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Read-only view of the tiles, including mid-slide positions
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.board.tiles()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_lost(&self) -> bool {
        self.status == GameStatus::Lost
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Number of moves that changed the board
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// A move is sliding and input should be ignored
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Start an animated move; returns false when the move is not accepted
    ///
    /// Moves are refused while another one is animating and once the game is
    /// lost. A full board without any merge left turns the game lost here,
    /// before any resolution happens.
    pub fn begin_move(&mut self, direction: Direction) -> bool {
        if self.active.is_some() || self.status == GameStatus::Lost {
            return false;
        }
        if self.board.is_stuck() {
            info!(score = self.score, "board full with no merge left");
            self.status = GameStatus::Lost;
            return false;
        }

        debug!(%direction, "move accepted");
        self.active = Some(MoveResolver::new(
            direction,
            self.config.move_velocity,
            &self.board,
        ));
        true
    }

    /// Advance the active move by one animation pass
    ///
    /// Returns the report once the move settles, `None` while it is still
    /// sliding or when no move is active.
    pub fn tick(&mut self) -> BoardResult<Option<MoveReport>> {
        let Some(resolver) = self.active.as_mut() else {
            return Ok(None);
        };

        resolver.step(&mut self.board)?;
        if !resolver.is_settled() {
            return Ok(None);
        }

        match self.active.take() {
            Some(resolver) => self.complete(resolver).map(Some),
            None => Ok(None),
        }
    }

    /// Resolve a whole move synchronously
    ///
    /// Any move still animating is finished first.
    pub fn apply_move(&mut self, direction: Direction) -> BoardResult<MoveReport> {
        while self.active.is_some() {
            self.tick()?;
        }

        if !self.begin_move(direction) {
            return Ok(MoveReport {
                direction,
                summary: None,
                spawned: None,
                status: self.status,
            });
        }

        loop {
            if let Some(report) = self.tick()? {
                return Ok(report);
            }
        }
    }

    fn complete(&mut self, resolver: MoveResolver) -> BoardResult<MoveReport> {
        let summary = resolver.finish(&mut self.board)?;
        self.score += summary.score_gain();

        // Only a move that changed something earns a new tile
        let spawned = if summary.changed {
            self.moves += 1;
            Some(self.spawn_tile()?)
        } else {
            None
        };

        if self.board.is_stuck() {
            info!(score = self.score, moves = self.moves, "game lost");
            self.status = GameStatus::Lost;
        }

        debug!(
            direction = %summary.direction,
            passes = summary.passes,
            merges = summary.merge_count(),
            changed = summary.changed,
            "move settled"
        );

        Ok(MoveReport {
            direction: summary.direction,
            summary: Some(summary),
            spawned,
            status: self.status,
        })
    }

    fn spawn_tile(&mut self) -> BoardResult<Tile> {
        let cell = self.board.random_empty_cell(&mut self.rng)?;
        let value = if self.rng.gen_bool(self.config.four_probability) {
            4
        } else {
            2
        };
        let tile = self.board.tile(value, cell);
        self.board.place(tile.clone())?;
        debug!(value, %cell, "spawned tile");
        Ok(tile)
    }
}
