//! Move resolution: slide, collide and merge tiles toward one edge
//!
//! A move runs as a series of passes. Each pass visits every tile once,
//! nearest to the target edge first, and either advances it by one tick,
//! merges it into the tile ahead, or leaves it where it is. The board is
//! re-keyed after every pass so a renderer can draw the intermediate
//! state. The move is settled once a pass changes nothing.

use std::collections::{HashMap, HashSet};

use super::action::Direction;
use super::board::Board;
use super::error::{BoardError, BoardResult};
use super::tile::{Cell, Rounding, Tile};

/// Per-direction parameters of a move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRules {
    pub direction: Direction,
    /// Tiles are ordered by column when true, by row otherwise
    pub sort_by_col: bool,
    /// Visit higher indices first (tiles moving toward the far edge)
    pub descending: bool,
    /// Pixel step applied per tick
    pub step: (f32, f32),
    /// Rounding used when re-deriving a sliding tile's cell
    pub rounding: Rounding,
    velocity: f32,
    extent: f32,
}

impl MoveRules {
    pub fn new(direction: Direction, velocity: u32, cell_width: u32, cell_height: u32) -> Self {
        let (d_col, d_row) = direction.delta();
        let velocity = velocity as f32;
        let extent = if direction.is_horizontal() {
            cell_width
        } else {
            cell_height
        } as f32;

        Self {
            direction,
            sort_by_col: direction.is_horizontal(),
            descending: matches!(direction, Direction::Right | Direction::Down),
            step: (d_col as f32 * velocity, d_row as f32 * velocity),
            // Toward index 0 the position shrinks, so ceiling holds the departure
            // cell until arrival; toward the far edge floor does the same.
            rounding: match direction {
                Direction::Left | Direction::Up => Rounding::Ceil,
                Direction::Right | Direction::Down => Rounding::Floor,
            },
            velocity,
            extent,
        }
    }

    /// Ordering key that puts tiles closest to the target edge first
    pub fn sort_key(&self, tile: &Tile) -> (i64, i64) {
        let (primary, secondary) = if self.sort_by_col {
            (tile.cell.col, tile.cell.row)
        } else {
            (tile.cell.row, tile.cell.col)
        };
        let primary = primary as i64;
        (if self.descending { -primary } else { primary }, secondary as i64)
    }

    /// The tile cannot go any further in this direction
    pub fn at_boundary(&self, tile: &Tile, rows: usize, cols: usize) -> bool {
        match self.direction {
            Direction::Left => tile.cell.col == 0,
            Direction::Right => tile.cell.col + 1 >= cols,
            Direction::Up => tile.cell.row == 0,
            Direction::Down => tile.cell.row + 1 >= rows,
        }
    }

    /// The adjacent cell one step toward the target edge
    pub fn next_cell(&self, tile: &Tile) -> Option<Cell> {
        let (d_col, d_row) = self.direction.delta();
        tile.cell.offset(d_col, d_row)
    }

    /// Pixel distance from `tile` forward to `next` along the move axis
    fn gap(&self, tile: &Tile, next: &Tile) -> f32 {
        match self.direction {
            Direction::Left => tile.position.x - next.position.x,
            Direction::Right => next.position.x - tile.position.x,
            Direction::Up => tile.position.y - next.position.y,
            Direction::Down => next.position.y - tile.position.y,
        }
    }

    /// An equal tile is still more than one tick away
    pub fn closing_on_merge(&self, tile: &Tile, next: &Tile) -> bool {
        self.gap(tile, next) > self.velocity
    }

    /// A blocking tile leaves room for at least one more tick
    pub fn has_room(&self, tile: &Tile, next: &Tile) -> bool {
        self.gap(tile, next) > self.extent + self.velocity
    }

    /// One more tick would land `tile` on the cell `next` still holds
    ///
    /// A tile closing on an equal tile that is itself still sliding must wait
    /// until the leader has vacated its departure cell.
    pub fn advance_collides(&self, tile: &Tile, next: &Tile, cell_width: u32, cell_height: u32) -> bool {
        let mut moved = tile.clone();
        moved.move_by(self.step.0, self.step.1);
        moved.settle_cell(self.rounding, cell_width, cell_height);
        moved.cell == next.cell
    }
}

/// What one pass did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassOutcome {
    /// Number of tiles that advanced
    pub advanced: usize,
    /// Number of merges performed
    pub merges: usize,
}

impl PassOutcome {
    pub fn changed(&self) -> bool {
        self.advanced > 0 || self.merges > 0
    }
}

/// Totals for a settled move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSummary {
    pub direction: Direction,
    /// Passes run, including the final pass that changed nothing
    pub passes: usize,
    /// At least one tile moved or merged during the whole move
    pub changed: bool,
    /// Value of each tile produced by a merge, in merge order
    pub merged_values: Vec<u32>,
}

impl MoveSummary {
    pub fn merge_count(&self) -> usize {
        self.merged_values.len()
    }

    /// Points earned: the sum of the merged tiles' new values
    pub fn score_gain(&self) -> u64 {
        self.merged_values.iter().map(|&value| u64::from(value)).sum()
    }
}

#[derive(Debug)]
struct Slot {
    tile: Tile,
    merged: bool,
    removed: bool,
}

enum Step {
    Advance,
    Merge(usize),
    Hold,
}

/// Drives one move from its first pass to its settled state
#[derive(Debug, Clone)]
pub struct MoveResolver {
    rules: MoveRules,
    /// Cells of tiles that already absorbed another tile during this move
    merged: HashSet<Cell>,
    merged_values: Vec<u32>,
    passes: usize,
    max_passes: usize,
    changed: bool,
    settled: bool,
}

impl MoveResolver {
    pub fn new(direction: Direction, velocity: u32, board: &Board) -> Self {
        let (cell_width, cell_height) = board.cell_size();
        let extent = cell_width.max(cell_height) as usize * board.rows().max(board.cols());
        let ticks_per_tile = extent / velocity.max(1) as usize;

        Self {
            rules: MoveRules::new(direction, velocity, cell_width, cell_height),
            merged: HashSet::new(),
            merged_values: Vec::new(),
            passes: 0,
            max_passes: board.capacity() * (ticks_per_tile + 1) + 1,
            changed: false,
            settled: false,
        }
    }

    pub fn direction(&self) -> Direction {
        self.rules.direction
    }

    pub fn rules(&self) -> &MoveRules {
        &self.rules
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Passes after which a move that still changes the board is a bug
    ///
    /// Every changing pass either advances some tile one tick closer to its
    /// edge or removes a tile by merging, so a correct move stays below this.
    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// A pass has completed without changing anything
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Run one stabilization pass over every tile on the board
    pub fn step(&mut self, board: &mut Board) -> BoardResult<PassOutcome> {
        if self.settled {
            return Ok(PassOutcome::default());
        }
        if self.passes >= self.max_passes {
            return Err(BoardError::Unsettled {
                passes: self.passes,
            });
        }

        let rules = self.rules;
        let (rows, cols) = (board.rows(), board.cols());
        let (cell_width, cell_height) = board.cell_size();

        let mut slots: Vec<Slot> = board
            .drain()
            .into_iter()
            .map(|tile| Slot {
                merged: self.merged.contains(&tile.cell),
                removed: false,
                tile,
            })
            .collect();
        slots.sort_by_key(|slot| rules.sort_key(&slot.tile));

        // Neighbour lookups use the cells as they were when the pass began
        let index: HashMap<Cell, usize> = slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (slot.tile.cell, i))
            .collect();

        let mut outcome = PassOutcome::default();
        for i in 0..slots.len() {
            let tile = &slots[i];
            if rules.at_boundary(&tile.tile, rows, cols) {
                continue;
            }

            let next = rules
                .next_cell(&tile.tile)
                .and_then(|cell| index.get(&cell).copied())
                .filter(|&j| j != i && !slots[j].removed);

            let step = match next {
                None => Step::Advance,
                Some(j) => {
                    let ahead = &slots[j];
                    if tile.tile.value == ahead.tile.value && !tile.merged && !ahead.merged {
                        if rules.closing_on_merge(&tile.tile, &ahead.tile) {
                            if rules.advance_collides(&tile.tile, &ahead.tile, cell_width, cell_height) {
                                Step::Hold
                            } else {
                                Step::Advance
                            }
                        } else {
                            Step::Merge(j)
                        }
                    } else if rules.has_room(&tile.tile, &ahead.tile) {
                        Step::Advance
                    } else {
                        Step::Hold
                    }
                }
            };

            match step {
                Step::Advance => {
                    let tile = &mut slots[i].tile;
                    tile.move_by(rules.step.0, rules.step.1);
                    tile.settle_cell(rules.rounding, cell_width, cell_height);
                    outcome.advanced += 1;
                }
                Step::Merge(j) => {
                    let ahead = &mut slots[j];
                    ahead.tile.value *= 2;
                    ahead.merged = true;
                    self.merged_values.push(ahead.tile.value);
                    slots[i].removed = true;
                    outcome.merges += 1;
                }
                Step::Hold => {}
            }
        }

        self.merged = slots
            .iter()
            .filter(|slot| slot.merged && !slot.removed)
            .map(|slot| slot.tile.cell)
            .collect();
        board.rebuild(
            slots
                .into_iter()
                .filter(|slot| !slot.removed)
                .map(|slot| slot.tile),
        )?;

        self.passes += 1;
        if outcome.changed() {
            self.changed = true;
        } else {
            self.settled = true;
        }
        Ok(outcome)
    }

    /// Snap every tile onto its cell and report the move's totals
    pub fn finish(self, board: &mut Board) -> BoardResult<MoveSummary> {
        let (cell_width, cell_height) = board.cell_size();
        let tiles: Vec<Tile> = board
            .drain()
            .into_iter()
            .map(|mut tile| {
                tile.snap_to_cell(cell_width, cell_height);
                tile
            })
            .collect();
        board.rebuild(tiles)?;

        Ok(MoveSummary {
            direction: self.rules.direction,
            passes: self.passes,
            changed: self.changed,
            merged_values: self.merged_values,
        })
    }

    /// Resolve a whole move synchronously
    pub fn resolve(direction: Direction, velocity: u32, board: &mut Board) -> BoardResult<MoveSummary> {
        let mut resolver = Self::new(direction, velocity, board);
        while !resolver.is_settled() {
            resolver.step(board)?;
        }
        resolver.finish(board)
    }
}
