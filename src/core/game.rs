//! Game module - the spawn/fall/lock/clear state machine
//!
//! Ties the core components together: the grid holds the materialized
//! footprint of the active piece, the bag supplies kinds, and this module
//! keeps footprint and piece position in sync across every move, rotation
//! and lock. Commands are gated by the pause/game-over/quit flags; rejected
//! moves are normal `false` returns, never errors.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::core::bag::Bag;
use crate::core::grid::Grid;
use crate::core::piece::Piece;
use crate::core::scoring;
use crate::core::snapshot::{GameSnapshot, PieceView};
use crate::types::{Collision, GameError};

/// Seed for games that do not need a reproducible run
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.subsec_nanos() ^ elapsed.as_secs() as u32)
        .unwrap_or(1)
}

/// Complete single-game state
///
/// The grid always contains the active piece's footprint (except for the
/// instants inside a move, which erase and re-stamp it), so a board read is
/// already a render-ready view.
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    bag: Bag,
    active: Piece,
    next: Piece,
    score: u64,
    level: u32,
    lines: u32,
    paused: bool,
    game_over: bool,
    quit: bool,
    gravity: bool,
}

impl Game {
    /// Create a game with a clock-derived seed
    pub fn new(rows: usize, cols: usize) -> Result<Self, GameError> {
        Self::with_seed(rows, cols, clock_seed())
    }

    /// Create a game with a reproducible piece sequence
    pub fn with_seed(rows: usize, cols: usize, seed: u32) -> Result<Self, GameError> {
        let grid = Grid::new(rows, cols)?;
        let mut bag = Bag::new(seed);
        let active = Piece::spawn(bag.draw(), cols);
        let next = Piece::spawn(bag.draw(), cols);

        let mut game = Self {
            grid,
            bag,
            active,
            next,
            score: 0,
            level: 0,
            lines: 0,
            paused: false,
            game_over: false,
            quit: false,
            gravity: true,
        };
        // An empty board always has room for a spawn
        game.grid.stamp(&game.active);
        Ok(game)
    }

    /// True while commands may change the board
    pub fn playable(&self) -> bool {
        !self.paused && !self.game_over && !self.quit
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn total_lines(&self) -> u32 {
        self.lines
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_quit(&self) -> bool {
        self.quit
    }

    /// Board dimensions as (rows, cols)
    pub fn size(&self) -> (usize, usize) {
        (self.grid.rows(), self.grid.cols())
    }

    /// Seed the piece sequence started from
    pub fn seed(&self) -> u32 {
        self.bag.seed()
    }

    /// Tag at (row, col), active footprint included
    pub fn cell(&self, row: i16, col: i16) -> Option<u8> {
        self.grid.cell(row, col)
    }

    pub fn active_piece(&self) -> &Piece {
        &self.active
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    #[cfg(test)]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Swap the active piece for a freshly spawned `kind` (test setup)
    #[cfg(test)]
    pub fn replace_active(&mut self, kind: crate::types::PieceKind) {
        self.grid.erase(&self.active);
        self.active = Piece::spawn(kind, self.grid.cols());
        self.grid.stamp(&self.active);
    }

    /// Swap the upcoming piece for `kind` (test setup)
    #[cfg(test)]
    pub fn replace_next(&mut self, kind: crate::types::PieceKind) {
        self.next = Piece::spawn(kind, self.grid.cols());
    }

    /// Promote the pre-drawn piece to active and draw a fresh preview
    ///
    /// Spawn-time game over: when the promoted piece has no room its
    /// footprint is NOT stamped, leaving the board exactly as the last lock
    /// left it.
    fn spawn_next(&mut self) {
        self.active = self.next;
        self.next = Piece::spawn(self.bag.draw(), self.grid.cols());

        if self.grid.collides(&self.active).is_none() {
            self.grid.stamp(&self.active);
        } else {
            self.game_over = true;
            self.active.can_move = false;
        }
    }

    /// Try to shift the active piece by (d_col, d_row)
    ///
    /// The piece's own footprint is lifted off the board first so it cannot
    /// collide with itself. A refused downward shift locks the piece; a
    /// refused horizontal shift never does.
    fn try_shift(&mut self, d_col: i16, d_row: i16) -> bool {
        if !self.active.can_move {
            return false;
        }

        self.grid.erase(&self.active);
        self.active.offset_by(d_col, d_row);

        if self.grid.collides(&self.active).is_none() {
            self.grid.stamp(&self.active);
            return true;
        }

        self.active.offset_by(-d_col, -d_row);
        self.grid.stamp(&self.active);
        if d_col == 0 {
            self.active.can_move = false;
        }
        false
    }

    /// Shift left one column; `false` when blocked or not playable
    pub fn move_left(&mut self) -> bool {
        self.playable() && self.try_shift(-1, 0)
    }

    /// Shift right one column; `false` when blocked or not playable
    pub fn move_right(&mut self) -> bool {
        self.playable() && self.try_shift(1, 0)
    }

    /// Soft drop: one row down, worth one point when it moves
    pub fn move_down(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let moved = self.try_shift(0, 1);
        if moved {
            self.score += 1;
        }
        moved
    }

    /// Rotate the active piece a quarter turn clockwise
    ///
    /// A rotation that only hits a wall is nudged back inside: shifted away
    /// from the wall up to the shape's width, keeping the first position
    /// that fits. Any other remaining violation rejects the rotation and
    /// the piece is re-stamped unrotated. Not a kick table, just the
    /// positional nudge.
    pub fn rotate(&mut self) -> bool {
        if !self.playable() || !self.active.can_move {
            return false;
        }

        self.grid.erase(&self.active);
        let mut candidate = self.active.rotated();
        let mut hit = self.grid.collides(&candidate);

        if hit.is_wall() {
            let away = if hit == Collision::LeftWall { 1 } else { -1 };
            for _ in 0..candidate.size() {
                candidate.offset_by(away, 0);
                hit = self.grid.collides(&candidate);
                if hit.is_none() {
                    break;
                }
            }
        }

        if hit.is_none() {
            self.active = candidate;
            self.grid.stamp(&self.active);
            true
        } else {
            self.grid.stamp(&self.active);
            false
        }
    }

    /// Drop straight to the resting position, then lock and respawn at once
    pub fn hard_drop(&mut self) -> bool {
        if !self.playable() || !self.active.can_move {
            return false;
        }
        while self.try_shift(0, 1) {}
        self.settle();
        true
    }

    /// Advance the simulation by one logical frame
    ///
    /// A falling piece drops one row (unscored); a locked piece goes
    /// through clear + respawn. Paused, finished and quit games ignore
    /// the tick.
    pub fn step(&mut self) {
        if !self.playable() {
            return;
        }
        if self.active.can_move {
            self.try_shift(0, 1);
        } else {
            self.settle();
        }
    }

    /// Clear full rows, apply scoring and level-up, spawn the next piece
    fn settle(&mut self) {
        let cleared = self.grid.sweep_full_rows();
        let count = cleared.len();
        if count > 0 {
            self.score += scoring::clear_points(count, self.level);
            self.lines += count as u32;
            if self.lines >= scoring::level_up_threshold(self.level) {
                self.level += 1;
            }
        }
        self.spawn_next();
    }

    /// Flip the pause flag; inert once the game is over or quit
    pub fn toggle_pause(&mut self) {
        if !self.game_over && !self.quit {
            self.paused = !self.paused;
        }
    }

    /// Start over: empty board, zeroed counters, fresh bag and spawn
    ///
    /// Available from any state except quit, including game over.
    pub fn reset(&mut self) {
        if self.quit {
            return;
        }
        self.grid.clear();
        self.bag.reset();
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.paused = false;
        self.game_over = false;
        self.active = Piece::spawn(self.bag.draw(), self.grid.cols());
        self.next = Piece::spawn(self.bag.draw(), self.grid.cols());
        self.grid.stamp(&self.active);
    }

    /// Enter the terminal quit state
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Enable or disable automatic falling (enabled on construction)
    pub fn set_gravity(&mut self, on: bool) {
        self.gravity = on;
    }

    /// Delay before the next automatic tick; zero means gravity is off
    pub fn tick_delay(&self) -> Duration {
        if !self.gravity {
            return Duration::ZERO;
        }
        scoring::tick_delay(self.level)
    }

    /// Refresh `out` with a coherent copy of the whole game
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.rows = self.grid.rows();
        out.cols = self.grid.cols();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active = PieceView::from(&self.active);
        out.next = PieceView::from(&self.next);
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.quit = self.quit;
        out.seed = self.bag.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}
