//! Snapshot module - one coherent view of the game for readers
//!
//! A snapshot is captured in full while the engine lock is held, so every
//! field belongs to the same instant. Renderers keep one around and refresh
//! it in place, reusing the cell buffer frame after frame.

use crate::core::piece::{Piece, Shape};
use crate::types::{PieceKind, EMPTY, MIN_COLS};

/// Active or upcoming piece as a renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceView {
    pub kind: PieceKind,
    pub shape: Shape,
    pub row: i16,
    pub col: i16,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind,
            shape: piece.shape(),
            row: piece.row,
            col: piece.col,
        }
    }
}

impl Default for PieceView {
    /// Placeholder; the first refresh overwrites it
    fn default() -> Self {
        Self::from(&Piece::spawn(PieceKind::O, MIN_COLS))
    }
}

/// One coherent view of the whole game
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major copy of the board with the active piece stamped in
    pub cells: Vec<u8>,
    pub active: PieceView,
    pub next: PieceView,
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    pub paused: bool,
    pub game_over: bool,
    pub quit: bool,
    pub seed: u32,
}

impl GameSnapshot {
    /// Tag at (row, col), or empty when out of range
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        if row >= self.rows || col >= self.cols {
            return EMPTY;
        }
        self.cells[row * self.cols + col]
    }

    /// True while commands can change the board
    pub fn playable(&self) -> bool {
        !self.paused && !self.game_over && !self.quit
    }
}
