//! Piece module - tetromino shape matrices and rotation
//!
//! Each shape is a square matrix of cell tags sized to the piece's bounding
//! box (2 for O, 3 for T/J/L/Z/S, 4 for I), padded into fixed 4x4 storage.
//! Rotation is a pure transpose-and-reverse of the matrix; the box being
//! square, the footprint never changes dimensions and the anchor stays put.

use crate::types::{PieceKind, EMPTY, MAX_SHAPE};

/// A piece's cell matrix, `size` x `size` tags in fixed storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    cells: [[u8; MAX_SHAPE]; MAX_SHAPE],
    size: usize,
}

impl Shape {
    /// Side length of the matrix (width and height are equal)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tag at (row, col) inside the matrix
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    /// Iterate the filled cells in row-major order as (row, col, tag)
    pub fn cells(self) -> impl Iterator<Item = (usize, usize, u8)> {
        (0..self.size).flat_map(move |row| {
            (0..self.size)
                .map(move |col| (row, col, self.cells[row][col]))
                .filter(|&(_, _, tag)| tag != EMPTY)
        })
    }

    /// Rotate a quarter turn clockwise, returning the rotated matrix
    ///
    /// Transpose then reverse each row: `out[r][c] = in[size-1-c][r]`.
    pub fn rotated_cw(&self) -> Shape {
        let mut out = Shape {
            cells: [[EMPTY; MAX_SHAPE]; MAX_SHAPE],
            size: self.size,
        };
        for row in 0..self.size {
            for col in 0..self.size {
                out.cells[row][col] = self.cells[self.size - 1 - col][row];
            }
        }
        out
    }
}

/// Spawn-orientation shape matrix for a kind
///
/// The matrices hold the kind's own cell tag. The I piece fills its second
/// row, so it appears one row below the top edge on spawn.
pub fn spawn_shape(kind: PieceKind) -> Shape {
    let (size, cells) = match kind {
        PieceKind::O => (2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
        PieceKind::I => (4, [[0; 4], [2, 2, 2, 2], [0; 4], [0; 4]]),
        PieceKind::T => (3, [[0, 3, 0, 0], [3, 3, 3, 0], [0; 4], [0; 4]]),
        PieceKind::J => (3, [[4, 0, 0, 0], [4, 4, 4, 0], [0; 4], [0; 4]]),
        PieceKind::L => (3, [[0, 0, 5, 0], [5, 5, 5, 0], [0; 4], [0; 4]]),
        PieceKind::Z => (3, [[6, 6, 0, 0], [0, 6, 6, 0], [0; 4], [0; 4]]),
        PieceKind::S => (3, [[0, 7, 7, 0], [7, 7, 0, 0], [0; 4], [0; 4]]),
    };
    Shape { cells, size }
}

/// An active tetromino: a shape matrix plus its grid anchor
///
/// The anchor is the matrix's top-left corner in grid coordinates. It is
/// signed and may legally sit outside the board as long as every filled
/// cell stays inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    shape: Shape,
    /// Anchor row of the matrix's top-left corner
    pub row: i16,
    /// Anchor column of the matrix's top-left corner
    pub col: i16,
    /// Cleared when a downward move is first refused; the piece then waits
    /// for lock processing and no longer responds to steering
    pub can_move: bool,
}

impl Piece {
    /// Spawn a piece at the top of a board `cols` wide, horizontally
    /// centered (rounding left when the widths disagree in parity)
    pub fn spawn(kind: PieceKind, cols: usize) -> Self {
        let shape = spawn_shape(kind);
        let col = cols as i16 / 2 - (shape.size() as i16 + 1) / 2;
        Self {
            kind,
            shape,
            row: 0,
            col,
            can_move: true,
        }
    }

    /// The current shape matrix
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Matrix side length
    pub fn size(&self) -> usize {
        self.shape.size()
    }

    /// Shift the anchor by (d_col, d_row) without any validity check
    pub fn offset_by(&mut self, d_col: i16, d_row: i16) {
        self.col += d_col;
        self.row += d_row;
    }

    /// A candidate rotated a quarter turn clockwise at the same anchor
    pub fn rotated(&self) -> Piece {
        Piece {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }
}
