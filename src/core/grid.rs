//! Grid module - the board matrix and its primitive operations
//!
//! Cells are stored in a flat row-major Vec for cache locality. Coordinates
//! are (row, col) with row 0 at the top, signed so that a piece anchor may
//! sit outside the board while its filled cells stay inside. The grid stamps
//! and erases whole piece footprints and classifies why a footprint does not
//! fit; everything above that (locking, scoring, spawning) belongs to the
//! game state machine.

use arrayvec::ArrayVec;

use crate::core::piece::Piece;
use crate::types::{Collision, GameError, EMPTY, MAX_DIM, MIN_COLS, MIN_ROWS};

/// The playfield matrix, `rows` x `cols` cell tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of cell tags, row-major order (row * cols + col)
    cells: Vec<u8>,
}

impl Grid {
    /// Create an empty grid
    ///
    /// Boards too small for a piece are rejected, as are edges beyond
    /// [`MAX_DIM`]: coordinates travel as `i16`, so a larger board would
    /// wrap the bounds checks.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GameError> {
        if rows < MIN_ROWS || cols < MIN_COLS || rows > MAX_DIM || cols > MAX_DIM {
            return Err(GameError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![EMPTY; rows * cols],
        })
    }

    /// Calculate flat index from signed (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: i16, col: i16) -> Option<usize> {
        if row < 0 || row >= self.rows as i16 || col < 0 || col >= self.cols as i16 {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the tag at (row, col), or `None` when out of bounds
    pub fn cell(&self, row: i16, col: i16) -> Option<u8> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set the tag at (row, col); returns false when out of bounds
    pub fn set(&mut self, row: i16, col: i16, tag: u8) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = tag;
                true
            }
            None => false,
        }
    }

    /// Write a piece's footprint into the grid
    ///
    /// The caller has already validated the placement via [`collides`];
    /// stamping does not re-check it.
    ///
    /// [`collides`]: Grid::collides
    pub fn stamp(&mut self, piece: &Piece) {
        let tag = piece.kind.tag();
        for (dr, dc, _) in piece.shape().cells() {
            if let Some(idx) = self.index(piece.row + dr as i16, piece.col + dc as i16) {
                self.cells[idx] = tag;
            }
        }
    }

    /// Remove a piece's footprint from the grid
    ///
    /// Only the piece's own filled cells are cleared, so settled neighbours
    /// are untouched.
    pub fn erase(&mut self, piece: &Piece) {
        for (dr, dc, _) in piece.shape().cells() {
            if let Some(idx) = self.index(piece.row + dr as i16, piece.col + dc as i16) {
                self.cells[idx] = EMPTY;
            }
        }
    }

    /// Classify the first violation of a candidate placement
    ///
    /// Scans the shape matrix in row-major order against a grid that must
    /// not contain the candidate's own footprint. Per cell the checks run
    /// left wall, right wall, floor, occupied; cells above the top edge are
    /// skipped.
    pub fn collides(&self, piece: &Piece) -> Collision {
        for (dr, dc, _) in piece.shape().cells() {
            let row = piece.row + dr as i16;
            let col = piece.col + dc as i16;
            if col < 0 {
                return Collision::LeftWall;
            }
            if col >= self.cols as i16 {
                return Collision::RightWall;
            }
            if row >= self.rows as i16 {
                return Collision::Floor;
            }
            if row < 0 {
                continue;
            }
            if self.cells[row as usize * self.cols + col as usize] != EMPTY {
                return Collision::BlockedCell;
            }
        }
        Collision::None
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.rows {
            return false;
        }
        let start = row * self.cols;
        self.cells[start..start + self.cols]
            .iter()
            .all(|&tag| tag != EMPTY)
    }

    /// Delete a row: everything above shifts down one row and a fresh empty
    /// row appears at the top. Rows below are untouched.
    pub fn delete_row(&mut self, row: usize) {
        if row >= self.rows {
            return;
        }
        // copy_within handles the overlapping ranges safely
        self.cells.copy_within(0..row * self.cols, self.cols);
        self.cells[..self.cols].fill(EMPTY);
    }

    /// Delete every full row, scanning top to bottom in one pass
    ///
    /// Returns the indices of the deleted rows in scan order. A single lock
    /// completes at most four rows, which bounds the result.
    pub fn sweep_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared = ArrayVec::new();
        for row in 0..self.rows {
            if self.is_row_full(row) {
                self.delete_row(row);
                cleared.push(row);
            }
        }
        cleared
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Create from a 2D vector for testing (converts to flat storage)
    #[cfg(test)]
    pub fn from_rows(rows_2d: Vec<Vec<u8>>) -> Self {
        let rows = rows_2d.len();
        let cols = rows_2d[0].len();
        assert!(rows_2d.iter().all(|row| row.len() == cols));

        let mut grid = Grid::new(rows, cols).unwrap();
        for (row, tags) in rows_2d.iter().enumerate() {
            for (col, &tag) in tags.iter().enumerate() {
                grid.cells[row * cols + col] = tag;
            }
        }
        grid
    }

    /// Convert to a 2D vector for testing/display
    #[cfg(test)]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows)
            .map(|row| {
                let start = row * self.cols;
                self.cells[start..start + self.cols].to_vec()
            })
            .collect()
    }
}
