//! Core types shared across the crate
//! This module contains pure data types with no external dependencies

use std::error::Error;
use std::fmt;

/// Tag for an empty grid cell
pub const EMPTY: u8 = 0;

/// Smallest board able to hold every piece footprint
pub const MIN_ROWS: usize = 4;
pub const MIN_COLS: usize = 4;

/// Largest board edge; grid coordinates travel as signed 16-bit values
pub const MAX_DIM: usize = i16::MAX as usize;

/// Side length of the largest shape matrix (the I piece)
pub const MAX_SHAPE: usize = 4;

/// Line clear scoring (Classic rules), indexed by rows cleared in one lock
pub const LINE_SCORES: [u64; 5] = [0, 40, 100, 300, 1200];

/// Lines needed to leave `level` is `LINES_PER_LEVEL * (level + 1)`
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity delays for levels 0..=9 (milliseconds)
pub const LEVEL_DELAYS_MS: [u64; 10] = [799, 715, 632, 549, 466, 383, 300, 216, 133, 100];

/// Tetromino piece kinds
///
/// The discriminants double as the non-zero cell tags stamped into the grid,
/// so a filled cell always names the kind that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    O = 1,
    I = 2,
    T = 3,
    J = 4,
    L = 5,
    Z = 6,
    S = 7,
}

impl PieceKind {
    /// Every kind exactly once, in tag order; one bag holds this set
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::Z,
        PieceKind::S,
    ];

    /// Cell tag written into the grid for this kind
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Recover a kind from a grid cell tag
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(PieceKind::O),
            2 => Some(PieceKind::I),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::J),
            5 => Some(PieceKind::L),
            6 => Some(PieceKind::Z),
            7 => Some(PieceKind::S),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "O",
            PieceKind::I => "I",
            PieceKind::T => "T",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::Z => "Z",
            PieceKind::S => "S",
        }
    }
}

/// Why a candidate placement was rejected, or `None` when it fits
///
/// Classification follows a row-major scan of the shape matrix: the first
/// violating cell decides, and within a single cell the precedence is left
/// wall, right wall, floor, occupied cell. Cells above the top edge never
/// collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    None,
    LeftWall,
    RightWall,
    Floor,
    BlockedCell,
}

impl Collision {
    /// True when the placement fits
    pub fn is_none(self) -> bool {
        self == Collision::None
    }

    /// True for wall contacts, the only collisions a rotation may repair
    pub fn is_wall(self) -> bool {
        matches!(self, Collision::LeftWall | Collision::RightWall)
    }
}

/// Fatal construction errors
///
/// Everything after construction is a normal rejected outcome (a `false`
/// return), never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Requested board smaller than the largest piece footprint or larger
    /// than the coordinate range
    InvalidDimensions { rows: usize, cols: usize },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidDimensions { rows, cols } => write!(
                f,
                "board must be between {}x{} and {}x{}, got {}x{}",
                MIN_ROWS, MIN_COLS, MAX_DIM, MAX_DIM, rows, cols
            ),
        }
    }
}

impl Error for GameError {}
