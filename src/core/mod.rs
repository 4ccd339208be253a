//! Core module - pure game logic with no external dependencies
//!
//! Everything in here is deterministic and free of I/O: the grid, the piece
//! geometry, the 7-bag randomizer, scoring tables and the game state
//! machine. The thread-safe boundary lives one level up in `engine`.

pub mod bag;
pub mod game;
pub mod grid;
pub mod piece;
pub mod scoring;
pub mod snapshot;

// Re-export commonly used types
pub use bag::Bag;
pub use game::Game;
pub use grid::Grid;
pub use piece::{spawn_shape, Piece, Shape};
pub use snapshot::{GameSnapshot, PieceView};
