//! Terminal layer for the runner binary.
//!
//! `view` composes a snapshot into styled tiles without any I/O, so it can
//! be unit-tested; `renderer` owns raw mode and flushes the tiles with
//! crossterm. The core library never touches this module.

pub mod renderer;
pub mod view;

pub use renderer::TerminalRenderer;
pub use view::{Frame, GameView, Tile};
