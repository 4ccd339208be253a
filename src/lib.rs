//! tetrion - a falling-block puzzle engine.
//!
//! The crate splits into a pure core (`core`, `types`), a thread-safe
//! handle that serializes commands and the gravity clock (`engine`), and a
//! small terminal layer (`term`) used by the bundled runner binary.

pub mod core;
pub mod engine;
pub mod term;
pub mod types;

pub use engine::Engine;
