//! Scoring module - Classic line scoring, level progression, gravity speed
//!
//! Points for a clear are the classic table value times (level + 1). The
//! level advances when total lines reach 10 * (level + 1), and each level
//! shortens the gravity delay.

use std::time::Duration;

use crate::types::{LEVEL_DELAYS_MS, LINES_PER_LEVEL, LINE_SCORES};

/// Points for clearing `lines` rows in one lock
/// lines: number of rows cleared together (1-4)
/// level: current level (0-based)
pub fn clear_points(lines: usize, level: u32) -> u64 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines] * (level as u64 + 1)
}

/// Total lines needed to leave `level`
pub fn level_up_threshold(level: u32) -> u32 {
    LINES_PER_LEVEL * (level + 1)
}

/// Gravity delay between ticks at `level`
///
/// Levels 0-9 follow the delay table; past that the delay drops in coarse
/// bands down to a 17ms floor from level 29 on.
pub fn tick_delay(level: u32) -> Duration {
    let ms = match level {
        0..=9 => LEVEL_DELAYS_MS[level as usize],
        10..=12 => 83,
        13..=15 => 67,
        16..=18 => 50,
        19..=28 => 33,
        _ => 17,
    };
    Duration::from_millis(ms)
}
