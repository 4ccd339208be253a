//! Engine module - the thread-safe boundary around a `Game`
//!
//! Input handlers and the gravity clock mutate the same board, and every
//! mutation is an erase/collide/stamp sequence that must not interleave.
//! One mutex serializes all of it; a condvar doubles as the clock's alarm
//! so a sleeping tick loop wakes the instant quit is requested.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Instant;

use crate::core::game::Game;
use crate::core::snapshot::GameSnapshot;
use crate::types::GameError;

struct Shared {
    game: Mutex<Game>,
    clock: Condvar,
}

/// Cloneable handle to one shared game
///
/// Every method takes the lock for its whole duration, so commands, ticks
/// and snapshot reads never observe a half-applied move.
#[derive(Clone)]
pub struct Engine {
    shared: Arc<Shared>,
}

impl Engine {
    /// Shared game with a clock-derived seed
    pub fn new(rows: usize, cols: usize) -> Result<Self, GameError> {
        Ok(Self::from_game(Game::new(rows, cols)?))
    }

    /// Shared game with a reproducible piece sequence
    pub fn with_seed(rows: usize, cols: usize, seed: u32) -> Result<Self, GameError> {
        Ok(Self::from_game(Game::with_seed(rows, cols, seed)?))
    }

    fn from_game(game: Game) -> Self {
        Self {
            shared: Arc::new(Shared {
                game: Mutex::new(game),
                clock: Condvar::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Game> {
        // A panic elsewhere cannot leave the game half-mutated: every
        // operation restores the footprint before returning
        self.shared
            .game
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run the gravity clock until quit
    ///
    /// Sleeps the level-derived delay between ticks, on the condvar so a
    /// `request_quit` (or a delay change) interrupts the wait immediately.
    /// A zero delay means gravity is off and the loop parks until notified.
    pub fn run_clock(&self) {
        let mut game = self.lock();
        loop {
            if game.is_quit() {
                return;
            }
            let delay = game.tick_delay();
            if delay.is_zero() {
                game = self
                    .shared
                    .clock
                    .wait(game)
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                continue;
            }
            // One tick per deadline: notified or spurious wakeups inside
            // the window sleep only the remainder, so frequent commands
            // cannot postpone gravity
            let deadline = Instant::now() + delay;
            loop {
                if game.is_quit() {
                    return;
                }
                if game.tick_delay().is_zero() {
                    // Gravity switched off mid-window; go park
                    break;
                }
                let now = Instant::now();
                if now >= deadline {
                    game.step();
                    break;
                }
                let (guard, _) = self
                    .shared
                    .clock
                    .wait_timeout(game, deadline - now)
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                game = guard;
            }
        }
    }

    /// Advance one logical frame; for callers that own the pacing
    pub fn step(&self) {
        self.lock().step();
    }

    pub fn move_left(&self) -> bool {
        self.lock().move_left()
    }

    pub fn move_right(&self) -> bool {
        self.lock().move_right()
    }

    pub fn move_down(&self) -> bool {
        self.lock().move_down()
    }

    pub fn rotate(&self) -> bool {
        self.lock().rotate()
    }

    pub fn hard_drop(&self) -> bool {
        self.lock().hard_drop()
    }

    pub fn toggle_pause(&self) {
        self.lock().toggle_pause();
    }

    pub fn reset(&self) {
        self.lock().reset();
        // Level (and therefore the delay) changed
        self.shared.clock.notify_all();
    }

    /// Set the terminal quit flag and wake the clock
    pub fn request_quit(&self) {
        self.lock().request_quit();
        self.shared.clock.notify_all();
    }

    /// Turn automatic falling on or off and wake the clock
    pub fn set_gravity(&self, on: bool) {
        self.lock().set_gravity(on);
        self.shared.clock.notify_all();
    }

    /// Copy one coherent view of the game
    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().snapshot()
    }

    /// Refresh `out` in place, reusing its buffers
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.lock().snapshot_into(out);
    }

    pub fn cell(&self, row: i16, col: i16) -> Option<u8> {
        self.lock().cell(row, col)
    }

    pub fn score(&self) -> u64 {
        self.lock().score()
    }

    pub fn level(&self) -> u32 {
        self.lock().level()
    }

    pub fn total_lines(&self) -> u32 {
        self.lock().total_lines()
    }

    pub fn is_paused(&self) -> bool {
        self.lock().is_paused()
    }

    pub fn is_game_over(&self) -> bool {
        self.lock().is_game_over()
    }

    pub fn is_quit(&self) -> bool {
        self.lock().is_quit()
    }

    pub fn size(&self) -> (usize, usize) {
        self.lock().size()
    }

    pub fn seed(&self) -> u32 {
        self.lock().seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_handle_clones_share_one_game() {
        let engine = Engine::with_seed(20, 10, 7).unwrap();
        let other = engine.clone();

        assert!(engine.move_down());
        assert_eq!(other.score(), 1);

        other.toggle_pause();
        assert!(engine.is_paused());
    }

    #[test]
    fn test_commands_from_another_thread() {
        let engine = Engine::with_seed(20, 10, 7).unwrap();
        let remote = engine.clone();

        let handle = thread::spawn(move || {
            remote.move_down();
            remote.move_down();
        });
        handle.join().unwrap();

        assert_eq!(engine.score(), 2);
    }

    #[test]
    fn test_clock_exits_promptly_on_quit() {
        let engine = Engine::with_seed(20, 10, 7).unwrap();
        let clock = {
            let engine = engine.clone();
            thread::spawn(move || engine.run_clock())
        };

        // Level 0 delay is 799ms; quitting must not wait it out
        thread::sleep(Duration::from_millis(20));
        let start = std::time::Instant::now();
        engine.request_quit();
        clock.join().unwrap();
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_clock_with_gravity_off_never_steps() {
        let engine = Engine::with_seed(20, 10, 7).unwrap();
        engine.set_gravity(false);
        let row = engine.snapshot().active.row;

        let clock = {
            let engine = engine.clone();
            thread::spawn(move || engine.run_clock())
        };
        thread::sleep(Duration::from_millis(60));

        assert_eq!(engine.snapshot().active.row, row);
        engine.request_quit();
        clock.join().unwrap();
    }

    #[test]
    fn test_snapshot_is_internally_consistent_under_load() {
        let engine = Engine::with_seed(20, 10, 7).unwrap();
        let writer = {
            let engine = engine.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    engine.move_left();
                    engine.rotate();
                    engine.move_right();
                    engine.step();
                    if engine.is_game_over() {
                        engine.reset();
                    }
                }
            })
        };

        let mut snapshot = engine.snapshot();
        for _ in 0..500 {
            engine.snapshot_into(&mut snapshot);
            assert_eq!(snapshot.cells.len(), snapshot.rows * snapshot.cols);
            // A coherent view always holds the active footprint in full;
            // a torn erase/stamp sequence would leave holes
            if !snapshot.game_over {
                for (dr, dc, tag) in snapshot.active.shape.cells() {
                    let row = snapshot.active.row + dr as i16;
                    let col = snapshot.active.col + dc as i16;
                    if row >= 0 && col >= 0 {
                        assert_eq!(snapshot.cell(row as usize, col as usize), tag);
                    }
                }
            }
        }
        writer.join().unwrap();
    }
}
