//! Terminal tetrion runner (default binary).
//!
//! Gravity runs on a clock thread inside the engine handle; this loop only
//! polls the keyboard and redraws snapshots, so input latency never depends
//! on the level's tick delay.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use tetrion::core::GameSnapshot;
use tetrion::term::{GameView, TerminalRenderer};
use tetrion::Engine;

const BOARD_ROWS: usize = 20;
const BOARD_COLS: usize = 10;

/// Keyboard poll period, which is also the render cadence
const FRAME_MS: u64 = 33;

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let engine = Engine::new(BOARD_ROWS, BOARD_COLS)?;
    let clock = {
        let engine = engine.clone();
        thread::spawn(move || engine.run_clock())
    };

    let view = GameView;
    let mut snapshot = GameSnapshot::default();

    while !engine.is_quit() {
        engine.snapshot_into(&mut snapshot);
        term.draw(&view.render(&snapshot))?;

        if event::poll(Duration::from_millis(FRAME_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    engine.request_quit();
                    continue;
                }
                match key.code {
                    KeyCode::Left => {
                        engine.move_left();
                    }
                    KeyCode::Right => {
                        engine.move_right();
                    }
                    KeyCode::Down => {
                        engine.move_down();
                    }
                    KeyCode::Up => {
                        engine.rotate();
                    }
                    KeyCode::Char(' ') => {
                        engine.hard_drop();
                    }
                    KeyCode::Char('p') => engine.toggle_pause(),
                    KeyCode::Char('r') => engine.reset(),
                    KeyCode::Char('q') | KeyCode::Esc => engine.request_quit(),
                    _ => {}
                }
            }
        }
    }

    // The quit flag wakes the clock out of its delay sleep
    let _ = clock.join();
    Ok(())
}
