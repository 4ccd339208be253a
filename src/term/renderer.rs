//! TerminalRenderer: flushes a composed frame to a real terminal.
//!
//! Owns the raw-mode lifecycle and the tag-to-color mapping; the frame
//! itself comes from the pure `view` module. Drawing is a full redraw per
//! frame, which is plenty for a board this size.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::term::view::Frame;
use crate::types::PieceKind;

pub struct TerminalRenderer {
    stdout: io::Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Queue the whole frame and flush it once
    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.stdout.queue(cursor::MoveTo(0, 0))?;

        let mut current: Option<(u8, bool)> = None;
        for y in 0..frame.height() {
            self.stdout.queue(cursor::MoveTo(0, y as u16))?;
            for tile in frame.row(y) {
                let style = (tile.tag, tile.bold);
                if current != Some(style) {
                    self.apply_style(tile.tag, tile.bold)?;
                    current = Some(style);
                }
                self.stdout.queue(Print(tile.ch))?;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        Ok(())
    }

    fn apply_style(&mut self, tag: u8, bold: bool) -> Result<()> {
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(SetForegroundColor(tag_color(tag)))?;
        if bold {
            self.stdout.queue(SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Classic piece palette; empty cells and chrome draw in the default white
fn tag_color(tag: u8) -> Color {
    match PieceKind::from_tag(tag) {
        Some(PieceKind::O) => Color::Yellow,
        Some(PieceKind::I) => Color::Cyan,
        Some(PieceKind::T) => Color::Magenta,
        Some(PieceKind::J) => Color::Blue,
        Some(PieceKind::L) => Color::DarkYellow,
        Some(PieceKind::Z) => Color::Red,
        Some(PieceKind::S) => Color::Green,
        None => Color::White,
    }
}
