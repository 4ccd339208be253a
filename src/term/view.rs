//! GameView: maps a `GameSnapshot` into a grid of styled text tiles.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::snapshot::GameSnapshot;
use crate::types::{EMPTY, MAX_SHAPE};

/// One terminal cell of the composed frame
///
/// `tag` selects the color: 0 draws in the default chrome color, 1..=7 in
/// the matching piece color. The renderer owns the tag-to-color mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub ch: char,
    pub tag: u8,
    pub bold: bool,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            ch: ' ',
            tag: EMPTY,
            bold: false,
        }
    }
}

/// A composed frame, row-major tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at (x, y); blank outside the frame
    pub fn get(&self, x: usize, y: usize) -> Tile {
        if x >= self.width || y >= self.height {
            return Tile::default();
        }
        self.tiles[y * self.width + x]
    }

    /// One row of tiles, for the renderer's flush loop
    pub fn row(&self, y: usize) -> &[Tile] {
        let start = y * self.width;
        &self.tiles[start..start + self.width]
    }

    fn put(&mut self, x: usize, y: usize, tile: Tile) {
        if x < self.width && y < self.height {
            self.tiles[y * self.width + x] = tile;
        }
    }

    fn put_str(&mut self, x: usize, y: usize, text: &str, bold: bool) {
        for (idx, ch) in text.chars().enumerate() {
            self.put(x + idx, y, Tile { ch, tag: EMPTY, bold });
        }
    }

    /// Collect a row as plain text, styling dropped (test helper)
    #[cfg(test)]
    pub fn row_text(&self, y: usize) -> String {
        self.row(y).iter().map(|tile| tile.ch).collect()
    }
}

/// Board cells are drawn two columns wide to even out the glyph aspect
const CELL_W: usize = 2;
/// Width of the score/next side panel in tiles
const PANEL_W: usize = 14;
/// Gap between the board frame and the panel
const GUTTER: usize = 2;
/// Panel row where the NEXT preview matrix starts
const PREVIEW_Y: usize = 11;

/// Pure renderer from snapshot to frame
#[derive(Debug, Default, Clone, Copy)]
pub struct GameView;

impl GameView {
    /// Compose the whole scene: bordered board, side panel, overlays
    pub fn render(&self, snapshot: &GameSnapshot) -> Frame {
        let board_w = snapshot.cols * CELL_W + 2;
        let board_h = snapshot.rows + 2;
        // Tall enough for the panel even on a minimum-height board: the
        // preview of the largest shape must never clip
        let panel_h = PREVIEW_Y + MAX_SHAPE + 1;
        let mut frame = Frame::new(board_w + GUTTER + PANEL_W, board_h.max(panel_h));

        self.draw_border(&mut frame, board_w, board_h);
        self.draw_cells(&mut frame, snapshot);
        self.draw_panel(&mut frame, snapshot, board_w + GUTTER);

        if snapshot.paused {
            self.draw_banner(&mut frame, board_w, board_h, "PAUSED");
        } else if snapshot.game_over {
            self.draw_banner(&mut frame, board_w, board_h, "GAME OVER");
        }

        frame
    }

    fn draw_border(&self, frame: &mut Frame, w: usize, h: usize) {
        let line = |ch| Tile {
            ch,
            tag: EMPTY,
            bold: false,
        };
        frame.put(0, 0, line('┌'));
        frame.put(w - 1, 0, line('┐'));
        frame.put(0, h - 1, line('└'));
        frame.put(w - 1, h - 1, line('┘'));
        for x in 1..w - 1 {
            frame.put(x, 0, line('─'));
            frame.put(x, h - 1, line('─'));
        }
        for y in 1..h - 1 {
            frame.put(0, y, line('│'));
            frame.put(w - 1, y, line('│'));
        }
    }

    fn draw_cells(&self, frame: &mut Frame, snapshot: &GameSnapshot) {
        for row in 0..snapshot.rows {
            for col in 0..snapshot.cols {
                let tag = snapshot.cell(row, col);
                let ch = if tag == EMPTY { ' ' } else { '█' };
                for dx in 0..CELL_W {
                    frame.put(
                        1 + col * CELL_W + dx,
                        1 + row,
                        Tile {
                            ch,
                            tag,
                            bold: false,
                        },
                    );
                }
            }
        }
    }

    fn draw_panel(&self, frame: &mut Frame, snapshot: &GameSnapshot, x: usize) {
        frame.put_str(x, 1, "SCORE", true);
        frame.put_str(x, 2, &snapshot.score.to_string(), false);
        frame.put_str(x, 4, "LEVEL", true);
        frame.put_str(x, 5, &snapshot.level.to_string(), false);
        frame.put_str(x, 7, "LINES", true);
        frame.put_str(x, 8, &snapshot.lines.to_string(), false);

        frame.put_str(x, PREVIEW_Y - 1, "NEXT", true);
        let shape = snapshot.next.shape;
        for row in 0..shape.size() {
            for col in 0..shape.size() {
                let tag = shape.cell(row, col);
                if tag == EMPTY {
                    continue;
                }
                for dx in 0..CELL_W {
                    frame.put(
                        x + col * CELL_W + dx,
                        PREVIEW_Y + row,
                        Tile {
                            ch: '█',
                            tag,
                            bold: false,
                        },
                    );
                }
            }
        }
    }

    fn draw_banner(&self, frame: &mut Frame, board_w: usize, board_h: usize, text: &str) {
        let x = (board_w.saturating_sub(text.len())) / 2;
        let y = board_h / 2;
        frame.put_str(x, y, text, true);
    }
}
