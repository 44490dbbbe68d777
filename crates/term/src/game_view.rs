//! GameView: maps a `core::Game` into text lines.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Game, RandomSource, Shape};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Text layout of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    pub filled: char,
    pub empty: char,
    /// Show a status line under the board
    pub status: bool,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            filled: '#',
            empty: '.',
            status: true,
        }
    }
}

impl GameView {
    /// One line per board row, each cell followed by a space.
    pub fn render<R: RandomSource>(&self, game: &Game<R>) -> Vec<String> {
        let mut lines = Vec::with_capacity(BOARD_HEIGHT as usize + 1);
        for y in 0..BOARD_HEIGHT as i8 {
            let mut line = String::with_capacity(BOARD_WIDTH as usize * 2);
            for x in 0..BOARD_WIDTH as i8 {
                let filled = game.effective_cell(x, y).unwrap_or(false);
                line.push(if filled { self.filled } else { self.empty });
                line.push(' ');
            }
            lines.push(line);
        }

        if self.status {
            let status = if game.is_game_over() {
                "GAME OVER  r: restart  q: quit".to_string()
            } else {
                format!(
                    "pieces: {}  h/l move  k/j rotate  space drop",
                    game.pieces_locked()
                )
            };
            lines.push(status);
        }
        lines
    }
}

/// One line per row of the shape's bounding box
pub fn render_shape(shape: Shape) -> Vec<String> {
    let size = shape.size() as i8;
    (0..size)
        .map(|y| {
            (0..size)
                .flat_map(|x| [if shape.cell(x, y) { '#' } else { '.' }, ' '])
                .collect()
        })
        .collect()
}
