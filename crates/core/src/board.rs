//! Board module - the grid of locked cells
//!
//! The board is a 10x20 grid where each cell is either locked (filled) or
//! empty, stored one bit per cell in a [`BitGrid`].
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//!
//! The active piece is never stored here; see `Game::effective_cell` for the
//! overlay of the falling piece onto this grid.

use arrayvec::ArrayVec;

use crate::bits::BitGrid;
use crate::error::{Error, Result};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices removed by one clearing pass, in the order they were found
pub type ClearedRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// The locked-cell grid
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Board {
    bits: BitGrid,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            bits: BitGrid::new(),
        }
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Whether `(x, y)` lies on the board
    #[inline(always)]
    pub fn in_bounds(x: i8, y: i8) -> bool {
        x >= 0 && (x as usize) < WIDTH && y >= 0 && (y as usize) < HEIGHT
    }

    /// Locked state of the cell at `(x, y)`
    pub fn get(&self, x: i8, y: i8) -> Result<bool> {
        if !Self::in_bounds(x, y) {
            return Err(Error::OutOfRange { x, y });
        }
        Ok(self.bits.get(x as usize, y as usize))
    }

    /// Lock or clear exactly one cell
    pub fn set(&mut self, x: i8, y: i8, locked: bool) -> Result<()> {
        if !Self::in_bounds(x, y) {
            return Err(Error::OutOfRange { x, y });
        }
        self.bits.set(x as usize, y as usize, locked);
        Ok(())
    }

    /// Unchecked read for loops whose ranges are correct by construction
    #[inline(always)]
    pub fn get_unchecked(&self, x: usize, y: usize) -> bool {
        self.bits.get(x, y)
    }

    /// Unchecked write for loops whose ranges are correct by construction
    #[inline(always)]
    pub fn set_unchecked(&mut self, x: usize, y: usize, locked: bool) {
        self.bits.set(x, y, locked);
    }

    /// True when `(x, y)` is on the board and locked; off-board reads as empty
    #[inline]
    pub fn is_locked(&self, x: i8, y: i8) -> bool {
        Self::in_bounds(x, y) && self.bits.get(x as usize, y as usize)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        (0..WIDTH).all(|x| self.get_unchecked(x, y))
    }

    /// Remove row `from_row`: every row above it moves down one step and
    /// row 0 becomes empty. Rows below `from_row` are untouched.
    pub fn shift_rows_down(&mut self, from_row: u8) -> Result<()> {
        if from_row as usize >= HEIGHT {
            return Err(Error::RowOutOfRange(from_row));
        }
        self.shift_rows_down_unchecked(from_row as usize);
        Ok(())
    }

    fn shift_rows_down_unchecked(&mut self, from_row: usize) {
        for y in (1..=from_row).rev() {
            for x in 0..WIDTH {
                let above = self.get_unchecked(x, y - 1);
                self.set_unchecked(x, y, above);
            }
        }
        for x in 0..WIDTH {
            self.set_unchecked(x, 0, false);
        }
    }

    /// Clear all full rows, scanning bottom to top.
    ///
    /// After a removal the same row index is tested again, since the row
    /// above has just moved into it. Returns the index of every removal.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut y = HEIGHT;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.shift_rows_down_unchecked(row);
                // At most HEIGHT rows can be full, and each pass removes one.
                cleared.push(row as u8);
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Number of locked cells
    pub fn count_filled(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Raw packed storage (row-major, MSB first)
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_bytes()
    }

    /// Build a board from text rows, `#` locked and anything else empty.
    ///
    /// The rows are placed at the bottom of the board.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(rows.len() <= HEIGHT);
        let mut board = Self::new();
        let top = HEIGHT - rows.len();
        for (i, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().take(WIDTH).enumerate() {
                board.bits.set(x, top + i, ch == '#');
            }
        }
        board
    }

    #[cfg(test)]
    fn row_string(&self, y: usize) -> String {
        (0..WIDTH)
            .map(|x| if self.bits.get(x, y) { '#' } else { '.' })
            .collect()
    }
}
