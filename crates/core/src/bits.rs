//! Packed bit grid backing the board.
//!
//! Cells are stored row-major, one bit per cell, eight cells per byte with
//! the most significant bit first: cell `(x, y)` is bit `7 - i % 8` of byte
//! `i / 8`, where `i = y * BOARD_WIDTH + x`.

use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Number of cells on the board
pub const CELL_COUNT: usize = BOARD_WIDTH as usize * BOARD_HEIGHT as usize;

const BYTE_COUNT: usize = CELL_COUNT.div_ceil(8);

/// Fixed-size bit set covering every board cell.
///
/// No bounds checks beyond debug assertions: callers validate coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitGrid {
    bytes: [u8; BYTE_COUNT],
}

impl BitGrid {
    /// Create a grid with every bit cleared
    pub const fn new() -> Self {
        Self {
            bytes: [0; BYTE_COUNT],
        }
    }

    /// Linear cell index of `(x, y)`
    #[inline(always)]
    pub fn index(x: usize, y: usize) -> usize {
        debug_assert!(x < BOARD_WIDTH as usize && y < BOARD_HEIGHT as usize);
        y * BOARD_WIDTH as usize + x
    }

    #[inline(always)]
    pub fn get_index(&self, index: usize) -> bool {
        debug_assert!(index < CELL_COUNT);
        (self.bytes[index / 8] >> (7 - index % 8)) & 1 == 1
    }

    #[inline(always)]
    pub fn set_index(&mut self, index: usize, value: bool) {
        debug_assert!(index < CELL_COUNT);
        let mask = 1u8 << (7 - index % 8);
        if value {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.get_index(Self::index(x, y))
    }

    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        self.set_index(Self::index(x, y), value);
    }

    /// Clear every bit
    pub fn clear(&mut self) {
        self.bytes = [0; BYTE_COUNT];
    }

    /// Number of set bits
    pub fn count_ones(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }

    /// Raw packed bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for BitGrid {
    fn default() -> Self {
        Self::new()
    }
}
