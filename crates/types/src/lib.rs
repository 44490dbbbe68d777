//! Core types module - shared data structures and constants
//!
//! Pure data types with no external dependencies. They are used by the rule
//! engine, the input mapping and the terminal view alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! Pieces spawn fully above the visible board, so piece anchors are signed.
//!
//! # Shape Order
//!
//! The seven shapes are indexed in a fixed order that the engine relies on
//! when it draws a random shape: I, O, T, J, L, S, Z.
//!
//! # Examples
//!
//! ```
//! use bit_tetris_types::{ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = ShapeKind::from_index(4).unwrap();
//! assert_eq!(kind, ShapeKind::L);
//! assert_eq!(kind.index(), 4);
//! assert_eq!(ShapeKind::from_index(7), None);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of distinct shapes in the shape table
pub const SHAPE_COUNT: u8 = 7;

/// Gravity period of the terminal runner in milliseconds
///
/// The engine itself has no clock: one call to `tick` is one gravity step.
pub const TICK_MS: u32 = 500;

/// The seven tetromino identities, in table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl ShapeKind {
    /// All kinds in table order
    pub const ALL: [ShapeKind; SHAPE_COUNT as usize] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Position of this kind in the shape table
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kind stored at `index` in the shape table
    ///
    /// Returns `None` for an index outside `0..SHAPE_COUNT`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Commands the input collaborator can issue to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
    /// Advance one gravity step
    Tick,
    Restart,
}
