//! Error type for the rule engine.
//!
//! Every variant is a contract violation by the caller. Nothing here is
//! retryable: the engine never fails on its own while driven through
//! `tick` and the move/rotate commands.

use thiserror::Error;

/// Errors surfaced by checked accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A board coordinate outside `[0, BOARD_WIDTH) x [0, BOARD_HEIGHT)`.
    #[error("board coordinate ({x}, {y}) is out of range")]
    OutOfRange { x: i8, y: i8 },

    /// A row index outside `[0, BOARD_HEIGHT)`.
    #[error("row {0} is out of range")]
    RowOutOfRange(u8),

    /// A shape index outside the shape table.
    #[error("shape index {0} is not in the shape table")]
    InvalidShapeIndex(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
