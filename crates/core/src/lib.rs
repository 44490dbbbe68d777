//! Core game logic - a bit-packed Tetris rule engine
//!
//! Pure and deterministic: no I/O, no clock, no global state. Randomness
//! comes in through [`RandomSource`], so a seed (or a scripted closure)
//! replays a game exactly.
//!
//! # Module Structure
//!
//! - [`bits`]: packed one-bit-per-cell grid
//! - [`board`]: 10x20 locked-cell board with row shifting and line clearing
//! - [`shape`]: `u16` shape encoding, shape table and rotation
//! - [`piece`]: the active piece and horizontal overhang correction
//! - [`rng`]: randomness source trait and a seeded LCG
//! - [`config`]: rule options (rotation scope, move policy)
//! - [`game`]: tick state machine and player commands
//! - [`error`]: errors for out-of-range queries
//!
//! # Rules
//!
//! - Gravity is one row per [`Game::tick`]; there is no lock delay.
//! - A grounded piece locks on the next tick, full rows are removed and a
//!   random piece spawns fully above the board in a random orientation.
//! - Moves and rotations only push the piece back inside the side walls;
//!   see [`MovePolicy`] to refuse moves into locked cells instead.
//! - No scoring, levels or wall kicks.
//!
//! # Example
//!
//! ```
//! use bit_tetris_core::{Game, TickOutcome};
//!
//! let mut game = Game::new(12345);
//! game.move_right();
//! game.rotate_cw();
//!
//! // A piece starts above the board and falls one row per tick.
//! let start = game.active().y;
//! assert_eq!(game.tick(), TickOutcome::Fell);
//! assert_eq!(game.active().y, start + 1);
//!
//! // Renderers read the board through the effective-cell overlay.
//! assert_eq!(game.effective_cell(0, 19), Ok(false));
//! ```

pub mod bits;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod piece;
pub mod rng;
pub mod shape;

pub use bit_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use config::{GameConfig, MovePolicy, RotationScope};
pub use error::{Error, Result};
pub use game::{Game, GamePhase, TickOutcome};
pub use piece::{ActivePiece, Turn};
pub use rng::{RandomSource, SimpleRng};
pub use shape::{Shape, ShapeTable};
