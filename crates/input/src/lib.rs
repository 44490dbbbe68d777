//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. The engine
//! knows nothing about keys; this crate is the only place they appear.

pub mod map;

pub use bit_tetris_types as types;

pub use map::{handle_key_event, should_quit};
