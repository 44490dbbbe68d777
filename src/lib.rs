//! Bit-packed Tetris (workspace facade crate).
//!
//! Re-exports the member crates under one roof as
//! `bit_tetris::{core,input,term,types}`, plus the command-line options of
//! the terminal runner.

pub mod cli;

pub use bit_tetris_core as core;
pub use bit_tetris_input as input;
pub use bit_tetris_term as term;
pub use bit_tetris_types as types;
