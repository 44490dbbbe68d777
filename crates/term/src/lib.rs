//! Terminal rendering module.
//!
//! Read-only collaborator of the engine: [`game_view`] turns a game into
//! text lines using only the effective-cell query, and [`renderer`] flushes
//! those lines to a real terminal.

pub mod game_view;
pub mod renderer;

pub use bit_tetris_core as core;
pub use bit_tetris_types as types;

pub use game_view::{render_shape, GameView};
pub use renderer::{encode_frame_into, TerminalRenderer};
