//! Game module - the tick state machine and player commands
//!
//! [`Game`] owns the whole mutable state of one game: locked board, shape
//! table, active piece and randomness source. Every operation runs to
//! completion; a host that shares a game between threads wraps the whole
//! `Game` in one mutex.
//!
//! One [`Game::tick`] is one discrete step:
//!
//! 1. If the active piece is grounded (a cell on the floor row, or a locked
//!    cell directly beneath one of its cells) it is locked into the board,
//!    full rows are cleared against the locked board only, and a new piece
//!    is spawned above the board.
//! 2. Otherwise the piece falls one row.
//!
//! A new piece always spawns entirely above row 0, so it can never overlap
//! the stack. The game ends instead when a piece locks with any cell still
//! above row 0. After that `tick` and every command are no-ops until
//! [`Game::restart`].

use log::{debug, info, trace, warn};

use crate::board::{Board, ClearedRows};
use crate::config::{GameConfig, MovePolicy, RotationScope};
use crate::error::{Error, Result};
use crate::piece::{ActivePiece, Turn};
use crate::rng::{RandomSource, SimpleRng};
use crate::shape::ShapeTable;
use crate::types::{GameAction, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, SHAPE_COUNT};

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Falling,
    GameOver,
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The piece moved down one row
    Fell,
    /// The piece locked; `cleared_rows` lists each row removal.
    /// Check [`Game::is_game_over`] afterwards: a lock above the board ends the game.
    Locked { cleared_rows: ClearedRows },
    /// The game was already over; nothing changed
    GameOver,
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct Game<R = SimpleRng> {
    board: Board,
    table: ShapeTable,
    active: ActivePiece,
    phase: GamePhase,
    config: GameConfig,
    rng: R,
    pieces_locked: u32,
}

impl Game<SimpleRng> {
    /// Create a game with default rules, driven by a seeded [`SimpleRng`]
    pub fn new(seed: u32) -> Self {
        Self::with_source(SimpleRng::new(seed), GameConfig::default())
    }
}

impl<R: RandomSource> Game<R> {
    /// Create a game drawing its randomness from `rng`.
    ///
    /// The game is initialized immediately: empty board, canonical shapes
    /// and a spawned first piece.
    pub fn with_source(rng: R, config: GameConfig) -> Self {
        let placeholder = ShapeKind::I;
        let table = ShapeTable::canonical();
        let mut game = Self {
            board: Board::new(),
            active: ActivePiece::new(placeholder, table.get(placeholder), 0, 0),
            table,
            phase: GamePhase::Falling,
            config,
            rng,
            pieces_locked: 0,
        };
        game.init();
        game
    }

    /// Reset to an empty board with canonical shapes and spawn a piece
    pub fn init(&mut self) {
        self.board.clear();
        self.table.reset();
        self.phase = GamePhase::Falling;
        self.pieces_locked = 0;
        info!("game started");
        self.spawn_piece();
    }

    /// Start over, keeping the configuration and the randomness source
    pub fn restart(&mut self) {
        info!("game restarted after {} pieces", self.pieces_locked);
        self.init();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access, for hosts that set up positions
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn shape_table(&self) -> &ShapeTable {
        &self.table
    }

    pub fn active(&self) -> ActivePiece {
        self.active
    }

    /// Replace the active piece, e.g. to set up a position.
    ///
    /// The piece is nudged back inside the side walls and lifted above the
    /// floor, so every cell it later locks lands on the board.
    pub fn set_active(&mut self, mut piece: ActivePiece) {
        piece.fix_overhang();
        let floor = BOARD_HEIGHT as i8;
        while piece.cells().any(|(_, y)| y >= floor) {
            piece.y -= 1;
        }
        trace!("active piece set to {:?} at ({}, {})", piece.kind, piece.x, piece.y);
        self.active = piece;
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Locked state of a board cell
    pub fn locked_cell(&self, x: i8, y: i8) -> Result<bool> {
        self.board.get(x, y)
    }

    /// Locked cell OR active-piece overlay at `(x, y)`.
    ///
    /// This is what renderers read; it is computed on every call.
    pub fn effective_cell(&self, x: i8, y: i8) -> Result<bool> {
        Ok(self.board.get(x, y)? || self.active.covers(x, y))
    }

    /// Cell of the shape table slot `index`; out-of-box reads as empty.
    ///
    /// Under [`RotationScope::PerPiece`] the table stays canonical, so this
    /// does not reflect the active piece's orientation. Use
    /// [`Game::active`] for that.
    pub fn shape_cell(&self, index: usize, x: i8, y: i8) -> Result<bool> {
        Ok(self.table.get_index(index)?.cell(x, y))
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_game_over() {
            return TickOutcome::GameOver;
        }

        if !self.is_grounded() {
            self.active.y += 1;
            return TickOutcome::Fell;
        }

        let overflowed = self.lock_active();
        let cleared_rows = self.board.clear_full_rows();
        if !cleared_rows.is_empty() {
            info!("cleared {} rows: {:?}", cleared_rows.len(), cleared_rows);
        }

        if overflowed {
            warn!(
                "game over: {:?} locked above the board at ({}, {})",
                self.active.kind, self.active.x, self.active.y
            );
            self.phase = GamePhase::GameOver;
        } else {
            self.spawn_piece();
        }

        TickOutcome::Locked { cleared_rows }
    }

    /// Whether the active piece rests on the floor or on a locked cell
    pub fn is_grounded(&self) -> bool {
        let floor = BOARD_HEIGHT as i8 - 1;
        self.active
            .cells()
            .any(|(x, y)| y == floor || self.board.is_locked(x, y + 1))
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.rotate(Turn::Clockwise)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate(Turn::CounterClockwise)
    }

    /// Dispatch a command from the input collaborator.
    ///
    /// Returns false if the command was refused.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::Tick => self.tick() != TickOutcome::GameOver,
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    fn shift(&mut self, dx: i8) -> bool {
        if self.is_game_over() {
            return false;
        }
        let before = self.active;
        self.active.x += dx;
        self.active.fix_overhang();
        self.settle(before)
    }

    fn rotate(&mut self, turn: Turn) -> bool {
        if self.is_game_over() {
            return false;
        }
        let before = self.active;
        self.turn_active(turn);
        self.settle(before)
    }

    /// Rotate the active piece and correct overhang, honouring the rotation scope
    fn turn_active(&mut self, turn: Turn) {
        self.active.rotate(turn);
        if self.config.rotation_scope == RotationScope::SharedTable {
            self.table.set(self.active.kind, self.active.shape);
        }
        self.active.fix_overhang();
    }

    /// Apply the move policy to a command that turned `before` into the
    /// current active piece.
    fn settle(&mut self, before: ActivePiece) -> bool {
        if self.config.move_policy == MovePolicy::Reject && self.overlaps_locked() {
            trace!(
                "rejected {:?} move to ({}, {})",
                self.active.kind,
                self.active.x,
                self.active.y
            );
            self.active = before;
            if self.config.rotation_scope == RotationScope::SharedTable {
                self.table.set(before.kind, before.shape);
            }
            return false;
        }
        true
    }

    fn overlaps_locked(&self) -> bool {
        self.active.cells().any(|(x, y)| self.board.is_locked(x, y))
    }

    /// Write the active piece into the board.
    ///
    /// Returns true if any occupied cell was above the board.
    fn lock_active(&mut self) -> bool {
        let mut overflowed = false;
        for (x, y) in self.active.cells() {
            match self.board.set(x, y, true) {
                Ok(()) => {}
                Err(Error::OutOfRange { .. }) if y < 0 => overflowed = true,
                Err(err) => warn!("dropped cell while locking: {err}"),
            }
        }
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        debug!(
            "locked {:?} at ({}, {})",
            self.active.kind, self.active.x, self.active.y
        );
        overflowed
    }

    /// Draw a new piece above the board: shape, then column, then a random
    /// number of quarter turns (three turns are done as one counter-clockwise).
    fn spawn_piece(&mut self) {
        let kind = ShapeKind::ALL[(self.rng.next_byte() % SHAPE_COUNT) as usize];
        let shape = self.table.get(kind);
        let size = shape.size();
        let x = (self.rng.next_byte() % (BOARD_WIDTH - size)) as i8;
        let y = -(size as i8);
        self.active = ActivePiece::new(kind, shape, x, y);

        match self.rng.next_byte() % 4 {
            3 => self.turn_active(Turn::CounterClockwise),
            n => {
                for _ in 0..n {
                    self.turn_active(Turn::Clockwise);
                }
            }
        }
        debug!("spawned {:?} at ({}, {})", kind, self.active.x, self.active.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    /// Source that replays `bytes` forever
    fn scripted(bytes: &[u8]) -> impl FnMut() -> u8 {
        let bytes = bytes.to_vec();
        let mut i = 0;
        move || {
            let b = bytes[i % bytes.len()];
            i += 1;
            b
        }
    }

    fn game_with(bytes: &[u8], config: GameConfig) -> Game<impl FnMut() -> u8> {
        Game::with_source(scripted(bytes), config)
    }

    #[test]
    fn test_spawn_consumes_kind_column_rotation() {
        // kind 2 (T), column 4 % 7 = 4, no rotation
        let game = game_with(&[2, 4, 0], GameConfig::default());
        let active = game.active();
        assert_eq!(active.kind, ShapeKind::T);
        assert_eq!(active.shape, Shape::canonical(ShapeKind::T));
        assert_eq!((active.x, active.y), (4, -3));
        assert_eq!(game.phase(), GamePhase::Falling);
    }

    #[test]
    fn test_spawn_four_by_four_above_board() {
        // kind 0 (I), column 13 % 6 = 1
        let game = game_with(&[0, 13, 0], GameConfig::default());
        assert_eq!((game.active().x, game.active().y), (1, -4));
    }

    #[test]
    fn test_spawn_three_turns_equals_one_ccw() {
        let game = game_with(&[3, 0, 3], GameConfig::default());
        assert_eq!(
            game.active().shape,
            Shape::canonical(ShapeKind::J).rotated_ccw()
        );
    }

    #[test]
    fn test_spawn_two_turns() {
        let game = game_with(&[6, 2, 2], GameConfig::default());
        assert_eq!(
            game.active().shape,
            Shape::canonical(ShapeKind::Z).rotated_cw().rotated_cw()
        );
    }

    #[test]
    fn test_tick_falls_one_row() {
        let mut game = game_with(&[2, 4, 0], GameConfig::default());
        let before = game.active();
        assert_eq!(game.tick(), TickOutcome::Fell);
        let after = game.active();
        assert_eq!(after.y, before.y + 1);
        assert_eq!((after.x, after.shape), (before.x, before.shape));
    }

    #[test]
    fn test_grounded_on_floor() {
        let mut game = game_with(&[2, 4, 0], GameConfig::default());
        // T's lowest cell is local row 2
        game.set_active(ActivePiece::new(
            ShapeKind::T,
            Shape::canonical(ShapeKind::T),
            4,
            17,
        ));
        assert!(game.is_grounded());
    }

    #[test]
    fn test_grounded_on_locked_cell() {
        let mut game = game_with(&[2, 4, 0], GameConfig::default());
        game.set_active(ActivePiece::new(
            ShapeKind::T,
            Shape::canonical(ShapeKind::T),
            4,
            5,
        ));
        assert!(!game.is_grounded());
        // T stem at (5, 7); block directly beneath it
        game.board_mut().set(5, 8, true).unwrap();
        assert!(game.is_grounded());
    }

    #[test]
    fn test_grounded_above_board_on_row_zero() {
        let mut game = game_with(&[2, 4, 0], GameConfig::default());
        game.board_mut().set(5, 0, true).unwrap();
        // Stem at (5, -1)
        game.set_active(ActivePiece::new(
            ShapeKind::T,
            Shape::canonical(ShapeKind::T),
            4,
            -3,
        ));
        assert!(game.is_grounded());
    }

    #[test]
    fn test_set_active_pulls_piece_inside_walls() {
        let mut game = game_with(&[2, 4, 0], GameConfig::default());
        // Horizontal I at x=8 would put two cells past the right wall
        game.set_active(ActivePiece::new(
            ShapeKind::I,
            Shape::canonical(ShapeKind::I),
            8,
            18,
        ));
        assert_eq!((game.active().x, game.active().y), (6, 18));
        assert!(game.is_grounded());
        assert!(matches!(game.tick(), TickOutcome::Locked { .. }));
        assert_eq!(game.board().count_filled(), 4);
        for x in 6..10 {
            assert_eq!(game.locked_cell(x, 19), Ok(true));
        }
    }

    #[test]
    fn test_set_active_lifts_piece_above_floor() {
        let mut game = game_with(&[2, 4, 0], GameConfig::default());
        let vertical = Shape::canonical(ShapeKind::I).rotated_cw();
        game.set_active(ActivePiece::new(ShapeKind::I, vertical, 0, 18));
        assert_eq!(game.active().y, 16);
        assert!(game.tick() != TickOutcome::Fell);
        assert_eq!(game.board().count_filled(), 4);
        for y in 16..20 {
            assert_eq!(game.locked_cell(2, y), Ok(true));
        }
    }

    #[test]
    fn test_lock_writes_piece_and_spawns() {
        let mut game = game_with(&[2, 4, 0], GameConfig::default());
        game.set_active(ActivePiece::new(
            ShapeKind::T,
            Shape::canonical(ShapeKind::T),
            4,
            17,
        ));
        let outcome = game.tick();
        assert_eq!(
            outcome,
            TickOutcome::Locked {
                cleared_rows: ClearedRows::new()
            }
        );
        assert_eq!(game.board().count_filled(), 4);
        for (x, y) in [(4, 18), (5, 18), (6, 18), (5, 19)] {
            assert_eq!(game.locked_cell(x, y), Ok(true));
        }
        assert_eq!(game.pieces_locked(), 1);
        assert_eq!(game.active().y, -3);
    }

    #[test]
    fn test_lock_clears_completed_row() {
        let mut game = game_with(&[2, 4, 0], GameConfig::default());
        // Bottom row full except column 5, and a marker above it
        for x in 0..BOARD_WIDTH as i8 {
            if x != 5 {
                game.board_mut().set(x, 19, true).unwrap();
            }
        }
        game.board_mut().set(0, 18, true).unwrap();

        game.set_active(ActivePiece::new(
            ShapeKind::T,
            Shape::canonical(ShapeKind::T),
            4,
            17,
        ));
        match game.tick() {
            TickOutcome::Locked { cleared_rows } => assert_eq!(cleared_rows.as_slice(), &[19]),
            other => panic!("unexpected outcome {:?}", other),
        }
        // T's bar and the marker dropped into row 19
        for x in 0..BOARD_WIDTH as i8 {
            let expected = matches!(x, 0 | 4 | 5 | 6);
            assert_eq!(game.locked_cell(x, 19), Ok(expected), "x = {}", x);
        }
        assert_eq!(game.board().count_filled(), 4);
    }

    #[test]
    fn test_overlay_does_not_fill_rows() {
        let mut game = game_with(&[2, 4, 0], GameConfig::default());
        // Row 5 full except 4..=6, which the floating T bar covers
        for x in 0..BOARD_WIDTH as i8 {
            if !(4..=6).contains(&x) {
                game.board_mut().set(x, 5, true).unwrap();
            }
        }
        game.set_active(ActivePiece::new(
            ShapeKind::T,
            Shape::canonical(ShapeKind::T),
            4,
            4,
        ));
        assert!((0..BOARD_WIDTH as i8).all(|x| game.effective_cell(x, 5) == Ok(true)));
        // Not grounded: the piece only overlays, nothing is cleared
        assert_eq!(game.tick(), TickOutcome::Fell);
        assert_eq!(game.board().count_filled(), 7);
    }

    #[test]
    fn test_lock_out_above_board_is_game_over() {
        let mut game = game_with(&[2, 4, 0], GameConfig::default());
        game.board_mut().set(5, 0, true).unwrap();
        game.set_active(ActivePiece::new(
            ShapeKind::T,
            Shape::canonical(ShapeKind::T),
            4,
            -3,
        ));
        assert!(matches!(game.tick(), TickOutcome::Locked { .. }));
        assert!(game.is_game_over());
        assert_eq!(game.tick(), TickOutcome::GameOver);
        assert!(!game.move_left());
        assert!(!game.rotate_cw());
    }

    #[test]
    fn test_restart_clears_game_over() {
        let mut game = game_with(&[2, 4, 0], GameConfig::default());
        game.board_mut().set(5, 0, true).unwrap();
        game.set_active(ActivePiece::new(
            ShapeKind::T,
            Shape::canonical(ShapeKind::T),
            4,
            -3,
        ));
        game.tick();
        assert!(game.is_game_over());

        assert!(game.apply_action(GameAction::Restart));
        assert_eq!(game.phase(), GamePhase::Falling);
        assert_eq!(game.board().count_filled(), 0);
        assert_eq!(game.pieces_locked(), 0);
    }

    #[test]
    fn test_move_then_overhang() {
        // L at column 0: its left box column is empty
        let mut game = game_with(&[4, 0, 0], GameConfig::default());
        assert_eq!(game.active().x, 0);
        assert!(game.move_left());
        assert_eq!(game.active().x, -1);
        assert!(game.move_left());
        // Occupied column would be at -1: pushed back
        assert_eq!(game.active().x, -1);
        assert!(game.active().cells().all(|(x, _)| x >= 0));
    }

    #[test]
    fn test_move_right_to_wall() {
        let mut game = game_with(&[2, 6, 0], GameConfig::default());
        assert_eq!(game.active().x, 6);
        for _ in 0..5 {
            game.move_right();
        }
        assert_eq!(game.active().x, 7);
        assert!(game.active().cells().all(|(x, _)| x < BOARD_WIDTH as i8));
    }

    #[test]
    fn test_per_piece_rotation_leaves_table_canonical() {
        let mut game = game_with(&[2, 4, 0], GameConfig::default());
        game.rotate_cw();
        assert_eq!(
            game.active().shape,
            Shape::canonical(ShapeKind::T).rotated_cw()
        );
        assert_eq!(game.shape_table(), &ShapeTable::canonical());
    }

    #[test]
    fn test_shared_table_rotation_persists() {
        let config = GameConfig::default().with_rotation_scope(RotationScope::SharedTable);
        let mut game = game_with(&[2, 4, 0], config);
        game.rotate_cw();
        let rotated = Shape::canonical(ShapeKind::T).rotated_cw();
        assert_eq!(game.shape_table().get(ShapeKind::T), rotated);
        assert_eq!(game.shape_cell(2, 0, 1), Ok(true));

        // Next T spawns in the rotated orientation
        game.set_active(ActivePiece::new(ShapeKind::T, rotated, 4, 17));
        game.tick();
        assert_eq!(game.active().kind, ShapeKind::T);
        assert_eq!(game.active().shape, rotated);
    }

    #[test]
    fn test_reject_policy_blocks_move_into_locked() {
        let config = GameConfig::default().with_move_policy(MovePolicy::Reject);
        let mut game = game_with(&[2, 4, 0], config);
        game.set_active(ActivePiece::new(
            ShapeKind::T,
            Shape::canonical(ShapeKind::T),
            4,
            5,
        ));
        // T bar spans x 4..=6 on row 6
        game.board_mut().set(3, 6, true).unwrap();
        assert!(!game.move_left());
        assert_eq!(game.active().x, 4);
        assert!(game.move_right());
        assert_eq!(game.active().x, 5);
    }

    #[test]
    fn test_reject_policy_restores_shared_table() {
        let config = GameConfig::default()
            .with_move_policy(MovePolicy::Reject)
            .with_rotation_scope(RotationScope::SharedTable);
        let mut game = game_with(&[2, 4, 0], config);
        game.set_active(ActivePiece::new(
            ShapeKind::T,
            Shape::canonical(ShapeKind::T),
            4,
            5,
        ));
        // Clockwise T occupies (5, 5): block it
        game.board_mut().set(5, 5, true).unwrap();
        assert!(!game.rotate_cw());
        assert_eq!(game.active().shape, Shape::canonical(ShapeKind::T));
        assert_eq!(game.shape_table(), &ShapeTable::canonical());
    }

    #[test]
    fn test_clamp_policy_allows_overlap() {
        let mut game = game_with(&[2, 4, 0], GameConfig::default());
        game.set_active(ActivePiece::new(
            ShapeKind::T,
            Shape::canonical(ShapeKind::T),
            4,
            5,
        ));
        game.board_mut().set(3, 6, true).unwrap();
        assert!(game.move_left());
        assert_eq!(game.active().x, 3);
    }

    #[test]
    fn test_effective_cell_out_of_range() {
        let game = game_with(&[2, 4, 0], GameConfig::default());
        assert_eq!(
            game.effective_cell(10, 0),
            Err(Error::OutOfRange { x: 10, y: 0 })
        );
        assert_eq!(game.shape_cell(7, 0, 0), Err(Error::InvalidShapeIndex(7)));
    }
}
