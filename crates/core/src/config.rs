//! Runtime rule options

/// Where rotations are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationScope {
    /// The active piece carries its own orientation; the shape table stays
    /// canonical for the whole game.
    #[default]
    PerPiece,
    /// Rotating the active piece also overwrites its shape table slot, so
    /// later pieces of the same kind spawn in the rotated orientation.
    SharedTable,
}

/// What happens when a move or rotation lands on locked cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovePolicy {
    /// Only horizontal overhang correction; overlap with locked cells is allowed.
    #[default]
    Clamp,
    /// Undo the command if, after overhang correction, any on-board cell of
    /// the piece overlaps a locked cell.
    Reject,
}

/// Rule options for one game instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameConfig {
    pub rotation_scope: RotationScope,
    pub move_policy: MovePolicy,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rotation_scope(mut self, rotation_scope: RotationScope) -> Self {
        self.rotation_scope = rotation_scope;
        self
    }

    pub fn with_move_policy(mut self, move_policy: MovePolicy) -> Self {
        self.move_policy = move_policy;
        self
    }
}
