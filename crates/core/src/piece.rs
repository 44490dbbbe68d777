//! Active piece - shape, orientation and anchor of the falling tetromino

use crate::shape::Shape;
use crate::types::{ShapeKind, BOARD_WIDTH};

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

/// The falling piece.
///
/// `(x, y)` is the top-left corner of the shape's bounding box on the board.
/// It is signed: pieces spawn fully above row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    pub fn new(kind: ShapeKind, shape: Shape, x: i8, y: i8) -> Self {
        Self { kind, shape, x, y }
    }

    /// Absolute board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Whether the piece covers the absolute cell `(x, y)`
    pub fn covers(&self, x: i8, y: i8) -> bool {
        match (x.checked_sub(self.x), y.checked_sub(self.y)) {
            (Some(lx), Some(ly)) => self.shape.cell(lx, ly),
            _ => false,
        }
    }

    /// Replace the shape with its rotated copy. The anchor does not move.
    pub fn rotate(&mut self, turn: Turn) {
        self.shape = match turn {
            Turn::Clockwise => self.shape.rotated_cw(),
            Turn::CounterClockwise => self.shape.rotated_ccw(),
        };
    }

    /// Nudge the anchor horizontally until every occupied cell has
    /// `0 <= x < BOARD_WIDTH`. Vertical position and locked cells are ignored.
    pub fn fix_overhang(&mut self) {
        let width = BOARD_WIDTH as i8;
        for (dx, _) in self.shape.cells() {
            while self.x + dx < 0 {
                self.x += 1;
            }
            while self.x + dx >= width {
                self.x -= 1;
            }
        }
    }
}
