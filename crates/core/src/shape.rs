//! Shape module - bit-encoded tetromino shapes and their geometry
//!
//! Every shape is a single `u16`:
//!
//! - bit 15 is the size tag: `1` for a 4x4 box, `0` for a 3x3 box
//! - bits 14 down to 0 hold the cells row-major, cell `(x, y)` at bit
//!   `14 - (y * size + x)`
//!
//! A 4x4 box has sixteen cells but only fifteen data bits, so its last cell
//! (3, 3) has no backing bit and always reads empty. A 3x3 box leaves bits
//! 5..0 unused; they stay zero through every rotation.
//!
//! Coordinates outside the box are a defined empty region, which lets the
//! collision and overlay code probe around a piece without special cases.

use crate::error::{Error, Result};
use crate::types::{ShapeKind, SHAPE_COUNT};

/// Size tag bit (set for 4x4 shapes)
pub const SIZE_TAG: u16 = 1 << 15;

/// Bit position of cell index 0
const FIRST_CELL_BIT: i16 = 14;

/// Canonical encodings, in table order I, O, T, J, L, S, Z.
///
/// ```text
/// I  ....   O  ....   T  ...   J  .#.   L  .#.   S  .##   Z  ...
///    ####      .##.      ###      .#.      .#.      ##.      ##.
///    ....      .##.      .#.      ##.      .##      ...      .##
///    ...
/// ```
pub const CANONICAL_CODES: [u16; SHAPE_COUNT as usize] =
    [0x8780, 0x8330, 0x0E80, 0x2580, 0x24C0, 0x3C00, 0x0CC0];

/// One shape occupancy pattern together with its size tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape(u16);

impl Shape {
    /// Wrap a raw encoding
    pub const fn from_code(code: u16) -> Self {
        Self(code)
    }

    /// Canonical (spawn table) encoding of `kind`
    pub fn canonical(kind: ShapeKind) -> Self {
        Self(CANONICAL_CODES[kind.index()])
    }

    /// Raw encoding, size tag included
    pub fn code(self) -> u16 {
        self.0
    }

    /// Edge length of the bounding box (3 or 4)
    #[inline(always)]
    pub fn size(self) -> u8 {
        3 + (self.0 >> 15) as u8
    }

    /// Whether the cell at local `(x, y)` is occupied.
    ///
    /// Returns `false` for any coordinate outside the bounding box.
    #[inline]
    pub fn cell(self, x: i8, y: i8) -> bool {
        let size = self.size() as i8;
        if x < 0 || y < 0 || x >= size || y >= size {
            return false;
        }
        match Self::bit_of(size, x, y) {
            Some(bit) => (self.0 >> bit) & 1 == 1,
            None => false,
        }
    }

    /// Bit holding local `(x, y)`, `None` for the unbacked last 4x4 cell
    #[inline(always)]
    fn bit_of(size: i8, x: i8, y: i8) -> Option<u32> {
        let bit = FIRST_CELL_BIT - (y as i16 * size as i16 + x as i16);
        (bit >= 0).then_some(bit as u32)
    }

    /// Occupied local cells in row-major order
    pub fn cells(self) -> impl Iterator<Item = (i8, i8)> {
        let size = self.size() as i8;
        (0..size)
            .flat_map(move |y| (0..size).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.cell(x, y))
    }

    /// Number of occupied cells
    pub fn cell_count(self) -> u32 {
        (self.0 & !SIZE_TAG).count_ones()
    }

    /// Copy of this shape turned a quarter turn clockwise.
    ///
    /// The cell at output row `i`, column `j` takes the input cell at
    /// row `size - 1 - j`, column `i`. The size tag is carried over.
    pub fn rotated_cw(self) -> Self {
        let size = self.size() as i8;
        self.remap(|i, j| (i, size - 1 - j))
    }

    /// Copy of this shape turned a quarter turn counter-clockwise.
    ///
    /// The cell at output row `i`, column `j` takes the input cell at
    /// row `j`, column `size - 1 - i`.
    pub fn rotated_ccw(self) -> Self {
        let size = self.size() as i8;
        self.remap(|i, j| (size - 1 - i, j))
    }

    /// Build a new encoding where output `(row i, col j)` reads the input
    /// cell at the `(x, y)` returned by `source(i, j)`.
    fn remap(self, source: impl Fn(i8, i8) -> (i8, i8)) -> Self {
        let size = self.size() as i8;
        let mut code = self.0 & SIZE_TAG;
        for i in 0..size {
            for j in 0..size {
                let (sx, sy) = source(i, j);
                if !self.cell(sx, sy) {
                    continue;
                }
                if let Some(bit) = Self::bit_of(size, j, i) {
                    code |= 1 << bit;
                }
            }
        }
        Self(code)
    }
}

/// The seven shape slots, indexed by [`ShapeKind`].
///
/// Entries only change through [`ShapeTable::set`] and the destructive
/// rotations, which replace a slot with its rotated copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeTable {
    shapes: [Shape; SHAPE_COUNT as usize],
}

impl ShapeTable {
    /// Table holding the canonical encodings
    pub fn canonical() -> Self {
        Self {
            shapes: CANONICAL_CODES.map(Shape::from_code),
        }
    }

    /// Restore every slot to its canonical encoding
    pub fn reset(&mut self) {
        *self = Self::canonical();
    }

    pub fn get(&self, kind: ShapeKind) -> Shape {
        self.shapes[kind.index()]
    }

    /// Slot lookup by raw index
    pub fn get_index(&self, index: usize) -> Result<Shape> {
        self.shapes
            .get(index)
            .copied()
            .ok_or(Error::InvalidShapeIndex(index))
    }

    pub fn set(&mut self, kind: ShapeKind, shape: Shape) {
        self.shapes[kind.index()] = shape;
    }

    /// Cell query against the slot of `kind`
    pub fn cell(&self, kind: ShapeKind, x: i8, y: i8) -> bool {
        self.get(kind).cell(x, y)
    }

    /// Overwrite the slot of `kind` with its clockwise rotation
    pub fn rotate_cw(&mut self, kind: ShapeKind) {
        let rotated = self.get(kind).rotated_cw();
        self.set(kind, rotated);
    }

    /// Overwrite the slot of `kind` with its counter-clockwise rotation
    pub fn rotate_ccw(&mut self, kind: ShapeKind) {
        let rotated = self.get(kind).rotated_ccw();
        self.set(kind, rotated);
    }
}

impl Default for ShapeTable {
    fn default() -> Self {
        Self::canonical()
    }
}
