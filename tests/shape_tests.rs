//! Shape table tests - encoding, cell queries and rotation round-trips

use bit_tetris::core::shape::{Shape, ShapeTable, CANONICAL_CODES, SIZE_TAG};
use bit_tetris::types::ShapeKind;
use proptest::prelude::*;

#[test]
fn test_canonical_codes() {
    assert_eq!(
        CANONICAL_CODES,
        [0x8780, 0x8330, 0x0E80, 0x2580, 0x24C0, 0x3C00, 0x0CC0]
    );
    let table = ShapeTable::canonical();
    for kind in ShapeKind::ALL {
        assert_eq!(table.get(kind).code(), CANONICAL_CODES[kind.index()]);
    }
}

#[test]
fn test_size_tag_matches_box() {
    for kind in ShapeKind::ALL {
        let shape = Shape::canonical(kind);
        let tagged = shape.code() & SIZE_TAG != 0;
        assert_eq!(shape.size() == 4, tagged, "{:?}", kind);
    }
}

#[test]
fn test_four_by_four_corner_stays_empty() {
    // (3,3) has no backing bit; bit 0 is (2,3) and the vertical I uses it.
    for kind in [ShapeKind::I, ShapeKind::O] {
        let mut shape = Shape::canonical(kind);
        for _ in 0..4 {
            assert!(!shape.cell(3, 3), "{:?} {:#06x}", kind, shape.code());
            shape = shape.rotated_cw();
        }
    }
    let vertical = Shape::canonical(ShapeKind::I).rotated_cw();
    assert_eq!(vertical.code(), 0x9111);
    assert!(vertical.cell(2, 3));
    assert_eq!(vertical.code() & 1, 1);
}

#[test]
fn test_three_by_three_spare_bits_stay_zero() {
    for kind in [
        ShapeKind::T,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::S,
        ShapeKind::Z,
    ] {
        let mut shape = Shape::canonical(kind);
        for _ in 0..4 {
            shape = shape.rotated_ccw();
            assert_eq!(shape.code() & 0b11_1111, 0, "{:?}", kind);
        }
    }
}

#[test]
fn test_four_clockwise_rotations_restore_every_table_slot() {
    let mut table = ShapeTable::canonical();
    for kind in ShapeKind::ALL {
        let canonical = table.get(kind);
        for turn in 1..=4 {
            table.rotate_cw(kind);
            if turn < 4 && kind != ShapeKind::O {
                assert_ne!(table.get(kind), canonical, "{:?} after {} turns", kind, turn);
            }
        }
        assert_eq!(table.get(kind), canonical, "{:?}", kind);
    }
}

#[test]
fn test_four_counter_clockwise_rotations_restore_every_table_slot() {
    let mut table = ShapeTable::canonical();
    for kind in ShapeKind::ALL {
        for _ in 0..4 {
            table.rotate_ccw(kind);
        }
    }
    assert_eq!(table, ShapeTable::canonical());
}

#[test]
fn test_table_cell_reads_rotated_slot() {
    let mut table = ShapeTable::canonical();
    // S: .## / ##. / ...
    assert!(table.cell(ShapeKind::S, 1, 0));
    assert!(!table.cell(ShapeKind::S, 0, 0));

    table.rotate_cw(ShapeKind::S);
    // S clockwise: .#. / .## / ..#
    assert!(table.cell(ShapeKind::S, 1, 0));
    assert!(table.cell(ShapeKind::S, 2, 1));
    assert!(table.cell(ShapeKind::S, 2, 2));
    assert!(!table.cell(ShapeKind::S, 0, 1));
}

proptest! {
    #[test]
    fn prop_out_of_box_is_zero(kind_idx in 0usize..7, x in 0i8..16, y in 0i8..16) {
        let shape = Shape::canonical(ShapeKind::ALL[kind_idx]);
        let size = shape.size() as i8;
        if x >= size || y >= size {
            prop_assert!(!shape.cell(x, y));
        }
    }

    #[test]
    fn prop_rotation_keeps_cell_count(kind_idx in 0usize..7, turns in 0usize..8) {
        let mut shape = Shape::canonical(ShapeKind::ALL[kind_idx]);
        for _ in 0..turns {
            shape = shape.rotated_cw();
        }
        prop_assert_eq!(shape.cells().count(), 4);
    }
}
