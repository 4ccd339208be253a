//! Piece and bag tests - shapes, rotation, spawn placement, 7-bag fairness

use tetrion::core::{spawn_shape, Bag, Piece};
use tetrion::types::PieceKind;

#[test]
fn test_each_kind_has_four_cells_of_its_tag() {
    for kind in PieceKind::ALL {
        let cells: Vec<_> = spawn_shape(kind).cells().collect();
        assert_eq!(cells.len(), 4, "{:?}", kind);
        assert!(cells.iter().all(|&(_, _, tag)| tag == kind.tag()));
    }
}

#[test]
fn test_bounding_boxes_are_square_and_sized_by_kind() {
    assert_eq!(spawn_shape(PieceKind::O).size(), 2);
    assert_eq!(spawn_shape(PieceKind::I).size(), 4);
    for kind in [
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::Z,
        PieceKind::S,
    ] {
        assert_eq!(spawn_shape(kind).size(), 3, "{:?}", kind);
    }
}

#[test]
fn test_four_rotations_are_the_identity() {
    for kind in PieceKind::ALL {
        let spawn = spawn_shape(kind);
        let mut shape = spawn;
        for turn in 1..=4 {
            shape = shape.rotated_cw();
            if turn < 4 {
                // O is symmetric; everything else changes along the way
                if kind != PieceKind::O {
                    assert_ne!(shape, spawn, "{:?} after {} turns", kind, turn);
                }
            }
        }
        assert_eq!(shape, spawn, "{:?}", kind);
    }
}

#[test]
fn test_rotation_keeps_the_cell_count() {
    for kind in PieceKind::ALL {
        let rotated = spawn_shape(kind).rotated_cw();
        assert_eq!(rotated.cells().count(), 4, "{:?}", kind);
    }
}

#[test]
fn test_spawn_is_top_centered() {
    // col = floor(cols / 2) - ceil(size / 2)
    for (kind, cols, col) in [
        (PieceKind::O, 10, 4),
        (PieceKind::I, 10, 3),
        (PieceKind::T, 10, 3),
        (PieceKind::O, 4, 1),
        (PieceKind::I, 4, 0),
        (PieceKind::S, 5, 0),
    ] {
        let piece = Piece::spawn(kind, cols);
        assert_eq!(piece.col, col, "{:?} on {} cols", kind, cols);
        assert_eq!(piece.row, 0);
        assert!(piece.can_move);
    }
}

#[test]
fn test_bag_windows_of_seven_hold_every_kind_once() {
    let mut bag = Bag::new(314);
    for window in 0..10 {
        let drawn: Vec<_> = (0..7).map(|_| bag.draw()).collect();
        for kind in PieceKind::ALL {
            assert_eq!(
                drawn.iter().filter(|&&k| k == kind).count(),
                1,
                "{:?} in window {}",
                kind,
                window
            );
        }
    }
}

#[test]
fn test_bag_sequences_reproduce_from_the_seed() {
    let mut a = Bag::new(555);
    let mut b = Bag::new(555);
    for _ in 0..70 {
        assert_eq!(a.draw(), b.draw());
    }
}
