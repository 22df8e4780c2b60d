//! Play field tests - placement, commit and row clearing

use blockfall::core::{rotate, shape_of, PlayField};
use blockfall::types::{Cell, ShapeKind, FIELD_HEIGHT, FIELD_WIDTH};

fn field_from(art: &str) -> PlayField {
    let rows: Vec<&str> = art.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let mut field = PlayField::new(rows[0].len() as u8, rows.len() as u8);
    for (r, line) in rows.iter().enumerate() {
        for (c, ch) in line.chars().enumerate() {
            if ch == '#' {
                field.set(c as i8, r as i8, Cell::Filled);
            }
        }
    }
    field
}

#[test]
fn test_field_new_empty() {
    let field = PlayField::new(FIELD_WIDTH, FIELD_HEIGHT);
    assert_eq!(field.width(), FIELD_WIDTH);
    assert_eq!(field.height(), FIELD_HEIGHT);

    for row in 0..FIELD_HEIGHT as i8 {
        for col in 0..FIELD_WIDTH as i8 {
            assert_eq!(field.get(col, row), Some(Cell::Empty), "cell ({col}, {row})");
        }
    }
    assert_eq!(field.filled_count(), 0);
}

#[test]
fn test_field_get_out_of_bounds() {
    let field = PlayField::new(FIELD_WIDTH, FIELD_HEIGHT);

    assert_eq!(field.get(-1, 0), None);
    assert_eq!(field.get(0, -1), None);
    assert_eq!(field.get(FIELD_WIDTH as i8, 0), None);
    assert_eq!(field.get(0, FIELD_HEIGHT as i8), None);
}

#[test]
fn test_field_set_out_of_bounds() {
    let mut field = PlayField::new(FIELD_WIDTH, FIELD_HEIGHT);

    assert!(!field.set(-1, 0, Cell::Filled));
    assert!(!field.set(0, FIELD_HEIGHT as i8, Cell::Filled));
    assert!(field.set(9, 19, Cell::Filled));
    assert!(field.is_filled(9, 19));
}

#[test]
#[should_panic(expected = "outside")]
fn test_field_rejects_tiny_dimensions() {
    let _ = PlayField::new(3, 20);
}

#[test]
fn test_placement_respects_walls_floor_and_cells() {
    let mut field = PlayField::new(10, 20);
    let o = shape_of(ShapeKind::O);

    assert!(field.is_legal_placement(&o, 0, 0));
    assert!(field.is_legal_placement(&o, 8, 18));
    assert!(!field.is_legal_placement(&o, -1, 0));
    assert!(!field.is_legal_placement(&o, 9, 0));
    assert!(!field.is_legal_placement(&o, 0, 19));
    assert!(!field.is_legal_placement(&o, 0, -1));

    field.set(1, 1, Cell::Filled);
    assert!(!field.is_legal_placement(&o, 0, 0));
    assert!(field.is_legal_placement(&o, 2, 0));
}

#[test]
fn test_empty_bounding_box_cells_may_overlap() {
    // The T's empty top corners sit on filled cells; only occupied cells count.
    let field = field_from(
        "
        #.#.
        ....
        ....
        ....
        ",
    );
    let t = shape_of(ShapeKind::T);
    assert_eq!(t.to_string(), ".X.\nXXX");
    assert!(field.is_legal_placement(&t, 0, 0));

    let flipped = rotate(&rotate(&t));
    assert_eq!(flipped.to_string(), "XXX\n.X.");
    assert!(!field.is_legal_placement(&flipped, 0, 0));
}

#[test]
fn test_commit_fills_exactly_piece_cells() {
    let mut field = PlayField::new(10, 20);
    let l = shape_of(ShapeKind::L);
    field.commit(&l, 3, 10);

    assert_eq!(field.filled_count(), 4);
    assert!(field.is_filled(5, 10));
    assert!(field.is_filled(3, 11));
    assert!(field.is_filled(4, 11));
    assert!(field.is_filled(5, 11));
    assert!(!field.is_filled(3, 10));
}

#[test]
#[should_panic(expected = "commit of illegal placement")]
fn test_commit_illegal_placement_panics() {
    let mut field = PlayField::new(10, 20);
    field.fill_row(19);
    field.commit(&shape_of(ShapeKind::O), 0, 18);
}

#[test]
fn test_top_out_detection() {
    let mut field = PlayField::new(10, 20);
    field.fill_row(0);
    field.fill_row(1);

    for kind in ShapeKind::ALL {
        let shape = shape_of(kind);
        let col = 5 - (shape.cols() / 2) as i8;
        assert!(field.is_top_out(&shape, col, 0), "{kind:?}");
    }
}

#[test]
fn test_drop_distance() {
    let mut field = PlayField::new(10, 20);
    let i = shape_of(ShapeKind::I);
    assert_eq!(field.drop_distance(&i, 3, 0), 19);

    field.set(5, 12, Cell::Filled);
    assert_eq!(field.drop_distance(&i, 3, 0), 11);
    assert_eq!(field.drop_distance(&i, 6, 0), 19);
}

#[test]
fn test_detect_full_rows_ascending() {
    let mut field = PlayField::new(10, 20);
    field.fill_row(19);
    field.fill_row(4);
    field.fill_row(12);
    field.set(0, 12, Cell::Empty);

    assert_eq!(field.detect_full_rows().as_slice(), &[4, 19]);
}

#[test]
fn test_clear_single_bottom_row() {
    let mut field = field_from(
        "
        ....
        ....
        .#..
        ####
        ",
    );
    let rows = field.detect_full_rows();
    assert_eq!(field.clear_and_compact(&rows), 1);
    assert_eq!(field.to_string(), "....\n....\n....\n.#..");
}

#[test]
fn test_clear_multiple_non_adjacent_rows() {
    let mut field = field_from(
        "
        #...
        ####
        .#.#
        ####
        ..#.
        ####
        ",
    );
    let rows = field.detect_full_rows();
    assert_eq!(rows.as_slice(), &[1, 3, 5]);
    assert_eq!(field.clear_and_compact(&rows), 3);
    assert_eq!(field.to_string(), "....\n....\n....\n#...\n.#.#\n..#.");
}

#[test]
fn test_clear_all_rows() {
    let mut field = PlayField::new(4, 4);
    for row in 0..4 {
        field.fill_row(row);
    }
    let rows = field.clear_full_rows();
    assert_eq!(rows.len(), 4);
    assert_eq!(field.filled_count(), 0);
}

#[test]
fn test_clear_with_no_rows_is_noop() {
    let mut field = PlayField::new(10, 20);
    field.set(3, 19, Cell::Filled);
    let before = field.clone();
    assert_eq!(field.clear_and_compact(&[]), 0);
    assert_eq!(field, before);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_clear_out_of_range_row_panics() {
    let mut field = PlayField::new(10, 20);
    field.clear_and_compact(&[20]);
}
