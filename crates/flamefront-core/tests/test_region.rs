use ndarray::Array2;

use flamefront_core::consts::DEFAULT_CONTOUR_LEVEL;
use flamefront_core::detection::{
    bounding_box, contours, flame_tip, highest_column, highest_contour_column, lowest_column,
    topmost_row, BoundingBox, FlameTip,
};

fn mask_from(rows: &[&str]) -> Array2<bool> {
    let h = rows.len();
    let w = rows[0].len();
    Array2::from_shape_fn((h, w), |(r, c)| rows[r].as_bytes()[c] == b'#')
}

#[test]
fn test_bounding_box_contains_every_pixel() {
    let mask = mask_from(&[
        "..........",
        "...#......",
        "..###.....",
        "..#####...",
        "....#.....",
        "..........",
    ]);
    let b = bounding_box(&mask);
    assert_eq!(
        b,
        BoundingBox {
            row_min: 1,
            row_max: 4,
            col_min: 2,
            col_max: 6,
        }
    );

    for ((r, c), &on) in mask.indexed_iter() {
        if on {
            assert!(r >= b.row_min && r <= b.row_max);
            assert!(c >= b.col_min && c <= b.col_max);
        }
    }
    // Every edge of the box touches the mask.
    assert!(mask.row(b.row_min).iter().any(|&v| v));
    assert!(mask.row(b.row_max).iter().any(|&v| v));
    assert!(mask.column(b.col_min).iter().any(|&v| v));
    assert!(mask.column(b.col_max).iter().any(|&v| v));
}

#[test]
fn test_empty_mask_sentinels() {
    let mask = Array2::from_elem((8, 12), false);
    assert_eq!(bounding_box(&mask), BoundingBox::EMPTY);
    assert_eq!(highest_column(&mask), 0);
    assert_eq!(lowest_column(&mask), 0);
    assert_eq!(topmost_row(&mask), None);
    assert_eq!(flame_tip(&mask, 0), FlameTip::EMPTY);
    assert!(contours(&mask, DEFAULT_CONTOUR_LEVEL).is_empty());
}

#[test]
fn test_column_extremes() {
    let mask = mask_from(&[
        "......",
        ".#....",
        "....#.",
    ]);
    assert_eq!(highest_column(&mask), 4);
    assert_eq!(lowest_column(&mask), 1);
}

#[test]
fn test_flame_tip_is_rightmost_on_top_row() {
    let mask = mask_from(&[
        "........",
        "..#.#...",
        "..######",
    ]);
    let b = bounding_box(&mask);
    assert_eq!(b.row_min, 1);
    assert_eq!(flame_tip(&mask, b.row_min), FlameTip { col: 4, row: 1 });
}

#[test]
fn test_flame_tip_outside_mask_is_sentinel() {
    let mask = mask_from(&["###", "###"]);
    assert_eq!(flame_tip(&mask, 5), FlameTip::EMPTY);
}

#[test]
fn test_offsets_compose() {
    let b = BoundingBox {
        row_min: 1,
        row_max: 2,
        col_min: 3,
        col_max: 4,
    };
    assert_eq!(
        b.offset(10, 20),
        BoundingBox {
            row_min: 11,
            row_max: 12,
            col_min: 23,
            col_max: 24,
        }
    );
    assert_eq!(
        FlameTip { col: 3, row: 1 }.offset(10, 20),
        FlameTip { col: 23, row: 11 }
    );
}

#[test]
fn test_contours_trace_blob_border() {
    let mask = mask_from(&[
        "........",
        "..####..",
        "..####..",
        "..####..",
        "........",
    ]);
    let traced = contours(&mask, DEFAULT_CONTOUR_LEVEL);
    assert!(!traced.is_empty());
    assert!(traced.iter().any(|c| !c.is_hole));
    assert_eq!(highest_contour_column(&traced), 5);
    for contour in &traced {
        for &(r, c) in &contour.points {
            assert!(mask[[r, c]], "contour point ({r},{c}) is not on the blob");
        }
    }
}

#[test]
fn test_contours_agree_with_column_extreme() {
    let mask = mask_from(&[
        "#.......",
        "##......",
        "###.....",
        "####....",
    ]);
    let traced = contours(&mask, DEFAULT_CONTOUR_LEVEL);
    assert_eq!(highest_contour_column(&traced), highest_column(&mask));
}
