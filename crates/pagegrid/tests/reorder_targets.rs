//! Targeted coverage for the item-list reorder walk.
//!
//! `target_item_index_for_move` interleaves break-marker skipping with a
//! synthetic page/slot cursor, and its one-slot discount only applies to
//! moves that leave an earlier page. These cases pin down the behavior
//! around marker runs and the end of the scan, where the interleaving is
//! at its trickiest.

use pagegrid::{FixedGrid, GridIndex, PagedLayout, TileHandle};

/// Build a grid from a compact picture: 't' is a tile, 'B' a break marker.
fn grid_from(capacity: usize, picture: &str) -> (FixedGrid, PagedLayout, Vec<TileHandle>) {
    let mut grid = FixedGrid::new(capacity);
    let mut tiles = Vec::new();
    for ch in picture.chars() {
        match ch {
            't' => tiles.push(grid.push_tile()),
            'B' => grid.push_page_break(),
            _ => panic!("unexpected picture char {ch:?}"),
        }
    }
    let mut layout = PagedLayout::new();
    layout.load_from_metadata(&grid);
    (grid, layout, tiles)
}

#[test]
fn cross_page_move_discounts_the_vacated_slot() {
    // Pages: [t1, t2] | [t3, t4]
    let (grid, layout, tiles) = grid_from(3, "ttBtt");
    // t1 lands between t3 and t4; its old slot shifts the flat list left.
    assert_eq!(
        layout.target_item_index_for_move(&grid, tiles[0], GridIndex::new(1, 1)),
        3
    );
}

#[test]
fn same_page_move_takes_no_discount() {
    let (grid, layout, tiles) = grid_from(3, "ttBtt");
    // t3 moving later within its own page: the gap fills behind it.
    assert_eq!(
        layout.target_item_index_for_move(&grid, tiles[2], GridIndex::new(1, 1)),
        4
    );
}

#[test]
fn consecutive_markers_collapse_into_one_boundary() {
    // Pages: [t1] | [t2, t3] despite the doubled marker.
    let (grid, layout, tiles) = grid_from(3, "tBBtt");
    assert_eq!(layout.total_pages(), 2);
    assert_eq!(
        layout.target_item_index_for_move(&grid, tiles[0], GridIndex::new(1, 2)),
        4
    );
}

#[test]
fn leading_markers_belong_to_no_page() {
    let (grid, layout, tiles) = grid_from(3, "Btt");
    assert_eq!(layout.total_pages(), 1);
    assert_eq!(
        layout.target_item_index_for_move(&grid, tiles[1], GridIndex::ZERO),
        1
    );
}

#[test]
fn move_to_own_page_end_reaches_the_scan_end() {
    let (grid, layout, tiles) = grid_from(3, "tt");
    assert_eq!(
        layout.target_item_index_for_move(&grid, tiles[0], GridIndex::new(0, 2)),
        2
    );
}

#[test]
fn trailing_marker_stays_behind_the_target() {
    // Pages: [t1] | [t2], with a persisted marker after t2.
    let (grid, layout, tiles) = grid_from(3, "tBtB");
    assert_eq!(layout.total_pages(), 2);
    // t1 to the end of page 1: it lands before the trailing marker.
    assert_eq!(
        layout.target_item_index_for_move(&grid, tiles[0], GridIndex::new(1, 1)),
        2
    );
}

#[test]
fn model_and_item_targets_agree_on_the_first_page() {
    let (grid, layout, tiles) = grid_from(6, "tttttt");
    // Without markers the item list and the view model are the same list,
    // so the two translations must coincide for first-page targets. (Later
    // pages are only reachable by the item walk through persisted markers.)
    for &moved in &tiles {
        for slot in 0..=layout.items_on_page(0) {
            let index = GridIndex::new(0, slot);
            assert_eq!(
                layout.target_item_index_for_move(&grid, moved, index),
                layout.target_model_index_for_move(moved, index),
                "moved={moved}, index={index}"
            );
        }
    }
}
