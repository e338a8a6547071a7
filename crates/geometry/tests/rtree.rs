use dl_geometry::{DlRTree, DlRect};

fn grid(columns: usize, rows: usize) -> DlRTree {
    let mut entries = Vec::new();
    for row in 0..rows {
        for column in 0..columns {
            let left = (column * 20) as f32;
            let top = (row * 20) as f32;
            entries.push((DlRect::make_xywh(left, top, 10.0, 10.0), entries.len() * 2));
        }
    }
    DlRTree::new(entries)
}

#[test]
fn search_returns_leaves_in_insertion_order() {
    let _ = env_logger::builder().is_test(true).try_init();
    let tree = grid(10, 10);
    assert_eq!(tree.leaf_count(), 100);
    assert_eq!(tree.bounds(), DlRect::make_ltrb(0.0, 0.0, 190.0, 190.0));

    let hits = tree.search(&DlRect::make_ltrb(15.0, 15.0, 45.0, 25.0));
    assert_eq!(hits, vec![11, 12]);
    assert_eq!(tree.id(11), Some(22));
    assert_eq!(tree.leaf_bounds(12), Some(DlRect::make_xywh(40.0, 20.0, 10.0, 10.0)));
    assert!(tree.search(&DlRect::make_ltrb(10.0, 10.0, 20.0, 20.0)).is_empty());
}

#[test]
fn every_leaf_is_reachable() {
    let tree = grid(37, 3);
    let all = tree.search(&tree.bounds());
    assert_eq!(all, (0..tree.leaf_count()).collect::<Vec<_>>());
}

#[test]
fn empty_entries_get_no_leaf() {
    let tree = DlRTree::new([
        (DlRect::EMPTY, 7),
        (DlRect::make_wh(10.0, 10.0), 8),
        (DlRect::make_ltrb(5.0, 5.0, 5.0, 20.0), 9),
    ]);
    assert_eq!(tree.leaf_count(), 1);
    assert_eq!(tree.id(0), Some(8));
    assert_eq!(tree.search(&DlRect::make_wh(100.0, 100.0)), vec![0]);
    assert!(DlRTree::new([]).search(&DlRect::make_wh(1.0, 1.0)).is_empty());
}

#[test]
fn consolidation_merges_overlapping_leaves() {
    let tree = DlRTree::new([
        (DlRect::make_ltrb(0.0, 0.0, 10.0, 10.0), 0),
        (DlRect::make_ltrb(5.0, 0.0, 20.0, 10.0), 1),
        (DlRect::make_ltrb(0.0, 10.0, 20.0, 20.0), 2),
        (DlRect::make_ltrb(100.0, 100.0, 110.0, 110.0), 3),
    ]);
    let query = DlRect::make_wh(50.0, 50.0);
    assert_eq!(tree.search_and_consolidate_rects(&query, true), vec![DlRect::make_wh(20.0, 20.0)]);

    let banded = tree.search_and_consolidate_rects(&query, false);
    assert_eq!(banded, vec![DlRect::make_wh(20.0, 20.0)]);
    assert!(!tree.region().is_simple());
}
