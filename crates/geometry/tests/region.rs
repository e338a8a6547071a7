use dl_geometry::{DlIRect, DlRegion};

#[test]
fn overlapping_rects_become_disjoint_bands() {
    let _ = env_logger::builder().is_test(true).try_init();
    let region = DlRegion::from_rects(&[DlIRect::make_ltrb(0, 0, 10, 10), DlIRect::make_ltrb(5, 5, 15, 15)]);
    assert_eq!(region.bounds(), DlIRect::make_ltrb(0, 0, 15, 15));
    assert!(region.is_complex());
    assert_eq!(
        region.get_rects(false),
        vec![
            DlIRect::make_ltrb(0, 0, 10, 5),
            DlIRect::make_ltrb(0, 5, 15, 10),
            DlIRect::make_ltrb(5, 10, 15, 15),
        ]
    );
}

#[test]
fn debanding_merges_matching_spans() {
    let region = DlRegion::from_rects(&[
        DlIRect::make_ltrb(0, 0, 10, 10),
        DlIRect::make_ltrb(20, 0, 30, 5),
        DlIRect::make_ltrb(0, 10, 10, 20),
    ]);
    assert_eq!(
        region.get_rects(true),
        vec![DlIRect::make_ltrb(0, 0, 10, 20), DlIRect::make_ltrb(20, 0, 30, 5)]
    );
    assert_eq!(region.get_rects(false).len(), 3);
}

#[test]
fn equal_coverage_compares_equal() {
    let stacked = DlRegion::from_rects(&[DlIRect::make_ltrb(0, 0, 10, 5), DlIRect::make_ltrb(0, 5, 10, 10)]);
    let single = DlRegion::make_rect(&DlIRect::make_ltrb(0, 0, 10, 10));
    assert_eq!(stacked, single);
    assert!(single.is_simple());
}

#[test]
fn union_and_intersection() {
    let lhs = DlRegion::make_rect(&DlIRect::make_ltrb(0, 0, 10, 10));
    let rhs = DlRegion::make_rect(&DlIRect::make_ltrb(5, 5, 20, 20));
    let far = DlRegion::make_rect(&DlIRect::make_ltrb(50, 50, 60, 60));

    assert_eq!(lhs.intersection(&rhs), DlRegion::make_rect(&DlIRect::make_ltrb(5, 5, 10, 10)));
    assert!(lhs.intersection(&far).is_empty());
    assert!(lhs.intersects(&rhs));
    assert!(!lhs.intersects(&far));

    let union = lhs.union(&far);
    assert_eq!(union.bounds(), DlIRect::make_ltrb(0, 0, 60, 60));
    assert!(union.intersects_rect(&DlIRect::make_ltrb(55, 55, 56, 56)));
    assert!(!union.intersects_rect(&DlIRect::make_ltrb(20, 20, 40, 40)));
    assert_eq!(DlRegion::new().union(&lhs), lhs);
}
