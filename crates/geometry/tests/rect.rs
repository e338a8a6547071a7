use dl_geometry::{DlIRect, DlPoint, DlRect, DlScalar, DlTransform, RectBoundsAccumulator};

#[test]
fn emptiness_covers_unsorted_and_nan_rects() {
    let _ = env_logger::builder().is_test(true).try_init();
    assert!(DlRect::EMPTY.is_empty());
    assert!(DlRect::make_ltrb(10.0, 0.0, 0.0, 10.0).is_empty());
    assert!(DlRect::make_ltrb(0.0, 0.0, DlScalar::NAN, 10.0).is_empty());
    assert!(!DlRect::make_maximum().is_empty());
    assert!(!DlRect::make_maximum().is_finite());
    assert_eq!(
        DlRect::make_ltrb(10.0, 20.0, 0.0, 5.0).sorted(),
        DlRect::make_ltrb(0.0, 5.0, 10.0, 20.0)
    );
}

#[test]
fn point_containment_is_half_open() {
    let rect = DlRect::make_xywh(10.0, 10.0, 10.0, 10.0);
    assert!(rect.contains_point(DlPoint::new(10.0, 10.0)));
    assert!(rect.contains_point(DlPoint::new(19.9, 19.9)));
    assert!(!rect.contains_point(DlPoint::new(20.0, 15.0)));
    assert!(!rect.contains_point(DlPoint::new(15.0, 20.0)));
}

#[test]
fn touching_rects_do_not_intersect() {
    let left = DlRect::make_ltrb(0.0, 0.0, 10.0, 10.0);
    let right = DlRect::make_ltrb(10.0, 0.0, 20.0, 10.0);
    assert!(!left.intersects(&right));
    assert_eq!(left.intersection(&right), None);
    assert_eq!(left.intersection_or_empty(&right), DlRect::EMPTY);

    let overlap = DlRect::make_ltrb(5.0, 5.0, 15.0, 15.0);
    assert!(left.intersects(&overlap));
    assert_eq!(left.intersection(&overlap), Some(DlRect::make_ltrb(5.0, 5.0, 10.0, 10.0)));
}

#[test]
fn union_ignores_empty_rects() {
    let rect = DlRect::make_ltrb(0.0, 0.0, 10.0, 10.0);
    assert_eq!(rect.union(&DlRect::EMPTY), rect);
    assert_eq!(DlRect::EMPTY.union(&rect), rect);
    assert_eq!(
        rect.union(&DlRect::make_ltrb(20.0, -5.0, 30.0, 5.0)),
        DlRect::make_ltrb(0.0, -5.0, 30.0, 10.0)
    );
}

#[test]
fn containment_requires_non_empty_rects() {
    let outer = DlRect::make_wh(100.0, 100.0);
    assert!(outer.contains_rect(&DlRect::make_ltrb(0.0, 0.0, 100.0, 100.0)));
    assert!(!outer.contains_rect(&DlRect::EMPTY));
    assert!(!outer.contains_rect(&DlRect::make_ltrb(50.0, 50.0, 101.0, 60.0)));
}

#[test]
fn rounding_and_offsets() {
    let rect = DlRect::make_ltrb(0.4, 0.6, 9.4, 9.6);
    assert_eq!(rect.round_out(), DlRect::make_ltrb(0.0, 0.0, 10.0, 10.0));
    assert_eq!(rect.round(), DlRect::make_ltrb(0.0, 1.0, 9.0, 10.0));
    assert_eq!(DlIRect::round_out(&rect), DlIRect::make_ltrb(0, 0, 10, 10));
    assert_eq!(
        DlRect::make_wh(10.0, 10.0).outset(2.0, 3.0),
        DlRect::make_ltrb(-2.0, -3.0, 12.0, 13.0)
    );
    assert_eq!(DlRect::make_wh(10.0, 10.0).shift(5.0, 5.0), DlRect::make_ltrb(5.0, 5.0, 15.0, 15.0));
    assert_eq!(DlRect::make_wh(10.0, 10.0).scale(2.0, 0.5), DlRect::make_wh(20.0, 5.0));
}

#[test]
fn integer_rects_union_and_intersect() {
    let lhs = DlIRect::make_xywh(0, 0, 10, 10);
    let rhs = DlIRect::make_xywh(5, 5, 10, 10);
    assert_eq!(lhs.intersection(&rhs), Some(DlIRect::make_ltrb(5, 5, 10, 10)));
    assert_eq!(lhs.union(&rhs), DlIRect::make_ltrb(0, 0, 15, 15));
    assert_eq!(lhs.size().width, 10);
    assert_eq!(rhs.to_rect(), DlRect::make_ltrb(5.0, 5.0, 15.0, 15.0));
    assert_eq!(lhs.intersection(&DlIRect::make_xywh(10, 0, 5, 5)), None);
}

#[test]
fn accumulator_keeps_degenerate_bounds() {
    let mut accumulator = RectBoundsAccumulator::new();
    assert!(accumulator.is_empty());
    assert_eq!(accumulator.bounds(), DlRect::EMPTY);

    accumulator.accumulate_point(DlPoint::new(0.0, 5.0));
    accumulator.accumulate_point(DlPoint::new(10.0, 5.0));
    accumulator.accumulate_point(DlPoint::new(DlScalar::NAN, 100.0));
    assert_eq!(accumulator.bounds(), DlRect::make_ltrb(0.0, 5.0, 10.0, 5.0));

    accumulator.accumulate_rect(&DlRect::make_ltrb(20.0, 20.0, -5.0, 0.0));
    assert_eq!(accumulator.bounds(), DlRect::make_ltrb(-5.0, 0.0, 20.0, 20.0));

    accumulator.reset();
    assert!(accumulator.is_empty());
}

#[test]
fn transformed_bounds_stay_sorted() {
    let rect = DlRect::make_ltrb(1.0, 2.0, 3.0, 4.0);
    let flip = DlTransform::make_scale(-2.0, 1.0);
    assert_eq!(rect.transform_and_clip_bounds(&flip), DlRect::make_ltrb(-6.0, 2.0, -2.0, 4.0));
    assert_eq!(
        rect.transform_and_clip_bounds(&DlTransform::make_translate(10.0, 0.0)),
        DlRect::make_ltrb(11.0, 2.0, 13.0, 4.0)
    );
}
