use dl_geometry::{DlPoint, DlRect, DlRoundRect, DlVector, RoundRectType};

#[test]
fn corner_points_respect_the_radii() {
    let _ = env_logger::builder().is_test(true).try_init();
    let rrect = DlRoundRect::make_rect_xy(&DlRect::make_ltrb(50.0, 50.0, 100.0, 100.0), 0.5, 0.75);
    assert_eq!(rrect.kind(), RoundRectType::Simple);
    assert!(!rrect.contains_point(DlPoint::new(50.0, 50.0)));
    assert!(rrect.contains_point(DlPoint::new(50.5, 50.5)));
    assert!(rrect.contains_point(DlPoint::new(75.0, 75.0)));
    assert!(!rrect.contains_point(DlPoint::new(100.0, 75.0)));
}

#[test]
fn classification_follows_the_radii() {
    let bounds = DlRect::make_wh(40.0, 20.0);
    assert!(DlRoundRect::make_rect_xy(&bounds, 0.0, 0.0).is_rect());
    assert!(DlRoundRect::make_rect_xy(&bounds, 20.0, 10.0).is_oval());
    assert!(DlRoundRect::make_rect_xy(&bounds, 400.0, 400.0).is_simple());
    assert!(DlRoundRect::make_oval(&bounds).is_oval());
    assert!(DlRoundRect::make_nine_patch(&bounds, 1.0, 2.0, 3.0, 4.0).is_nine_patch());
    assert!(
        DlRoundRect::make_rect_radii(
            &bounds,
            &[
                DlVector::new(1.0, 1.0),
                DlVector::new(2.0, 2.0),
                DlVector::new(3.0, 3.0),
                DlVector::new(4.0, 4.0),
            ],
        )
        .is_complex()
    );
    assert!(DlRoundRect::make_rect(&DlRect::EMPTY).is_empty());
}

#[test]
fn oversized_radii_are_scaled_to_fit() {
    let rrect = DlRoundRect::make_rect_xy(&DlRect::make_wh(10.0, 100.0), 10.0, 10.0);
    assert_eq!(rrect.upper_left_radii(), DlVector::new(5.0, 5.0));
    assert!(rrect.has_circular_corners());
}

#[test]
fn unsorted_bounds_are_normalized() {
    let rrect = DlRoundRect::make_rect_xy(&DlRect::make_ltrb(10.0, 10.0, 0.0, 0.0), 2.0, 2.0);
    assert_eq!(*rrect.bounds(), DlRect::make_wh(10.0, 10.0));
    assert!(rrect.contains_rect(&DlRect::make_ltrb(2.0, 2.0, 8.0, 8.0)));
    assert!(!rrect.contains_rect(&DlRect::make_ltrb(0.0, 0.0, 8.0, 8.0)));
}

#[test]
fn uneven_radii_share_one_scale_factor() {
    let bounds = DlRect::make_wh(100.0, 50.0);
    let rrect = DlRoundRect::make_rect_radii(
        &bounds,
        &[
            DlVector::new(80.0, 40.0),
            DlVector::new(80.0, 40.0),
            DlVector::new(10.0, 30.0),
            DlVector::new(10.0, 30.0),
        ],
    );
    let expected = [
        DlVector::new(50.0, 25.0),
        DlVector::new(50.0, 25.0),
        DlVector::new(6.25, 18.75),
        DlVector::new(6.25, 18.75),
    ];
    for (actual, wanted) in rrect.radii().iter().zip(&expected) {
        assert!((actual.x - wanted.x).abs() < 1e-4, "{actual:?} != {wanted:?}");
        assert!((actual.y - wanted.y).abs() < 1e-4, "{actual:?} != {wanted:?}");
    }
    assert_eq!(rrect.kind(), RoundRectType::Complex);

    let [upper_left, upper_right, lower_right, lower_left] = *rrect.radii();
    assert!(upper_left.x + upper_right.x <= bounds.width());
    assert!(lower_left.x + lower_right.x <= bounds.width());
    assert!(upper_left.y + lower_left.y <= bounds.height());
    assert!(upper_right.y + lower_right.y <= bounds.height());
}
