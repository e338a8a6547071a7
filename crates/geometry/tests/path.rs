use dl_geometry::{DlPath, DlPathFillType, DlPoint, DlRect, DlRoundRect, DlTransform};

#[test]
fn shape_hints_survive_construction() {
    let _ = env_logger::builder().is_test(true).try_init();
    let rect = DlRect::make_ltrb(1.0, 2.0, 3.0, 4.0);
    assert_eq!(DlPath::make_rect(&rect).as_rect(), Some(rect));
    assert_eq!(DlPath::make_oval(&rect).as_oval(), Some(rect));
    assert_eq!(
        DlPath::make_circle(DlPoint::new(10.0, 10.0), 5.0).as_oval(),
        Some(DlRect::make_ltrb(5.0, 5.0, 15.0, 15.0))
    );
    let rrect = DlRoundRect::make_rect_xy(&DlRect::make_wh(20.0, 20.0), 4.0, 4.0);
    assert_eq!(DlPath::make_round_rect(&rrect).as_round_rect(), Some(rrect));
    assert_eq!(DlPath::make_line(DlPoint::new(0.0, 0.0), DlPoint::new(5.0, 5.0)).as_rect(), None);
}

#[test]
fn appending_drops_shape_hints() {
    let mut path = DlPath::make_rect(&DlRect::make_wh(10.0, 10.0));
    path.line_to(DlPoint::new(20.0, 20.0));
    assert_eq!(path.as_rect(), None);
    assert_eq!(path.bounds(), DlRect::make_wh(20.0, 20.0));
}

#[test]
fn fill_type_toggles_inverse() {
    let path = DlPath::make_rect(&DlRect::make_wh(10.0, 10.0));
    assert!(!path.is_inverse_fill_type());
    let inverse = path.with_fill_type(DlPathFillType::EvenOdd.toggled_inverse());
    assert_eq!(inverse.fill_type(), DlPathFillType::InverseEvenOdd);
    assert!(inverse.is_inverse_fill_type());
    assert_eq!(inverse.as_rect(), Some(DlRect::make_wh(10.0, 10.0)));
}

#[test]
fn transforms_keep_axis_aligned_hints() {
    let path = DlPath::make_oval(&DlRect::make_wh(10.0, 20.0));
    let scaled = path.transformed(&DlTransform::make_scale(2.0, 2.0));
    assert_eq!(scaled.as_oval(), Some(DlRect::make_wh(20.0, 40.0)));
    assert_eq!(scaled.bounds(), DlRect::make_wh(20.0, 40.0));

    let skewed = path.transformed(&DlTransform::make_skew(0.5, 0.0));
    assert_eq!(skewed.as_oval(), None);
}

#[test]
fn polygons_bound_every_vertex() {
    let path = DlPath::make_polygon(
        &[DlPoint::new(0.0, 10.0), DlPoint::new(10.0, -5.0), DlPoint::new(20.0, 10.0)],
        true,
    );
    assert_eq!(path.bounds(), DlRect::make_ltrb(0.0, -5.0, 20.0, 10.0));
    assert!(DlPath::new().is_empty());
    assert_eq!(DlPath::new().bounds(), DlRect::EMPTY);
}
