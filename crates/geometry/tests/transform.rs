use dl_geometry::{Complexity, DlAngle, DlPoint, DlRect, DlTransform};

#[test]
fn complexity_tracks_the_matrix() {
    let _ = env_logger::builder().is_test(true).try_init();
    assert_eq!(DlTransform::new().complexity(), Complexity::Identity);
    assert_eq!(DlTransform::make_translate(1.0, 2.0).complexity(), Complexity::Translate2D);
    assert_eq!(DlTransform::make_scale(2.0, 3.0).complexity(), Complexity::ScaleTranslate2D);
    assert_eq!(DlTransform::make_skew(0.5, 0.0).complexity(), Complexity::Affine2D);
    assert!(DlTransform::make_translate(0.0, 0.0).is_identity());
}

#[test]
fn inner_composition_applies_last_op_first() {
    let mut matrix = DlTransform::make_translate(10.0, 20.0);
    matrix.scale_inner(2.0, 2.0);
    assert_eq!(matrix.transform_point(DlPoint::new(1.0, 1.0)), DlPoint::new(12.0, 22.0));

    let mut outer = DlTransform::make_translate(10.0, 20.0);
    outer.scale_outer(2.0, 2.0);
    assert_eq!(outer.transform_point(DlPoint::new(1.0, 1.0)), DlPoint::new(22.0, 42.0));
}

#[test]
fn quarter_turns_stay_axis_aligned() {
    let rotate = DlTransform::make_rotate(DlAngle::Degrees(90.0));
    assert!(rotate.rect_stays_rect());
    assert_eq!(
        rotate.transform_rect(&DlRect::make_ltrb(0.0, 0.0, 10.0, 20.0)),
        DlRect::make_ltrb(-20.0, 0.0, 0.0, 10.0)
    );
    assert!(!DlTransform::make_rotate(DlAngle::Degrees(45.0)).rect_stays_rect());
    assert_eq!(DlAngle::Degrees(-90.0).cos_sin(), (0.0, -1.0));
}

#[test]
fn inverse_round_trips_and_rejects_singular_matrices() {
    let matrix = DlTransform::make_affine_2d(2.0, 0.0, 10.0, 0.0, 4.0, -8.0);
    let inverse = matrix.inverse().unwrap();
    let point = DlPoint::new(3.0, 5.0);
    assert_eq!(inverse.transform_point(matrix.transform_point(point)), point);

    assert!(DlTransform::make_scale(0.0, 1.0).inverse().is_none());
    assert!(!DlTransform::make_affine_2d(1.0, 2.0, 0.0, 2.0, 4.0, 0.0).is_invertible());
}

#[test]
fn row_major_round_trips() {
    #[rustfmt::skip]
    let values = [
        1.0, 2.0, 0.0, 5.0,
        3.0, 4.0, 0.0, 6.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ];
    let matrix = DlTransform::make_row_major(values);
    assert_eq!(matrix.to_row_major(), values);
    assert_eq!(matrix.rc(0, 3), 5.0);
    assert!(matrix.is_2d());
    assert!(!matrix.has_perspective());
}

#[test]
fn perspective_rects_stay_finite() {
    #[rustfmt::skip]
    let matrix = DlTransform::make_row_major([
        1.0, 0.0,    0.0, 0.0,
        0.0, 1.0,    0.0, 0.0,
        0.0, 0.0,    1.0, 0.0,
        0.0, -0.01,  0.0, 1.0,
    ]);
    assert!(matrix.has_perspective());
    let mapped = matrix.transform_rect(&DlRect::make_ltrb(0.0, 0.0, 100.0, 200.0));
    assert!(mapped.is_finite());
    assert!(!mapped.is_empty());
}

#[test]
fn serde_uses_column_major_values() {
    let matrix = DlTransform::make_translate(3.0, 4.0);
    let json = serde_json::to_string(&matrix).unwrap();
    let parsed: DlTransform = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, matrix);
    assert_eq!(parsed.complexity(), Complexity::Translate2D);
}

fn assert_near(actual: DlPoint, expected: DlPoint) {
    assert!(
        (actual.x - expected.x).abs() < 1e-4 && (actual.y - expected.y).abs() < 1e-4,
        "{actual:?} is not near {expected:?}"
    );
}

#[rustfmt::skip]
const PERSPECTIVE: [f32; 16] = [
    1.0,  0.0,  0.0, 0.0,
    0.0,  1.0,  0.0, 0.0,
    0.0,  0.0,  1.0, 0.0,
    0.1,  0.05, 0.0, 1.0,
];

#[test]
fn concat_maps_through_inner_then_outer_under_perspective() {
    let perspective = DlTransform::make_row_major(PERSPECTIVE);
    let tilt = DlTransform::make_rotate_x(DlAngle::Degrees(30.0));
    let point = DlPoint::new(1.0, 2.0);

    let combined = DlTransform::make_concat(&perspective, &tilt);
    let step_by_step = perspective.transform_point(tilt.transform_point(point));
    assert_near(combined.transform_point(point), step_by_step);

    let divisor = 1.0 + 0.1 + 0.05 * 2.0 * 30.0_f32.to_radians().cos();
    let expected = DlPoint::new(1.0 / divisor, 2.0 * 30.0_f32.to_radians().cos() / divisor);
    assert_near(step_by_step, expected);

    let reversed = DlTransform::make_concat(&tilt, &perspective);
    assert_near(
        reversed.transform_point(point),
        tilt.transform_point(perspective.transform_point(point)),
    );
}

#[test]
fn perspective_inverse_undoes_the_mapping() {
    #[rustfmt::skip]
    let matrix = DlTransform::make_row_major([
        2.0,  0.5,  0.0,  3.0,
        0.25, 1.5,  0.0, -1.0,
        0.0,  0.0,  1.0,  0.0,
        0.01, 0.02, 0.0,  1.0,
    ]);
    assert!(matrix.has_perspective());
    let inverse = matrix.inverse().unwrap();
    for point in [DlPoint::new(1.0, 2.0), DlPoint::new(-30.0, 12.5), DlPoint::new(0.0, 0.0)] {
        assert_near(inverse.transform_point(matrix.transform_point(point)), point);
    }
    let identity = DlTransform::make_concat(&matrix, &inverse);
    assert_near(identity.transform_point(DlPoint::new(7.0, -3.0)), DlPoint::new(7.0, -3.0));
}

#[test]
fn row_major_translation_is_classified_as_translate() {
    #[rustfmt::skip]
    let matrix = DlTransform::make_row_major([
        1.0, 0.0, 0.0, 5.0,
        0.0, 1.0, 0.0, 7.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    assert_eq!(matrix.complexity(), Complexity::Translate2D);
    assert_eq!(matrix.transform_point(DlPoint::new(1.0, 2.0)), DlPoint::new(6.0, 9.0));
}
