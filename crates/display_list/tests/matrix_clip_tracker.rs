use display_list::{ClipOp, DisplayListMatrixClipTracker};
use dl_geometry::{DlPath, DlPathFillType, DlRect, DlRoundRect, DlTransform};

fn tracker(cull_rect: DlRect) -> DisplayListMatrixClipTracker {
    DisplayListMatrixClipTracker::new(cull_rect, DlTransform::new())
}

#[test]
fn local_cull_rect_follows_scale() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut tracker = tracker(DlRect::make_ltrb(20.0, 20.0, 60.0, 60.0));
    tracker.scale(4.0, 4.0);
    assert_eq!(tracker.local_cull_rect(), DlRect::make_ltrb(5.0, 5.0, 15.0, 15.0));
    assert_eq!(tracker.device_cull_rect(), DlRect::make_ltrb(20.0, 20.0, 60.0, 60.0));
    assert_eq!(tracker.map_rect(&DlRect::make_wh(1.0, 1.0)), DlRect::make_wh(4.0, 4.0));
}

#[test]
fn restore_brings_back_matrix_and_clip() {
    let mut tracker = tracker(DlRect::make_wh(100.0, 100.0));
    tracker.save();
    tracker.translate(10.0, 20.0);
    tracker.clip_rect(&DlRect::make_wh(10.0, 10.0), ClipOp::Intersect, false);
    assert_eq!(tracker.get_save_count(), 1);
    assert_eq!(tracker.device_cull_rect(), DlRect::make_ltrb(10.0, 20.0, 20.0, 30.0));
    tracker.restore();
    assert_eq!(tracker.get_save_count(), 0);
    assert_eq!(tracker.matrix(), DlTransform::new());
    assert_eq!(tracker.device_cull_rect(), DlRect::make_wh(100.0, 100.0));

    tracker.save();
    tracker.save();
    tracker.scale(2.0, 2.0);
    tracker.restore_to_count(0);
    assert_eq!(tracker.get_save_count(), 0);
    assert_eq!(tracker.matrix(), DlTransform::new());
}

#[test]
fn difference_clips_only_cut_whole_sides() {
    let cull_rect = DlRect::make_wh(100.0, 100.0);
    let cases = [
        (DlRect::make_ltrb(0.0, 0.0, 100.0, 50.0), DlRect::make_ltrb(0.0, 50.0, 100.0, 100.0)),
        (DlRect::make_ltrb(-10.0, 60.0, 110.0, 120.0), DlRect::make_ltrb(0.0, 0.0, 100.0, 60.0)),
        (DlRect::make_ltrb(-10.0, -10.0, 30.0, 110.0), DlRect::make_ltrb(30.0, 0.0, 100.0, 100.0)),
        (DlRect::make_ltrb(25.0, 25.0, 75.0, 75.0), cull_rect),
        (DlRect::make_ltrb(0.0, 0.0, 50.0, 50.0), cull_rect),
    ];
    for (clip, expected) in cases {
        let mut tracker = tracker(cull_rect);
        tracker.clip_rect(&clip, ClipOp::Difference, false);
        assert_eq!(tracker.device_cull_rect(), expected, "difference with {clip:?}");
    }

    let mut covered = tracker(cull_rect);
    covered.clip_rect(&DlRect::make_ltrb(-1.0, -1.0, 101.0, 101.0), ClipOp::Difference, false);
    assert!(covered.is_cull_rect_empty());
    assert_eq!(covered.local_cull_rect(), DlRect::EMPTY);
}

#[test]
fn round_rect_difference_needs_a_plain_rect() {
    let cull_rect = DlRect::make_wh(100.0, 100.0);
    let band = DlRect::make_ltrb(-10.0, -10.0, 110.0, 40.0);

    let mut rounded = tracker(cull_rect);
    rounded.clip_rrect(&DlRoundRect::make_rect_xy(&band, 5.0, 5.0), ClipOp::Difference, false);
    assert_eq!(rounded.device_cull_rect(), cull_rect);

    let mut square = tracker(cull_rect);
    square.clip_rrect(&DlRoundRect::make_rect_xy(&band, 0.0, 0.0), ClipOp::Difference, false);
    assert_eq!(square.device_cull_rect(), DlRect::make_ltrb(0.0, 40.0, 100.0, 100.0));

    let mut oval = tracker(cull_rect);
    oval.clip_oval(&band, ClipOp::Difference, false);
    assert_eq!(oval.device_cull_rect(), cull_rect);
}

#[test]
fn inverse_path_clips_swap_their_op() {
    let bounds = DlRect::make_ltrb(8.2, 9.3, 22.4, 27.7);
    let path = DlPath::make_rect(&bounds).with_fill_type(DlPathFillType::InverseNonZero);

    let mut hard = tracker(DlRect::make_wh(100.0, 100.0));
    hard.clip_path(&path, ClipOp::Difference, false);
    assert_eq!(hard.device_cull_rect(), bounds);

    let mut soft = tracker(DlRect::make_wh(100.0, 100.0));
    soft.clip_path(&path, ClipOp::Difference, true);
    assert_eq!(soft.device_cull_rect(), DlRect::make_ltrb(8.0, 9.0, 23.0, 28.0));

    let mut inverse_intersect = tracker(DlRect::make_wh(100.0, 100.0));
    inverse_intersect.clip_path(&path, ClipOp::Intersect, false);
    assert_eq!(inverse_intersect.device_cull_rect(), DlRect::make_wh(100.0, 100.0));
}

#[test]
fn quick_reject_uses_device_bounds() {
    let mut tracker = tracker(DlRect::make_wh(100.0, 100.0));
    tracker.translate(50.0, 50.0);
    assert!(!tracker.content_culled(&DlRect::make_wh(10.0, 10.0)));
    assert!(tracker.content_culled(&DlRect::make_ltrb(60.0, 0.0, 70.0, 10.0)));
    assert!(tracker.content_culled(&DlRect::EMPTY));

    tracker.scale(0.0, 1.0);
    assert!(tracker.content_culled(&DlRect::make_wh(10.0, 10.0)));
}

#[test]
fn reset_cull_rect_restores_base_or_maps_bounds() {
    let mut tracker = tracker(DlRect::make_wh(100.0, 100.0));
    tracker.clip_rect(&DlRect::make_wh(10.0, 10.0), ClipOp::Intersect, false);
    tracker.reset_cull_rect(None);
    assert_eq!(tracker.device_cull_rect(), DlRect::make_wh(100.0, 100.0));

    tracker.scale(2.0, 2.0);
    tracker.reset_cull_rect(Some(&DlRect::make_wh(30.0, 30.0)));
    assert_eq!(tracker.device_cull_rect(), DlRect::make_wh(60.0, 60.0));
    assert_eq!(tracker.base_device_cull_rect(), DlRect::make_wh(100.0, 100.0));
}
