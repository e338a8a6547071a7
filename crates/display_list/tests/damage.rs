use display_list::{DisplayList, DisplayListBuilder, DlCanvas as _, DlColor, DlPaint};
use dl_geometry::DlRect;
use std::sync::Arc;

const FIRST: DlRect = DlRect::make_ltrb(0.0, 0.0, 10.0, 10.0);
const SECOND: DlRect = DlRect::make_ltrb(20.0, 0.0, 30.0, 10.0);

fn two_rects(second_color: DlColor) -> Arc<DisplayList> {
    let mut builder = DisplayListBuilder::default();
    builder.draw_rect(&FIRST, &DlPaint::new(DlColor::RED));
    builder.draw_rect(&SECOND, &DlPaint::new(second_color));
    builder.build()
}

#[test]
fn identical_content_has_no_damage() {
    let _ = env_logger::builder().is_test(true).try_init();
    let previous = two_rects(DlColor::BLUE);
    let current = two_rects(DlColor::BLUE);
    assert_ne!(previous.unique_id(), current.unique_id());
    assert!(current.compute_damage(&previous).is_empty());
    assert!(current.compute_damage(&current).is_empty());
}

#[test]
fn recolored_op_damages_only_its_bounds() {
    let previous = two_rects(DlColor::BLUE);
    let current = two_rects(DlColor::GREEN);
    assert_eq!(current.compute_damage(&previous), SECOND);
}

#[test]
fn removed_op_damages_where_it_was() {
    let previous = two_rects(DlColor::BLUE);
    let mut builder = DisplayListBuilder::default();
    builder.draw_rect(&FIRST, &DlPaint::new(DlColor::RED));
    let current = builder.build();
    assert_eq!(current.compute_damage(&previous), SECOND);
    assert_eq!(previous.compute_damage(&current), SECOND);
}

#[test]
fn moved_group_damages_old_and_new_position() {
    let previous = two_rects(DlColor::BLUE);
    let mut builder = DisplayListBuilder::default();
    builder.draw_rect(&FIRST, &DlPaint::new(DlColor::RED));
    builder.save();
    builder.translate(5.0, 0.0);
    builder.draw_rect(&SECOND, &DlPaint::new(DlColor::BLUE));
    builder.restore();
    let current = builder.build();
    assert_eq!(current.root_segments().len(), 2);
    assert_eq!(
        current.compute_damage(&previous),
        DlRect::make_ltrb(20.0, 0.0, 35.0, 10.0)
    );
}

#[test]
fn segments_split_at_root_rendering_ops_and_groups() {
    let mut builder = DisplayListBuilder::default();
    builder.draw_rect(&FIRST, &DlPaint::default());
    builder.save();
    builder.translate(100.0, 100.0);
    builder.draw_rect(&FIRST, &DlPaint::default());
    builder.draw_rect(&SECOND, &DlPaint::default());
    builder.restore();
    builder.draw_rect(&SECOND, &DlPaint::new(DlColor::RED));
    let display_list = builder.build();
    assert_eq!(display_list.root_segments(), vec![0..1, 1..6, 6..8]);
}
