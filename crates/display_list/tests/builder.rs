use display_list::canvas::DlAutoCanvasRestore;
use display_list::effects::{DlImageFilter, DlTileMode};
use display_list::{
    ClipOp, DisplayList, DisplayListBuilder, DisplayListBuilderConfig, DisplayListOpType, DlBlendMode, DlCanvas as _,
    DlColor, DlDrawStyle, DlImage, DlImageSampling, DlOpReceiver, DlPaint, SaveLayerOptions,
};
use dl_geometry::{DlAngle, DlPath, DlPoint, DlRect, DlRoundRect, DlScalar, DlTransform};
use std::sync::Arc;

/// Remembers the calls a list replays.
#[derive(Default)]
struct CallLog {
    calls: Vec<String>,
    rects: Vec<DlRect>,
    translations: Vec<(DlScalar, DlScalar)>,
    layers: Vec<(DlRect, SaveLayerOptions, DlBlendMode)>,
}

impl CallLog {
    fn count(&self, name: &str) -> usize {
        self.calls.iter().filter(|call| call.as_str() == name).count()
    }
}

impl DlOpReceiver for CallLog {
    fn set_color(&mut self, _color: DlColor) {
        self.calls.push("set_color".into());
    }

    fn save(&mut self, _total_content_depth: u32) {
        self.calls.push("save".into());
    }

    fn save_layer(
        &mut self,
        bounds: &DlRect,
        options: SaveLayerOptions,
        _total_content_depth: u32,
        max_content_blend_mode: DlBlendMode,
        _backdrop: Option<&Arc<DlImageFilter>>,
    ) {
        self.calls.push("save_layer".into());
        self.layers.push((*bounds, options, max_content_blend_mode));
    }

    fn restore(&mut self) {
        self.calls.push("restore".into());
    }

    fn translate(&mut self, tx: DlScalar, ty: DlScalar) {
        self.calls.push("translate".into());
        self.translations.push((tx, ty));
    }

    fn clip_rect(&mut self, _rect: &DlRect, _clip_op: ClipOp, _is_aa: bool) {
        self.calls.push("clip_rect".into());
    }

    fn draw_rect(&mut self, rect: &DlRect) {
        self.calls.push("draw_rect".into());
        self.rects.push(*rect);
    }

    fn draw_oval(&mut self, bounds: &DlRect) {
        self.calls.push("draw_oval".into());
        self.rects.push(*bounds);
    }
}

fn replay(display_list: &DisplayList) -> CallLog {
    let mut log = CallLog::default();
    display_list.dispatch(&mut log);
    log
}

#[test]
fn single_rect_round_trips_through_dispatch() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut builder = DisplayListBuilder::default();
    builder.draw_rect(&DlRect::make_ltrb(0.0, 0.0, 10.0, 10.0), &DlPaint::default());
    let display_list = builder.build();

    assert_eq!(display_list.op_count(false), 1);
    assert_eq!(display_list.bounds(), DlRect::make_ltrb(0.0, 0.0, 10.0, 10.0));
    assert!(display_list.can_apply_group_opacity());
    assert!(display_list.modifies_transparent_black());
    assert!(!display_list.root_is_unbounded());
    assert_eq!(display_list.max_root_blend_mode(), DlBlendMode::SrcOver);
    assert_eq!(display_list.get_op_type(0), Some(DisplayListOpType::DrawRect));

    let log = replay(&display_list);
    assert_eq!(log.calls, vec!["draw_rect".to_owned()]);
    assert_eq!(log.rects, vec![DlRect::make_ltrb(0.0, 0.0, 10.0, 10.0)]);
}

#[test]
fn saves_are_balanced_and_indexed() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut builder = DisplayListBuilder::default();
    builder.save();
    builder.translate(10.0, 10.0);
    builder.draw_rect(&DlRect::make_wh(10.0, 10.0), &DlPaint::default());
    builder.restore();
    let display_list = builder.build();

    assert_eq!(display_list.get_op_type(0), Some(DisplayListOpType::Save));
    assert_eq!(display_list.get_op_type(1), Some(DisplayListOpType::Translate));
    assert_eq!(display_list.get_op_type(3), Some(DisplayListOpType::Restore));
    assert_eq!(display_list.op_count(false), 4);
    assert_eq!(display_list.bounds(), DlRect::make_ltrb(10.0, 10.0, 20.0, 20.0));
    assert_eq!(display_list.total_depth(), 1);
}

#[test]
fn saves_without_state_changes_are_not_recorded() {
    let mut builder = DisplayListBuilder::default();
    builder.save();
    builder.draw_rect(&DlRect::make_wh(10.0, 10.0), &DlPaint::default());
    builder.restore();
    builder.save();
    builder.restore();
    let display_list = builder.build();
    assert_eq!(display_list.record_count(), 1);
    assert_eq!(replay(&display_list).calls, vec!["draw_rect".to_owned()]);
}

#[test]
fn identity_transforms_are_elided() {
    let mut builder = DisplayListBuilder::default();
    builder.translate(0.0, 0.0);
    builder.scale(1.0, 1.0);
    builder.rotate(DlAngle::Degrees(360.0));
    builder.skew(0.0, 0.0);
    builder.translate(DlScalar::NAN, 1.0);
    builder.transform_2d_affine(1.0, 0.0, 5.0, 0.0, 1.0, 7.0);
    let display_list = builder.build();

    assert_eq!(display_list.record_count(), 1);
    assert_eq!(replay(&display_list).translations, vec![(5.0, 7.0)]);
}

#[test]
fn flat_perspective_matrix_is_recorded_as_affine() {
    let mut builder = DisplayListBuilder::default();
    builder.transform(&DlTransform::make_scale(2.0, 3.0));
    let display_list = builder.build();
    assert_eq!(display_list.get_op_type(0), Some(DisplayListOpType::Transform2DAffine));
}

#[test]
fn invisible_draws_are_dropped() {
    let mut builder = DisplayListBuilder::with_cull_rect(DlRect::make_wh(100.0, 100.0), false);
    builder.draw_rect(&DlRect::make_wh(10.0, 10.0), &DlPaint::new(DlColor::TRANSPARENT));
    builder.draw_rect(&DlRect::make_ltrb(200.0, 200.0, 300.0, 300.0), &DlPaint::default());
    builder.draw_rect(
        &DlRect::make_wh(10.0, 10.0),
        &DlPaint::default().with_blend_mode(DlBlendMode::Dst),
    );
    let display_list = builder.build();
    assert_eq!(display_list.op_count(false), 0);
    assert!(display_list.bounds().is_empty());
}

#[test]
fn draws_inside_an_empty_clip_are_dropped() {
    let mut builder = DisplayListBuilder::default();
    builder.clip_rect(&DlRect::make_wh(10.0, 10.0), ClipOp::Intersect, false);
    builder.clip_rect(&DlRect::make_ltrb(20.0, 20.0, 30.0, 30.0), ClipOp::Intersect, false);
    builder.draw_rect(&DlRect::make_wh(10.0, 10.0), &DlPaint::default());
    builder.draw_paint(&DlPaint::default());
    let display_list = builder.build();

    let log = replay(&display_list);
    assert_eq!(log.calls, vec!["clip_rect".to_owned()]);
    assert_eq!(display_list.op_count(false), 1);
}

#[test]
fn clip_queries_follow_the_transform() {
    let mut builder = DisplayListBuilder::with_cull_rect(DlRect::make_ltrb(20.0, 20.0, 60.0, 60.0), false);
    builder.scale(4.0, 4.0);
    assert_eq!(builder.get_local_clip_bounds(), DlRect::make_ltrb(5.0, 5.0, 15.0, 15.0));
    assert_eq!(builder.get_destination_clip_bounds(), DlRect::make_ltrb(20.0, 20.0, 60.0, 60.0));
    assert!(builder.quick_reject(&DlRect::make_ltrb(20.0, 20.0, 30.0, 30.0)));
    assert!(!builder.quick_reject(&DlRect::make_ltrb(10.0, 10.0, 12.0, 12.0)));
    assert_eq!(builder.get_transform(), DlTransform::make_scale(4.0, 4.0));
}

#[test]
fn disjoint_draws_keep_group_opacity() {
    let paint = DlPaint::default();
    let mut builder = DisplayListBuilder::default();
    builder.draw_rect(&DlRect::make_ltrb(0.0, 0.0, 10.0, 10.0), &paint);
    builder.draw_oval(&DlRect::make_ltrb(20.0, 0.0, 30.0, 10.0), &paint);
    assert!(builder.build().can_apply_group_opacity());

    builder.draw_rect(&DlRect::make_ltrb(0.0, 0.0, 10.0, 10.0), &paint);
    builder.draw_rect(&DlRect::make_ltrb(5.0, 5.0, 15.0, 15.0), &paint);
    assert!(!builder.build().can_apply_group_opacity());

    builder.draw_rect(
        &DlRect::make_wh(10.0, 10.0),
        &paint.clone().with_blend_mode(DlBlendMode::Multiply),
    );
    let display_list = builder.build();
    assert!(!display_list.can_apply_group_opacity());
    assert_eq!(display_list.max_root_blend_mode(), DlBlendMode::Multiply);
}

#[test]
fn hairline_paths_block_group_opacity() {
    let path = DlPath::make_line(DlPoint::new(0.0, 0.0), DlPoint::new(10.0, 10.0));
    let mut builder = DisplayListBuilder::default();
    builder.draw_path(&path, &DlPaint::default().with_draw_style(DlDrawStyle::Stroke));
    assert!(!builder.build().can_apply_group_opacity());

    builder.draw_path(
        &path,
        &DlPaint::default()
            .with_draw_style(DlDrawStyle::Stroke)
            .with_stroke_width(2.0),
    );
    assert!(builder.build().can_apply_group_opacity());
}

#[test]
fn save_layer_options_are_computed_at_restore() {
    let mut builder = DisplayListBuilder::default();
    builder.save_layer(None, Some(&DlPaint::default().with_alpha(0x80)), None);
    builder.draw_rect(&DlRect::make_ltrb(0.0, 0.0, 10.0, 10.0), &DlPaint::default());
    builder.draw_rect(&DlRect::make_ltrb(20.0, 0.0, 30.0, 10.0), &DlPaint::default());
    builder.restore();
    let display_list = builder.build();

    let log = replay(&display_list);
    assert_eq!(log.layers.len(), 1);
    let (bounds, options, max_blend_mode) = log.layers[0];
    assert!(options.renders_with_attributes());
    assert!(options.can_distribute_opacity());
    assert!(!options.bounds_from_caller());
    assert!(!options.content_is_clipped());
    assert_eq!(bounds, DlRect::make_ltrb(0.0, 0.0, 30.0, 10.0));
    assert_eq!(max_blend_mode, DlBlendMode::SrcOver);
}

#[test]
fn caller_bounds_clip_layer_content() {
    let mut builder = DisplayListBuilder::default();
    let layer_bounds = DlRect::make_wh(50.0, 50.0);
    builder.save_layer(Some(&layer_bounds), None, None);
    builder.draw_rect(&DlRect::make_ltrb(40.0, 40.0, 60.0, 60.0), &DlPaint::default());
    builder.restore();
    let display_list = builder.build();

    let log = replay(&display_list);
    let (bounds, options, _) = log.layers[0];
    assert!(options.bounds_from_caller());
    assert!(options.content_is_clipped());
    assert!(!options.renders_with_attributes());
    assert_eq!(bounds, layer_bounds);
    assert_eq!(display_list.bounds(), DlRect::make_ltrb(40.0, 40.0, 50.0, 50.0));
}

#[test]
fn transparent_layer_drops_its_content() {
    let mut builder = DisplayListBuilder::default();
    builder.save_layer(None, Some(&DlPaint::new(DlColor::TRANSPARENT)), None);
    builder.translate(5.0, 5.0);
    builder.draw_rect(&DlRect::make_wh(10.0, 10.0), &DlPaint::default());
    builder.restore();
    let display_list = builder.build();

    let log = replay(&display_list);
    assert_eq!(log.count("save_layer"), 0);
    assert_eq!(log.count("draw_rect"), 0);
    assert_eq!(log.count("save"), log.count("restore"));
    assert!(display_list.bounds().is_empty());
}

#[test]
fn backdrop_layers_are_reported() {
    let blur = Arc::new(DlImageFilter::make_blur(4.0, 4.0, DlTileMode::Clamp).unwrap());
    let mut builder = DisplayListBuilder::with_cull_rect(DlRect::make_wh(100.0, 100.0), false);
    builder.save_layer(None, None, Some(&blur));
    builder.restore();
    let display_list = builder.build();

    assert!(display_list.root_has_backdrop_filter());
    let log = replay(&display_list);
    assert!(log.layers[0].1.contains_backdrop_filter());
    assert_eq!(display_list.bounds(), DlRect::make_wh(100.0, 100.0));
}

#[test]
fn restore_to_count_unwinds_open_saves() {
    let mut builder = DisplayListBuilder::default();
    builder.save();
    builder.save();
    builder.save();
    assert_eq!(builder.get_save_count(), 3);
    builder.restore_to_count(1);
    assert_eq!(builder.get_save_count(), 1);
    {
        let mut guard = DlAutoCanvasRestore::new(&mut builder, true);
        guard.translate(1.0, 2.0);
        assert_eq!(guard.get_save_count(), 2);
    }
    assert_eq!(builder.get_save_count(), 1);
    assert_eq!(builder.get_transform(), DlTransform::new());
}

#[test]
fn replaying_into_a_builder_reproduces_the_list() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut builder = DisplayListBuilder::new(true);
    let stroke = DlPaint::new(DlColor::BLUE)
        .with_draw_style(DlDrawStyle::Stroke)
        .with_stroke_width(3.0);
    builder.save();
    builder.translate(10.0, 20.0);
    builder.clip_rrect(
        &DlRoundRect::make_rect_xy(&DlRect::make_wh(200.0, 200.0), 8.0, 8.0),
        ClipOp::Intersect,
        true,
    );
    builder.draw_rect(&DlRect::make_wh(50.0, 50.0), &DlPaint::new(DlColor::RED));
    builder.save_layer(None, Some(&DlPaint::default().with_alpha(0x40)), None);
    builder.draw_circle(DlPoint::new(100.0, 100.0), 20.0, &stroke);
    builder.draw_line(DlPoint::new(0.0, 0.0), DlPoint::new(40.0, 30.0), &stroke);
    builder.restore();
    builder.restore();
    builder.draw_image(
        &DlImage::new(16, 16, true),
        DlPoint::new(300.0, 300.0),
        DlImageSampling::Linear,
        None,
    );
    builder.draw_path(
        &DlPath::make_oval(&DlRect::make_ltrb(0.0, 300.0, 40.0, 340.0)),
        &DlPaint::default(),
    );
    let original = builder.build();

    let mut copy_builder = DisplayListBuilder::new(true);
    original.dispatch(&mut copy_builder.as_receiver());
    let copy = copy_builder.build();

    assert!(copy.equals(&original));
    assert_eq!(copy.bounds(), original.bounds());
    assert_eq!(copy.op_count(false), original.op_count(false));
    assert_eq!(copy.can_apply_group_opacity(), original.can_apply_group_opacity());
}

#[test]
fn nested_lists_add_their_counts() {
    let mut inner_builder = DisplayListBuilder::default();
    inner_builder.draw_rect(&DlRect::make_wh(10.0, 10.0), &DlPaint::default());
    inner_builder.draw_oval(&DlRect::make_ltrb(20.0, 20.0, 30.0, 30.0), &DlPaint::default());
    let inner = inner_builder.build();

    let mut builder = DisplayListBuilder::default();
    builder.translate(100.0, 0.0);
    builder.draw_display_list(&inner, 1.0);
    builder.draw_display_list(&inner, 0.0);
    builder.draw_display_list(&DisplayList::empty(), 1.0);
    let outer = builder.build();

    assert_eq!(outer.op_count(false), 2);
    assert_eq!(outer.op_count(true), outer.op_count(false) + inner.op_count(true) - 1);
    assert_eq!(outer.bytes(true), outer.bytes(false) + inner.bytes(true));
    assert_eq!(outer.bounds(), DlRect::make_ltrb(100.0, 0.0, 130.0, 30.0));
    assert!(outer.can_apply_group_opacity());
}

#[test]
fn builder_config_round_trips_through_json() {
    let config = DisplayListBuilderConfig {
        cull_rect: DlRect::make_wh(640.0, 480.0),
        prepare_rtree: true,
    };
    let json = serde_json::to_string(&config).unwrap();
    let parsed: DisplayListBuilderConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
    let mut builder = DisplayListBuilder::from_config(parsed);
    assert_eq!(builder.get_base_layer_size().width, 640);
    assert!(builder.build().rtree().is_some());
}
