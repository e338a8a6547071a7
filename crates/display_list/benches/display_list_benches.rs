use criterion::{Criterion, criterion_group, criterion_main};
use display_list::{ClipOp, DisplayList, DisplayListBuilder, DlCanvas as _, DlColor, DlOpReceiver, DlPaint};
use dl_geometry::{DlAngle, DlPoint, DlRect, DlScalar, DlTransform};
use std::hint::black_box;
use std::sync::Arc;

/// Counts rendering calls so dispatch cannot be optimized away.
#[derive(Default)]
struct CountingReceiver {
    draws: usize,
}

impl DlOpReceiver for CountingReceiver {
    fn draw_rect(&mut self, _rect: &DlRect) {
        self.draws += 1;
    }

    fn draw_oval(&mut self, _bounds: &DlRect) {
        self.draws += 1;
    }
}

/// A grid of tiles, each drawn inside its own save/translate/clip.
fn build_grid(builder: &mut DisplayListBuilder, tiles: usize) -> Arc<DisplayList> {
    let fill = DlPaint::new(DlColor::BLUE);
    let accent = DlPaint::new(DlColor::RED).with_alpha(0xC0);
    for index in 0..tiles {
        let left = ((index % 32) * 40) as DlScalar;
        let top = ((index / 32) * 40) as DlScalar;
        builder.save();
        builder.translate(left, top);
        builder.clip_rect(&DlRect::make_wh(36.0, 36.0), ClipOp::Intersect, false);
        builder.draw_rect(&DlRect::make_wh(36.0, 36.0), &fill);
        builder.draw_oval(&DlRect::make_ltrb(4.0, 4.0, 32.0, 32.0), &accent);
        builder.restore();
    }
    builder.build()
}

fn bench_build(criterion: &mut Criterion) {
    criterion.bench_function("display_list_build_1024_tiles", |bencher| {
        let mut builder = DisplayListBuilder::default();
        bencher.iter(|| black_box(build_grid(&mut builder, 1024)));
    });
    criterion.bench_function("display_list_build_1024_tiles_rtree", |bencher| {
        let mut builder = DisplayListBuilder::new(true);
        bencher.iter(|| black_box(build_grid(&mut builder, 1024)));
    });
}

fn bench_dispatch(criterion: &mut Criterion) {
    let display_list = build_grid(&mut DisplayListBuilder::new(true), 1024);
    criterion.bench_function("display_list_dispatch_full", |bencher| {
        bencher.iter(|| {
            let mut receiver = CountingReceiver::default();
            display_list.dispatch(&mut receiver);
            black_box(receiver.draws)
        });
    });
    criterion.bench_function("display_list_dispatch_culled", |bencher| {
        let cull_rect = DlRect::make_ltrb(100.0, 100.0, 300.0, 300.0);
        bencher.iter(|| {
            let mut receiver = CountingReceiver::default();
            display_list.dispatch_culled(&mut receiver, black_box(&cull_rect));
            black_box(receiver.draws)
        });
    });
}

fn bench_transform(criterion: &mut Criterion) {
    let mut affine = DlTransform::make_rotate_z(DlAngle::Degrees(30.0));
    affine.translate_outer(12.0, 7.0);
    let perspective = DlTransform::make_row_major([
        1.0, 0.2, 0.0, 12.0, //
        0.1, 1.0, 0.0, 7.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.002, 0.001, 0.0, 1.0,
    ]);
    let points: Vec<DlPoint> = (0..1024)
        .map(|index| DlPoint::new((index % 32) as DlScalar, (index / 32) as DlScalar))
        .collect();
    let rect = DlRect::make_ltrb(-50.0, -50.0, 150.0, 80.0);

    criterion.bench_function("transform_points_affine", |bencher| {
        bencher.iter(|| black_box(affine.transform_points(black_box(&points))));
    });
    criterion.bench_function("transform_rect_affine", |bencher| {
        bencher.iter(|| black_box(affine.transform_rect(black_box(&rect))));
    });
    criterion.bench_function("transform_rect_perspective", |bencher| {
        bencher.iter(|| black_box(perspective.transform_rect(black_box(&rect))));
    });
}

criterion_group!(display_list_benches, bench_build, bench_dispatch, bench_transform);
criterion_main!(display_list_benches);
