use canvas_charts::api::{ChartData, ChartKind, ChartOptions, Dataset};
use canvas_charts::core::{Rect, ValueScale, project_line_points, project_slices};
use canvas_charts::render::MemoryHost;
use canvas_charts::ChartEngine;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn term_data(points: usize, datasets: usize) -> ChartData {
    let labels: Vec<String> = (0..points).map(|i| format!("W{i}")).collect();
    (0..datasets).fold(ChartData::new(labels), |data, d| {
        let values = (0..points)
            .map(|i| 50.0 + ((i * 7 + d * 13) % 40) as f64)
            .collect();
        data.with_dataset(Dataset::new(format!("Class {d}"), values))
    })
}

fn bench_line_projection_10k(c: &mut Criterion) {
    let values: Vec<f64> = (0..10_000).map(|i| (i as f64 * 0.01).sin() * 100.0).collect();
    let area = Rect::new(20.0, 20.0, 1880.0, 1000.0);
    let scale = ValueScale::from_values(values.iter().copied());

    c.bench_function("line_projection_10k", |b| {
        b.iter(|| {
            let _ = project_line_points(
                black_box(&values),
                black_box(values.len()),
                black_box(area),
                black_box(scale),
            );
        })
    });
}

fn bench_slice_projection_1k(c: &mut Criterion) {
    let values: Vec<f64> = (0..1_000).map(|i| (i % 17) as f64 + 1.0).collect();
    c.bench_function("slice_projection_1k", |b| {
        b.iter(|| {
            let _ = project_slices(black_box(&values));
        })
    });
}

fn bench_render_every_kind(c: &mut Criterion) {
    let data = term_data(52, 4);
    for kind in ChartKind::ALL {
        let host = MemoryHost::new().with_surface("canvas", 1280, 720);
        let mut engine = ChartEngine::new(host);
        engine
            .create_chart(kind, "canvas", data.clone(), ChartOptions::new())
            .expect("create chart");

        c.bench_function(&format!("render_{kind}_52x4"), |b| {
            b.iter(|| {
                engine
                    .render_chart(black_box("canvas"))
                    .expect("render should succeed");
            })
        });
    }
}

criterion_group!(
    benches,
    bench_line_projection_10k,
    bench_slice_projection_1k,
    bench_render_every_kind
);
criterion_main!(benches);
