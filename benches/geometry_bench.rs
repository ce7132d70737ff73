use std::f64::consts::TAU;

use criterion::{Criterion, criterion_group, criterion_main};
use figchart::core::{pie_path, polygon_path};
use std::hint::black_box;

fn bench_pie_fan_360(c: &mut Criterion) {
    c.bench_function("pie_fan_360", |b| {
        b.iter(|| {
            let mut position = 0.0;
            let step = TAU / 360.0;
            for _ in 0..360 {
                let path = pie_path(black_box(100.0), position, position + step);
                black_box(&path);
                position += step;
            }
        })
    });
}

fn bench_polygon_64_corners(c: &mut Criterion) {
    c.bench_function("polygon_64_corners", |b| {
        b.iter(|| {
            let path = polygon_path(black_box(100.0), black_box(64));
            black_box(&path);
        })
    });
}

criterion_group!(benches, bench_pie_fan_360, bench_polygon_64_corners);
criterion_main!(benches);
