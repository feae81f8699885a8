//! Benchmarks for thumbnail generation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};
use thumbnailer_image::{compute_target_dimensions, encode, process, resolve_codec, Codec};

fn bench_format_resolution(c: &mut Criterion) {
    c.bench_function("resolve_jpeg", |b| {
        b.iter(|| resolve_codec(black_box(Some(".JPEG"))))
    });

    c.bench_function("resolve_unsupported", |b| {
        b.iter(|| resolve_codec(black_box(Some(".bmp"))))
    });
}

fn bench_dimensions(c: &mut Criterion) {
    c.bench_function("compute_target_dimensions", |b| {
        b.iter(|| compute_target_dimensions(black_box(4000), black_box(3000), black_box(100)))
    });
}

fn bench_process(c: &mut Criterion) {
    let source = RgbaImage::from_pixel(1600, 1200, Rgba([200, 100, 50, 255]));
    let png = encode(source, Codec::Png).expect("encode fixture");

    c.bench_function("process_png_1600x1200", |b| {
        b.iter(|| process(black_box(&png), Some(".png")))
    });
}

criterion_group!(benches, bench_format_resolution, bench_dimensions, bench_process);
criterion_main!(benches);
