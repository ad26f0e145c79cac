//! Benchmarks for cvd-rs operations.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use cvd_bench::{HD, gradient};
use cvd_color::{Deficiency, Pipeline, Simulator, simulate};
use cvd_core::Layout;
use cvd_math::Vec3;
use cvd_transfer::srgb;

/// Benchmark sRGB decode/encode.
fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer");

    let codes: Vec<u8> = (0..=255u8).cycle().take(65_536).collect();
    let linear: Vec<f64> = codes.iter().map(|&c| srgb::decode_u8(c)).collect();
    group.throughput(Throughput::Elements(codes.len() as u64));

    group.bench_function("decode_u8_lut", |b| {
        b.iter(|| codes.iter().map(|&c| srgb::decode_u8(black_box(c))).sum::<f64>())
    });

    group.bench_function("eotf_formula", |b| {
        b.iter(|| {
            codes
                .iter()
                .map(|&c| srgb::eotf(black_box(c) as f64 / 255.0))
                .sum::<f64>()
        })
    });

    group.bench_function("encode_u8", |b| {
        b.iter(|| {
            linear
                .iter()
                .map(|&l| srgb::encode_u8(black_box(l)) as u32)
                .sum::<u32>()
        })
    });

    group.finish();
}

/// Fused matrix vs. the staged pipeline, per pixel.
fn bench_pixel(c: &mut Criterion) {
    let mut group = c.benchmark_group("pixel");

    let sim = Simulator::new(Deficiency::Deuteranopia);
    let staged = Pipeline::for_deficiency(Deficiency::Deuteranopia);
    let fused = staged.optimize();

    group.bench_function("simulator", |b| {
        b.iter(|| sim.apply_pixel(black_box([200, 120, 40])))
    });
    group.bench_function("pipeline_staged", |b| {
        b.iter(|| staged.apply(black_box([0.78, 0.47, 0.16])))
    });
    group.bench_function("pipeline_optimized", |b| {
        b.iter(|| fused.apply(black_box([0.78, 0.47, 0.16])))
    });
    group.bench_function("matrix_only", |b| {
        let m = *sim.matrix();
        b.iter(|| m * black_box(Vec3::new(0.6, 0.2, 0.03)))
    });

    group.finish();
}

/// Whole-frame simulation at HD, per mode and layout.
fn bench_image(c: &mut Criterion) {
    let mut group = c.benchmark_group("image");
    group.sample_size(20);

    let (w, h) = HD;
    group.throughput(Throughput::Elements(w as u64 * h as u64));

    for layout in [Layout::Rgb, Layout::Rgba] {
        let img = gradient(w, h, layout);
        for d in Deficiency::ALL {
            let id = format!("{}_{}ch", d.name(), layout.channels());
            group.bench_with_input(BenchmarkId::new("simulate", id), &img, |b, img| {
                b.iter(|| simulate(black_box(img), d))
            });
        }
    }

    let img = gradient(w, h, Layout::Rgb);
    let sim = Simulator::new(Deficiency::Protanopia);
    group.bench_function("serial_protanopia_3ch", |b| {
        b.iter_batched_ref(
            || img.clone(),
            |buf| sim.apply_in_place_serial(buf),
            criterion::BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_transfer, bench_pixel, bench_image);
criterion_main!(benches);
