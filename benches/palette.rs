use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tecla::render::palette::{Palette, Rgb};
use tecla::render::raster::shade_index;

fn bench_palette_ramp(c: &mut Criterion) {
    c.bench_function("palette_ramp", |b| {
        b.iter(|| Palette::ramp(black_box(Rgb::BLACK), black_box(Rgb::WHITE)));
    });
}

fn bench_shade_quantization(c: &mut Criterion) {
    // A 400x300 frame worth of coverage, the whole-window worst case.
    let coverage: Vec<u8> = (0..400usize * 300).map(|i| (i % 256) as u8).collect();
    c.bench_function("shade_quantization_full_frame", |b| {
        b.iter(|| {
            coverage
                .iter()
                .map(|&value| shade_index(black_box(value)))
                .collect::<Vec<u16>>()
        });
    });
}

criterion_group!(benches, bench_palette_ramp, bench_shade_quantization);
criterion_main!(benches);
