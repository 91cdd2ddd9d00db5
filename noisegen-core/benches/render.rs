#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use noisegen_core::bitmap::BitmapEncoder;
use noisegen_core::field::render_field;
use noisegen_utils::noise::{FractalNoise, LatticeMode, PermutationTable, PerlinNoise};
use noisegen_utils::random::Xoroshiro;

fn fractal(octaves: u32) -> FractalNoise {
    let mut rng = Xoroshiro::from_seed(0);
    let noise = PerlinNoise::new(PermutationTable::new(&mut rng), LatticeMode::Standard);
    FractalNoise::new(noise, octaves).expect("octave count is nonzero")
}

fn bench_render_field(c: &mut Criterion) {
    let noise = fractal(12);

    c.bench_function("render_field_100x100_12_octaves", |b| {
        b.iter(|| {
            black_box(render_field(&noise, black_box(100), black_box(100)))
                .expect("valid field")
        });
    });
}

fn bench_encode(c: &mut Criterion) {
    let noise = fractal(4);
    let buffer = render_field(&noise, 256, 256).expect("valid field");
    let encoder = BitmapEncoder::new(true);

    c.bench_function("encode_256x256_strict", |b| {
        b.iter(|| black_box(encoder.encode(black_box(&buffer))));
    });
}

criterion_group!(benches, bench_render_field, bench_encode);
criterion_main!(benches);
