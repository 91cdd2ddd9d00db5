#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use noisegen_utils::noise::{FractalNoise, LatticeMode, PermutationTable, PerlinNoise};
use noisegen_utils::random::Xoroshiro;

/// Sample a 64x64 grid of normalized coordinates, like the field sampler does.
fn sample_grid(fractal: &FractalNoise) {
    for y in 0..64u32 {
        for x in 0..64u32 {
            let nx = f64::from(x) / 64.0;
            let ny = f64::from(y) / 64.0;
            black_box(fractal.sample(nx, ny, 0.0));
        }
    }
}

fn bench_fractal_octaves(c: &mut Criterion) {
    let mut group = c.benchmark_group("fractal_grid_64x64");
    for octaves in [1u32, 4, 12] {
        let mut rng = Xoroshiro::from_seed(0);
        let noise = PerlinNoise::new(PermutationTable::new(&mut rng), LatticeMode::Standard);
        let fractal = FractalNoise::new(noise, octaves).expect("octave count is nonzero");

        group.bench_with_input(
            BenchmarkId::from_parameter(octaves),
            &fractal,
            |b, fractal| {
                b.iter(|| sample_grid(fractal));
            },
        );
    }
    group.finish();
}

fn bench_table_build(c: &mut Criterion) {
    c.bench_function("permutation_table_build", |b| {
        b.iter(|| {
            let mut rng = Xoroshiro::from_seed(black_box(42));
            black_box(PermutationTable::new(&mut rng));
        });
    });
}

criterion_group!(benches, bench_fractal_octaves, bench_table_build);
criterion_main!(benches);
