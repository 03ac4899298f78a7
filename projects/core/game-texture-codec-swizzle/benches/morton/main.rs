use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use game_texture_codec_swizzle::morton::{swizzle_morton, unswizzle_morton};
use game_texture_codec_swizzle::ps2::unswizzle_ps2;
use std::hint::black_box;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Deswizzle");

    for size in [256u32, 1024] {
        let pixels: Vec<u32> = (0..size * size).collect();
        let swizzled = swizzle_morton(&pixels, size, size, 1);
        group.throughput(criterion::Throughput::Bytes((pixels.len() * 4) as u64));

        group.bench_with_input(BenchmarkId::new("unswizzle_morton_u32", size), &size, |b, &size| {
            b.iter(|| unswizzle_morton(black_box(&swizzled), size, size, 1))
        });

        // 8 byte units, as used for BC1 blocks.
        let blocks: Vec<u8> = (0..(size * size * 8) as usize).map(|i| i as u8).collect();
        let swizzled_blocks = swizzle_morton(&blocks, size, size, 8);
        group.bench_with_input(BenchmarkId::new("unswizzle_morton_bc1", size), &size, |b, &size| {
            b.iter(|| unswizzle_morton(black_box(&swizzled_blocks), size, size, 8))
        });

        let bytes: Vec<u8> = (0..size * size).map(|i| i as u8).collect();
        group.bench_with_input(BenchmarkId::new("unswizzle_ps2_u8", size), &size, |b, &size| {
            b.iter(|| unswizzle_ps2(black_box(&bytes), size, size))
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}

criterion_main!(benches);
