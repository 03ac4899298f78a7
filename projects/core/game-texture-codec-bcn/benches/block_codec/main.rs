use criterion::{criterion_group, criterion_main, Criterion};
use game_texture_codec_bcn::bc1::{decode_bc1_block_from_slice, encode_bc1_block};
use game_texture_codec_bcn::{decode_image, BlockFormat};
use game_texture_codec_common::decoded_4x4_block::Decoded4x4Block;
use std::hint::black_box;

const WIDTH: u32 = 1024;
const HEIGHT: u32 = 1024;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("BC1 Block Codec");

    // 1024x1024 worth of BC1 blocks (512KiB)
    let bc1_size = BlockFormat::Bc1.required_bytes(WIDTH, HEIGHT);
    let blocks_count = bc1_size / 8;

    let mut input = vec![0u8; bc1_size];
    for (block_idx, block) in input.chunks_exact_mut(8).enumerate() {
        // Write color endpoints (RGB565 format)
        block[0] = 0x40;
        block[1] = 0xF8;
        block[2] = 0x00;
        block[3] = 0xF8;

        // Write color indices (varied)
        for i in 4..8 {
            block[i] = ((block_idx * i) % 255) as u8;
        }
    }
    group.throughput(criterion::Throughput::Bytes(bc1_size as u64));

    let mut decoded = vec![Decoded4x4Block::default(); blocks_count];
    group.bench_function("decode_bc1_blocks", |b| {
        b.iter(|| {
            for (out, block) in decoded.iter_mut().zip(input.chunks_exact(8)) {
                if let Some(result) = decode_bc1_block_from_slice(block) {
                    *out = result;
                }
            }
        })
    });

    let mut pixels = vec![0u32; (WIDTH * HEIGHT) as usize];
    group.bench_function("decode_image", |b| {
        b.iter(|| decode_image(BlockFormat::Bc1, black_box(&input), WIDTH, HEIGHT, &mut pixels))
    });

    // Blocks decoded ahead of time so the encoder sees realistic data.
    for (out, block) in decoded.iter_mut().zip(input.chunks_exact(8)) {
        if let Some(result) = decode_bc1_block_from_slice(block) {
            *out = result;
        }
    }

    let mut encoded = vec![0u8; bc1_size];
    group.bench_function("encode_bc1_blocks", |b| {
        b.iter(|| {
            for (block, out) in decoded.iter().zip(encoded.chunks_exact_mut(8)) {
                out.copy_from_slice(&encode_bc1_block(black_box(block)));
            }
        })
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}

criterion_main!(benches);
