#![no_main]

// Encodes arbitrary 4x4 blocks to BC1. The default encoder must emit `c0 >= c1` and
// decode fully opaque; the punch-through encoder must decode pixels with alpha below
// 128 as transparent black and every other pixel opaque.

use game_texture_codec_bcn::bc1::{decode_bc1_block, encode_bc1_block, encode_bc1_block_punch_through};
use game_texture_codec_common::color_8888::Color8888;
use game_texture_codec_common::decoded_4x4_block::Decoded4x4Block;
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Rgba4x4 {
    pub bytes: [[u8; 4]; 16],
}

fuzz_target!(|input: Rgba4x4| {
    let mut block = Decoded4x4Block::default();
    for (pixel, [r, g, b, a]) in block.pixels.iter_mut().zip(input.bytes) {
        *pixel = Color8888::new(r, g, b, a);
    }

    let encoded = encode_bc1_block(&block);
    let c0 = u16::from_le_bytes([encoded[0], encoded[1]]);
    let c1 = u16::from_le_bytes([encoded[2], encoded[3]]);
    assert!(c0 >= c1, "{block:?}");
    assert!(decode_bc1_block(&encoded).pixels.iter().all(|p| p.a == 255), "{block:?}");

    let decoded = decode_bc1_block(&encode_bc1_block_punch_through(&block));
    for (original, result) in block.pixels.iter().zip(decoded.pixels.iter()) {
        if original.a < 128 {
            assert_eq!(*result, Color8888::TRANSPARENT, "{block:?}");
        } else {
            assert_eq!(result.a, 255, "{block:?}");
        }
    }
});
