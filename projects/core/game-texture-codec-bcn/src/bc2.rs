//! # BC2 / DXT3
//!
//! A 16 byte block: 8 bytes of explicit alpha (4 bits per pixel, row-major, low nibble
//! first) followed by a BC1 colour block that always decodes in 4-colour mode.

use crate::bc1::{decode_color_block, encode_color_block};
use crate::format::split_block;
use game_texture_codec_common::decoded_4x4_block::Decoded4x4Block;

/// Size of a BC2 block in bytes.
pub const BC2_BLOCK_SIZE: usize = 16;

/// Decodes a single BC2 block.
///
/// Each 4-bit alpha is widened by multiplying with 17.
pub fn decode_bc2_block(block: &[u8; 16]) -> Decoded4x4Block {
    let (alpha, color) = split_block(block);
    let mut result = decode_color_block(&color, false);
    let alpha_bits = u64::from_le_bytes(alpha);

    for (pixel, out) in result.pixels.iter_mut().enumerate() {
        out.a = ((alpha_bits >> (pixel * 4)) & 0xF) as u8 * 17;
    }
    result
}

/// Safely wraps [`decode_bc2_block`] for use with slices
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline(always)]
pub fn decode_bc2_block_from_slice(src: &[u8]) -> Option<Decoded4x4Block> {
    src.first_chunk::<BC2_BLOCK_SIZE>().map(decode_bc2_block)
}

/// Encodes a single BC2 block. Alpha is narrowed as `a / 17`.
pub fn encode_bc2_block(block: &Decoded4x4Block) -> [u8; 16] {
    let mut alpha_bits = 0u64;
    for (pixel, color) in block.pixels.iter().enumerate() {
        alpha_bits |= ((color.a / 17) as u64) << (pixel * 4);
    }

    let mut result = [0u8; 16];
    result[..8].copy_from_slice(&alpha_bits.to_le_bytes());
    result[8..].copy_from_slice(&encode_color_block(block));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_texture_codec_common::color_8888::Color8888;
    use rstest::rstest;

    #[test]
    fn decodes_explicit_alpha_nibbles() {
        let mut block = [0u8; 16];
        // pixel 0 = 0x0, pixel 1 = 0xF, pixel 2 = 0x8
        block[0] = 0xF0;
        block[1] = 0x08;
        // white colour block
        block[8] = 0xFF;
        block[9] = 0xFF;

        let decoded = decode_bc2_block(&block);
        assert_eq!(decoded.pixels[0].a, 0);
        assert_eq!(decoded.pixels[1].a, 255);
        assert_eq!(decoded.pixels[2].a, 136);
        assert_eq!(decoded.pixels[0].r, 255);
    }

    #[test]
    fn colour_half_never_uses_punch_through() {
        let mut block = [0u8; 16];
        // c0 = 0 <= c1 = 0xFFFF, every index 3
        block[10] = 0xFF;
        block[11] = 0xFF;
        block[12..16].fill(0xFF);

        let decoded = decode_bc2_block(&block);
        assert_eq!(decoded.pixels[0].without_alpha(), Color8888::new(170, 170, 170, 0));
    }

    #[rstest]
    #[case(0)]
    #[case(17)]
    #[case(136)]
    #[case(255)]
    fn representable_alpha_round_trips(#[case] alpha: u8) {
        let block = Decoded4x4Block::new(Color8888::new(255, 0, 0, alpha));
        let decoded = decode_bc2_block(&encode_bc2_block(&block));
        assert!(decoded.pixels.iter().all(|p| p.a == alpha && p.r == 255));
    }
}
