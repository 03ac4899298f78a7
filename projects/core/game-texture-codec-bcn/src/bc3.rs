//! # BC3 / DXT5
//!
//! A 16 byte block: an 8 byte [channel block](crate::channel) holding alpha, followed by
//! a BC1 colour block that always decodes in 4-colour mode.

use crate::bc1::{decode_color_block, encode_color_block};
use crate::channel::{decode_channel_block, encode_channel_block};
use crate::format::split_block;
use game_texture_codec_common::decoded_4x4_block::Decoded4x4Block;

/// Size of a BC3 block in bytes.
pub const BC3_BLOCK_SIZE: usize = 16;

/// Decodes a single BC3 block.
pub fn decode_bc3_block(block: &[u8; 16]) -> Decoded4x4Block {
    let (alpha, color) = split_block(block);
    let mut result = decode_color_block(&color, false);
    let alpha_values = decode_channel_block(&alpha);

    for (out, a) in result.pixels.iter_mut().zip(alpha_values) {
        out.a = a;
    }
    result
}

/// Safely wraps [`decode_bc3_block`] for use with slices
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline(always)]
pub fn decode_bc3_block_from_slice(src: &[u8]) -> Option<Decoded4x4Block> {
    src.first_chunk::<BC3_BLOCK_SIZE>().map(decode_bc3_block)
}

/// Encodes a single BC3 block.
pub fn encode_bc3_block(block: &Decoded4x4Block) -> [u8; 16] {
    let alpha_values = block.pixels.map(|pixel| pixel.a);

    let mut result = [0u8; 16];
    result[..8].copy_from_slice(&encode_channel_block(&alpha_values));
    result[8..].copy_from_slice(&encode_color_block(block));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_texture_codec_common::color_8888::Color8888;

    #[test]
    fn decodes_interpolated_alpha() {
        let mut block = [0u8; 16];
        block[0] = 255;
        block[1] = 0;
        // pixel 0 -> index 1 (alpha 0), pixel 1 -> index 2
        block[2] = 0b010_001;
        block[8] = 0xFF;
        block[9] = 0xFF;

        let decoded = decode_bc3_block(&block);
        assert_eq!(decoded.pixels[0].a, 0);
        assert_eq!(decoded.pixels[1].a, 218);
        assert_eq!(decoded.pixels[2].a, 255);
    }

    #[test]
    fn fully_opaque_uses_fixed_alpha_encoding() {
        let block = Decoded4x4Block::new(Color8888::new(0, 255, 0, 255));
        let encoded = encode_bc3_block(&block);
        assert_eq!(encoded[..8], [255, 255, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn fully_transparent_uses_fixed_alpha_encoding() {
        let block = Decoded4x4Block::new(Color8888::new(0, 255, 0, 0));
        let encoded = encode_bc3_block(&block);
        assert_eq!(encoded[..8], [0; 8]);
        assert!(decode_bc3_block(&encoded).pixels.iter().all(|p| p.a == 0));
    }

    #[test]
    fn alpha_gradient_round_trips_within_one_step() {
        let mut block = Decoded4x4Block::new(Color8888::new(0, 0, 0, 0));
        for (index, pixel) in block.pixels.iter_mut().enumerate() {
            pixel.a = (index * 17) as u8;
        }

        let decoded = decode_bc3_block(&encode_bc3_block(&block));
        for (original, result) in block.pixels.iter().zip(decoded.pixels.iter()) {
            assert!(original.a.abs_diff(result.a) <= 20);
        }
    }
}
