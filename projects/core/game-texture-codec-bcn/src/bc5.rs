//! # BC5 / ATI2
//!
//! Two [channel blocks](crate::channel): red first, then green. Blue and alpha are
//! written as 255.

use crate::channel::decode_channel_block;
use crate::format::split_block;
use game_texture_codec_common::color_8888::Color8888;
use game_texture_codec_common::decoded_4x4_block::Decoded4x4Block;

/// Size of a BC5 block in bytes.
pub const BC5_BLOCK_SIZE: usize = 16;

/// Decodes a single BC5 block.
pub fn decode_bc5_block(block: &[u8; 16]) -> Decoded4x4Block {
    let (red_block, green_block) = split_block(block);
    let red = decode_channel_block(&red_block);
    let green = decode_channel_block(&green_block);

    let mut result = Decoded4x4Block::default();
    for (pixel, out) in result.pixels.iter_mut().enumerate() {
        *out = Color8888::new(red[pixel], green[pixel], 255, 255);
    }
    result
}

/// Safely wraps [`decode_bc5_block`] for use with slices
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline(always)]
pub fn decode_bc5_block_from_slice(src: &[u8]) -> Option<Decoded4x4Block> {
    src.first_chunk::<BC5_BLOCK_SIZE>().map(decode_bc5_block)
}
