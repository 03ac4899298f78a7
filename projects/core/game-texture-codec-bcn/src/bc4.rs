//! # BC4 / ATI1
//!
//! A single [channel block](crate::channel), replicated into red, green and blue.

use crate::channel::decode_channel_block;
use game_texture_codec_common::color_8888::Color8888;
use game_texture_codec_common::decoded_4x4_block::Decoded4x4Block;

/// Size of a BC4 block in bytes.
pub const BC4_BLOCK_SIZE: usize = 8;

/// Decodes a single BC4 block into an opaque greyscale block.
///
/// # Examples
///
/// ```
/// use game_texture_codec_bcn::bc4::decode_bc4_block;
/// use game_texture_codec_common::color_8888::Color8888;
///
/// let block = decode_bc4_block(&[90, 10, 0, 0, 0, 0, 0, 0]);
/// assert!(block.pixels.iter().all(|&p| p == Color8888::new(90, 90, 90, 255)));
/// ```
pub fn decode_bc4_block(block: &[u8; 8]) -> Decoded4x4Block {
    let values = decode_channel_block(block);
    Decoded4x4Block {
        pixels: values.map(|v| Color8888::new(v, v, v, 255)),
    }
}

/// Safely wraps [`decode_bc4_block`] for use with slices
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline(always)]
pub fn decode_bc4_block_from_slice(src: &[u8]) -> Option<Decoded4x4Block> {
    src.first_chunk::<BC4_BLOCK_SIZE>().map(decode_bc4_block)
}
