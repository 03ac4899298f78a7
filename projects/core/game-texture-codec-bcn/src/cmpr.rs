//! # GameCube / Wii CMPR
//!
//! CMPR is DXT1 rearranged for the GameCube's big-endian GPU:
//!
//! - Each 8 byte sub-block stores its endpoints and index rows big-endian.
//! - The 2-bit indices of a row are packed MSB first, so pixel `x` of a row lives at
//!   bits `[6 - 2x, 8 - 2x)` of that row's byte. This mirrors the row against DXT1.
//! - Four sub-blocks make up an 8x8 super-block, stored in the order
//!   `(0, 0)`, `(4, 0)`, `(0, 4)`, `(4, 4)`.
//!
//! ```text
//! bytes 0..2 : c0 (big-endian 5:6:5)
//! bytes 2..4 : c1 (big-endian 5:6:5)
//! bytes 4..8 : one byte per row, top row first
//! ```

use game_texture_codec_common::color_565::Color565;
use game_texture_codec_common::decoded_4x4_block::Decoded4x4Block;

/// Size of one 4x4 sub-block in bytes.
pub const CMPR_SUBBLOCK_SIZE: usize = 8;

/// Size of one 8x8 super-block in bytes.
pub const CMPR_SUPERBLOCK_SIZE: usize = 32;

/// Pixel offsets of the sub-blocks within a super-block, in storage order.
pub const SUBBLOCK_OFFSETS: [(usize, usize); 4] = [(0, 0), (4, 0), (0, 4), (4, 4)];

/// Decodes a single big-endian 4x4 sub-block.
///
/// # Examples
///
/// ```
/// use game_texture_codec_bcn::cmpr::decode_cmpr_subblock;
/// use game_texture_codec_common::color_8888::Color8888;
///
/// // Solid blue: c0 = 0x001F (big-endian), c1 = 0, every index 0.
/// let block = decode_cmpr_subblock(&[0x00, 0x1F, 0x00, 0x00, 0, 0, 0, 0]);
/// assert!(block.pixels.iter().all(|&p| p == Color8888::new(0, 0, 255, 255)));
/// ```
#[inline]
pub fn decode_cmpr_subblock(block: &[u8; 8]) -> Decoded4x4Block {
    let c0 = Color565::from_raw(u16::from_be_bytes([block[0], block[1]]));
    let c1 = Color565::from_raw(u16::from_be_bytes([block[2], block[3]]));
    let table = Color565::block_palette(c0, c1, true);

    let mut result = Decoded4x4Block::default();
    for (y, row) in block[4..].iter().enumerate() {
        for x in 0..4 {
            let index = (row >> (6 - 2 * x)) & 0b11;
            result.set_pixel(x, y, table[index as usize]);
        }
    }
    result
}

/// Safely wraps [`decode_cmpr_subblock`] for use with slices
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline(always)]
pub fn decode_cmpr_subblock_from_slice(src: &[u8]) -> Option<Decoded4x4Block> {
    src.first_chunk::<CMPR_SUBBLOCK_SIZE>()
        .map(decode_cmpr_subblock)
}

/// Decodes a 32 byte super-block into its four sub-blocks, in [`SUBBLOCK_OFFSETS`] order.
#[inline]
pub fn decode_cmpr_superblock(block: &[u8; 32]) -> [Decoded4x4Block; 4] {
    let mut result = [Decoded4x4Block::default(); 4];
    for (decoded, chunk) in result.iter_mut().zip(block.chunks_exact(CMPR_SUBBLOCK_SIZE)) {
        if let Some(sub) = decode_cmpr_subblock_from_slice(chunk) {
            *decoded = sub;
        }
    }
    result
}
