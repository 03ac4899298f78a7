//! # BC1 / DXT1
//!
//! An 8 byte block: two little-endian [`Color565`] endpoints followed by a 32-bit
//! little-endian index table, 2 bits per pixel in row-major order.
//!
//! ```text
//! bytes 0..2 : c0
//! bytes 2..4 : c1
//! bytes 4..8 : index of pixel i at bits [2i, 2i + 2)
//! ```
//!
//! `c0 > c1` selects 4 colours (the endpoints plus the 2/3-1/3 blends); otherwise the
//! block holds 3 colours (endpoints plus their average) and a transparent black entry.
//!
//! The colour half of BC2 and BC3 uses the same layout but always decodes as 4 colours,
//! so the decoder takes an `allow_punch_through` switch.

use game_texture_codec_common::color_565::Color565;
use game_texture_codec_common::color_8888::Color8888;
use game_texture_codec_common::decoded_4x4_block::Decoded4x4Block;

/// Size of a BC1 block in bytes.
pub const BC1_BLOCK_SIZE: usize = 8;

/// Pixels with alpha below this take the transparent index in [`encode_bc1_block_punch_through`].
const PUNCH_THROUGH_THRESHOLD: u8 = 128;

/// Decodes a colour block, with or without BC1's 3-colour + transparent mode.
#[inline]
pub fn decode_color_block(block: &[u8; 8], allow_punch_through: bool) -> Decoded4x4Block {
    let c0 = Color565::from_raw(u16::from_le_bytes([block[0], block[1]]));
    let c1 = Color565::from_raw(u16::from_le_bytes([block[2], block[3]]));
    let indices = u32::from_le_bytes([block[4], block[5], block[6], block[7]]);
    let table = Color565::block_palette(c0, c1, allow_punch_through);

    let mut result = Decoded4x4Block::default();
    for (pixel, out) in result.pixels.iter_mut().enumerate() {
        *out = table[((indices >> (pixel * 2)) & 0b11) as usize];
    }
    result
}

/// Decodes a single BC1 block.
///
/// # Examples
///
/// ```
/// use game_texture_codec_bcn::bc1::decode_bc1_block;
/// use game_texture_codec_common::color_8888::Color8888;
///
/// // Solid red: c0 = 0xF800, c1 = 0, every index 0.
/// let block = decode_bc1_block(&[0x00, 0xF8, 0x00, 0x00, 0, 0, 0, 0]);
/// assert!(block.pixels.iter().all(|&p| p == Color8888::new(255, 0, 0, 255)));
/// ```
#[inline]
pub fn decode_bc1_block(block: &[u8; 8]) -> Decoded4x4Block {
    decode_color_block(block, true)
}

/// Safely wraps [`decode_bc1_block`] for use with slices
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline(always)]
pub fn decode_bc1_block_from_slice(src: &[u8]) -> Option<Decoded4x4Block> {
    src.first_chunk::<BC1_BLOCK_SIZE>().map(decode_bc1_block)
}

/// Encodes a colour block.
///
/// Every pixel is quantised to 5:6:5 and the pair of quantised colours that lie
/// furthest apart (summed absolute channel difference, first pair found on a tie)
/// become the endpoints, ordered so that `c0 >= c1`. Each pixel then takes the
/// nearest of the four colours. Alpha is ignored.
///
/// # Examples
///
/// ```
/// use game_texture_codec_bcn::bc1::encode_color_block;
/// use game_texture_codec_common::color_8888::Color8888;
/// use game_texture_codec_common::decoded_4x4_block::Decoded4x4Block;
///
/// let encoded = encode_color_block(&Decoded4x4Block::new(Color8888::new(0, 0, 255, 255)));
/// assert_eq!(encoded, [0x1F, 0x00, 0x1F, 0x00, 0, 0, 0, 0]);
/// ```
pub fn encode_color_block(block: &Decoded4x4Block) -> [u8; 8] {
    let quantized = block.pixels.map(Color565::from_color_8888);
    let (mut c0, mut c1) = extreme_pair(&quantized, |_| true);
    if c1.greater_than(&c0) {
        core::mem::swap(&mut c0, &mut c1);
    }

    let table = Color565::block_palette(c0, c1, false);
    let mut indices = 0u32;
    for (pixel_index, pixel) in block.pixels.iter().enumerate() {
        indices |= (nearest_color(&table, pixel) as u32) << (pixel_index * 2);
    }
    pack_block(c0, c1, indices)
}

/// Encodes a single BC1 block with [`encode_color_block`].
///
/// The output always decodes opaque.
#[inline]
pub fn encode_bc1_block(block: &Decoded4x4Block) -> [u8; 8] {
    encode_color_block(block)
}

/// Encodes a single BC1 block, keeping 1-bit alpha.
///
/// When any pixel's alpha is below 128, the endpoints are searched over the opaque
/// pixels only and ordered `c0 <= c1` for 3-colour mode; the transparent pixels take
/// index 3 and the rest the nearest of the three colours. A block without such
/// pixels encodes exactly as [`encode_bc1_block`].
pub fn encode_bc1_block_punch_through(block: &Decoded4x4Block) -> [u8; 8] {
    let is_transparent = |pixel: &Color8888| pixel.a < PUNCH_THROUGH_THRESHOLD;
    if !block.pixels.iter().any(is_transparent) {
        return encode_color_block(block);
    }

    let quantized = block.pixels.map(Color565::from_color_8888);
    let opaque = |index: usize| !is_transparent(&block.pixels[index]);
    let (mut c0, mut c1) = extreme_pair(&quantized, opaque);
    if c0.greater_than(&c1) {
        core::mem::swap(&mut c0, &mut c1);
    }

    let table = Color565::block_palette(c0, c1, true);
    let mut indices = 0u32;
    for (pixel_index, pixel) in block.pixels.iter().enumerate() {
        let index = if is_transparent(pixel) {
            3
        } else {
            nearest_color(&table[..3], pixel)
        };
        indices |= (index as u32) << (pixel_index * 2);
    }
    pack_block(c0, c1, indices)
}

/// Finds the two quantised colours furthest apart among the pixels `candidate` accepts.
///
/// Pairs are visited as `(i, j)` with `i < j` in pixel order; only a strictly larger
/// distance replaces the current pair. With no candidates the result is black.
fn extreme_pair(
    quantized: &[Color565; 16],
    candidate: impl Fn(usize) -> bool,
) -> (Color565, Color565) {
    let expanded = quantized.map(|color| color.to_color_8888());
    let first = (0..16)
        .find(|&index| candidate(index))
        .map(|index| quantized[index])
        .unwrap_or_default();

    let (mut c0, mut c1) = (first, first);
    let mut best_distance = 0;
    for i in (0..16).filter(|&index| candidate(index)) {
        for j in ((i + 1)..16).filter(|&index| candidate(index)) {
            let distance = expanded[i].rgb_distance(&expanded[j]);
            if distance > best_distance {
                best_distance = distance;
                c0 = quantized[i];
                c1 = quantized[j];
            }
        }
    }
    (c0, c1)
}

#[inline]
fn pack_block(c0: Color565, c1: Color565, indices: u32) -> [u8; 8] {
    let mut result = [0u8; 8];
    result[0..2].copy_from_slice(&c0.raw_value().to_le_bytes());
    result[2..4].copy_from_slice(&c1.raw_value().to_le_bytes());
    result[4..8].copy_from_slice(&indices.to_le_bytes());
    result
}

/// Index of the closest entry; the first one found wins a tie.
#[inline]
fn nearest_color(table: &[Color8888], pixel: &Color8888) -> usize {
    let mut best_index = 0;
    let mut best_distance = u32::MAX;
    for (index, entry) in table.iter().enumerate() {
        let distance = entry.rgb_distance(pixel);
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }
    best_index
}
