//! # Two Endpoint Channel Blocks
//!
//! A single 8-bit channel compressed into 8 bytes: two reference values followed by
//! sixteen 3-bit indices packed little-endian into the remaining 48 bits.
//!
//! This is the alpha half of BC3/DXT5 and each channel of BC4 and BC5.
//!
//! ```text
//! byte 0     : ref0
//! byte 1     : ref1
//! bytes 2..8 : index of pixel i at bits [3i, 3i + 3)
//! ```
//!
//! When `ref0 > ref1` the table holds 6 interpolated values (7 steps between the
//! references). Otherwise it holds 4 interpolated values (5 steps) followed by the
//! constants `0` and `255`.

/// Builds the 8-entry lookup table for a pair of references.
///
/// # Examples
///
/// ```
/// use game_texture_codec_bcn::channel::interpolate_channel_palette;
///
/// assert_eq!(
///     interpolate_channel_palette(70, 0),
///     [70, 0, 60, 50, 40, 30, 20, 10]
/// );
/// assert_eq!(
///     interpolate_channel_palette(0, 50),
///     [0, 50, 10, 20, 30, 40, 0, 255]
/// );
/// ```
#[inline]
pub fn interpolate_channel_palette(ref0: u8, ref1: u8) -> [u8; 8] {
    let r0 = ref0 as u32;
    let r1 = ref1 as u32;
    let mut table = [ref0, ref1, 0, 0, 0, 0, 0, 0];

    if ref0 > ref1 {
        for step in 1..7u32 {
            table[step as usize + 1] = (((7 - step) * r0 + step * r1) / 7) as u8;
        }
    } else {
        for step in 1..5u32 {
            table[step as usize + 1] = (((5 - step) * r0 + step * r1) / 5) as u8;
        }
        table[6] = 0;
        table[7] = 255;
    }

    table
}

/// Reads the 48-bit index field of a channel block.
#[inline(always)]
fn read_indices(block: &[u8; 8]) -> u64 {
    let mut bits = 0u64;
    for (shift, byte) in block[2..].iter().enumerate() {
        bits |= (*byte as u64) << (shift * 8);
    }
    bits
}

/// Decodes a channel block into 16 values in row-major order.
#[inline]
pub fn decode_channel_block(block: &[u8; 8]) -> [u8; 16] {
    let table = interpolate_channel_palette(block[0], block[1]);
    let indices = read_indices(block);

    let mut values = [0u8; 16];
    for (pixel, value) in values.iter_mut().enumerate() {
        *value = table[((indices >> (pixel * 3)) & 0b111) as usize];
    }
    values
}

/// Encodes 16 row-major channel values into a channel block.
///
/// Blocks that are entirely `0` or entirely `255` use fixed encodings. Otherwise the
/// references are the maximum and minimum value (pushed apart by one if equal, so the
/// 7-step table is always selected) and every value takes the nearest table entry,
/// the lowest index winning a tie.
///
/// # Examples
///
/// ```
/// use game_texture_codec_bcn::channel::encode_channel_block;
///
/// assert_eq!(encode_channel_block(&[0; 16]), [0; 8]);
/// assert_eq!(encode_channel_block(&[255; 16]), [255, 255, 0, 0, 0, 0, 0, 0]);
/// ```
pub fn encode_channel_block(values: &[u8; 16]) -> [u8; 8] {
    if values.iter().all(|&v| v == 0) {
        return [0; 8];
    }
    if values.iter().all(|&v| v == 255) {
        return [255, 255, 0, 0, 0, 0, 0, 0];
    }

    let mut max = values.iter().copied().max().unwrap_or(0);
    let mut min = values.iter().copied().min().unwrap_or(0);
    if max == min {
        if max < 255 {
            max += 1;
        } else {
            min -= 1;
        }
    }

    let table = interpolate_channel_palette(max, min);
    let mut indices = 0u64;
    for (pixel, &value) in values.iter().enumerate() {
        let mut best_index = 0;
        let mut best_distance = u8::MAX as u32 + 1;
        for (index, &entry) in table.iter().enumerate() {
            let distance = value.abs_diff(entry) as u32;
            if distance < best_distance {
                best_distance = distance;
                best_index = index;
            }
        }
        indices |= (best_index as u64) << (pixel * 3);
    }

    let mut block = [0u8; 8];
    block[0] = max;
    block[1] = min;
    for (shift, byte) in block[2..].iter_mut().enumerate() {
        *byte = (indices >> (shift * 8)) as u8;
    }
    block
}
