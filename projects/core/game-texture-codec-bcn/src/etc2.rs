//! # ETC2 RGBA8
//!
//! A 16 byte block: an 8 byte EAC alpha block followed by an 8 byte ETC2 colour block.
//! Both halves are big-endian.
//!
//! The colour block picks one of five modes:
//!
//! - **Individual** (`diff` bit clear): two 4:4:4 base colours, one per half of the block.
//! - **Differential**: a 5:5:5 base colour plus a signed 3-bit delta for the second half.
//!   A delta that pushes red, green or blue out of range selects T, H or planar mode.
//! - **T** / **H**: two 4:4:4 colours and a distance forming a 4 entry paint table.
//! - **Planar**: three 6:7:6 colours defining a linear gradient over the block.
//!
//! Per-pixel indices are stored column-major: pixel `(x, y)` uses bit `x * 4 + y`.

use game_texture_codec_common::color_8888::Color8888;
use game_texture_codec_common::decoded_4x4_block::Decoded4x4Block;

/// Size of an ETC2 RGBA8 block in bytes.
pub const ETC2_RGBA8_BLOCK_SIZE: usize = 16;

const MODIFIERS: [[i32; 4]; 8] = [
    [2, 8, -2, -8],
    [5, 17, -5, -17],
    [9, 29, -9, -29],
    [13, 42, -13, -42],
    [18, 60, -18, -60],
    [24, 80, -24, -80],
    [33, 106, -33, -106],
    [47, 183, -47, -183],
];

const DISTANCES: [i32; 8] = [3, 6, 11, 16, 23, 32, 41, 64];

#[rustfmt::skip]
const EAC_MODIFIERS: [[i32; 8]; 16] = [
    [-3, -6, -9, -15, 2, 5, 8, 14],
    [-3, -7, -10, -13, 2, 6, 9, 12],
    [-2, -5, -8, -13, 1, 4, 7, 12],
    [-2, -4, -6, -13, 1, 3, 5, 12],
    [-3, -6, -8, -12, 2, 5, 7, 11],
    [-3, -7, -9, -11, 2, 6, 8, 10],
    [-4, -7, -8, -11, 3, 6, 7, 10],
    [-3, -5, -8, -11, 2, 4, 7, 10],
    [-2, -6, -8, -10, 1, 5, 7, 9],
    [-2, -5, -8, -10, 1, 4, 7, 9],
    [-2, -4, -8, -10, 1, 3, 7, 9],
    [-2, -5, -7, -10, 1, 4, 6, 9],
    [-3, -4, -7, -10, 2, 3, 6, 9],
    [-1, -2, -3, -10, 0, 1, 2, 9],
    [-4, -6, -8, -9, 3, 5, 7, 8],
    [-3, -5, -7, -9, 2, 4, 6, 8],
];

type Rgb = [i32; 3];

#[inline(always)]
fn clamp(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

#[inline(always)]
fn expand4(value: u8) -> i32 {
    (value as i32 & 0xF) * 17
}

#[inline(always)]
fn expand5(value: u8) -> i32 {
    let value = value as i32 & 0x1F;
    (value << 3) | (value >> 2)
}

#[inline(always)]
fn expand6(value: u8) -> i32 {
    let value = value as i32 & 0x3F;
    (value << 2) | (value >> 4)
}

#[inline(always)]
fn expand7(value: u8) -> i32 {
    let value = value as i32 & 0x7F;
    (value << 1) | (value >> 6)
}

/// Sign extends a 3-bit two's complement delta.
#[inline(always)]
fn delta3(value: u8) -> i32 {
    (((value & 7) << 5) as i8 >> 5) as i32
}

#[inline(always)]
fn offset(color: Rgb, amount: i32) -> Rgb {
    color.map(|channel| channel + amount)
}

#[inline(always)]
fn to_color(color: Rgb) -> Color8888 {
    Color8888::new(clamp(color[0]), clamp(color[1]), clamp(color[2]), 255)
}

/// 2-bit paint/modifier index of the pixel at `(x, y)`.
#[inline(always)]
fn pixel_index(indices: u32, x: usize, y: usize) -> usize {
    let bit = x * 4 + y;
    let msb = (indices >> (16 + bit)) & 1;
    let lsb = (indices >> bit) & 1;
    ((msb << 1) | lsb) as usize
}

/// Decodes the 8 byte ETC2 colour block. Every pixel is opaque.
pub fn decode_etc2_rgb_block(block: &[u8; 8]) -> Decoded4x4Block {
    let [b0, b1, b2, b3, b4, b5, b6, b7] = *block;
    let indices = u32::from_be_bytes([b4, b5, b6, b7]);
    let differential = b3 & 0b10 != 0;
    let flip = b3 & 0b01 != 0;

    if !differential {
        let first = [expand4(b0 >> 4), expand4(b1 >> 4), expand4(b2 >> 4)];
        let second = [expand4(b0), expand4(b1), expand4(b2)];
        return decode_subblocks(first, second, b3, flip, indices);
    }

    let red = (b0 >> 3) as i32 + delta3(b0);
    let green = (b1 >> 3) as i32 + delta3(b1);
    let blue = (b2 >> 3) as i32 + delta3(b2);

    if !(0..32).contains(&red) {
        decode_t_mode(block, indices)
    } else if !(0..32).contains(&green) {
        decode_h_mode(block, indices)
    } else if !(0..32).contains(&blue) {
        decode_planar(block)
    } else {
        let first = [expand5(b0 >> 3), expand5(b1 >> 3), expand5(b2 >> 3)];
        let second = [expand5(red as u8), expand5(green as u8), expand5(blue as u8)];
        decode_subblocks(first, second, b3, flip, indices)
    }
}

/// Individual and differential modes: two base colours, each with its own modifier table.
fn decode_subblocks(first: Rgb, second: Rgb, b3: u8, flip: bool, indices: u32) -> Decoded4x4Block {
    let first_table = &MODIFIERS[((b3 >> 5) & 7) as usize];
    let second_table = &MODIFIERS[((b3 >> 2) & 7) as usize];

    let mut result = Decoded4x4Block::default();
    for y in 0..4 {
        for x in 0..4 {
            let in_second = if flip { y >= 2 } else { x >= 2 };
            let (base, table) = if in_second {
                (second, second_table)
            } else {
                (first, first_table)
            };
            let modifier = table[pixel_index(indices, x, y)];
            result.set_pixel(x, y, to_color(offset(base, modifier)));
        }
    }
    result
}

fn paint(table: [Rgb; 4], indices: u32) -> Decoded4x4Block {
    let mut result = Decoded4x4Block::default();
    for y in 0..4 {
        for x in 0..4 {
            result.set_pixel(x, y, to_color(table[pixel_index(indices, x, y)]));
        }
    }
    result
}

fn decode_t_mode(block: &[u8; 8], indices: u32) -> Decoded4x4Block {
    let [b0, b1, b2, b3, ..] = *block;
    let c1 = [
        expand4((((b0 >> 3) & 3) << 2) | (b0 & 3)),
        expand4(b1 >> 4),
        expand4(b1),
    ];
    let c2 = [expand4(b2 >> 4), expand4(b2), expand4(b3 >> 4)];
    let distance = DISTANCES[((((b3 >> 2) & 3) << 1) | (b3 & 1)) as usize];

    paint([c1, offset(c2, distance), c2, offset(c2, -distance)], indices)
}

fn decode_h_mode(block: &[u8; 8], indices: u32) -> Decoded4x4Block {
    let [b0, b1, b2, b3, ..] = *block;
    let red1 = (b0 >> 3) & 0xF;
    let green1 = ((b0 & 7) << 1) | ((b1 >> 4) & 1);
    let blue1 = (b1 & 8) | ((b1 & 3) << 1) | (b2 >> 7);
    let red2 = (b2 >> 3) & 0xF;
    let green2 = ((b2 & 7) << 1) | (b3 >> 7);
    let blue2 = (b3 >> 3) & 0xF;

    let packed1 = ((red1 as u32) << 8) | ((green1 as u32) << 4) | blue1 as u32;
    let packed2 = ((red2 as u32) << 8) | ((green2 as u32) << 4) | blue2 as u32;
    let distance_index = (((b3 >> 2) & 1) << 2) | ((b3 & 1) << 1) | (packed1 >= packed2) as u8;
    let distance = DISTANCES[distance_index as usize];

    let c1 = [expand4(red1), expand4(green1), expand4(blue1)];
    let c2 = [expand4(red2), expand4(green2), expand4(blue2)];
    paint(
        [
            offset(c1, distance),
            offset(c1, -distance),
            offset(c2, distance),
            offset(c2, -distance),
        ],
        indices,
    )
}

fn decode_planar(block: &[u8; 8]) -> Decoded4x4Block {
    let [b0, b1, b2, b3, b4, b5, b6, b7] = *block;
    let origin = [
        expand6(b0 >> 1),
        expand7(((b0 & 1) << 6) | ((b1 >> 1) & 0x3F)),
        expand6(((b1 & 1) << 5) | (b2 & 0x18) | ((b2 & 3) << 1) | (b3 >> 7)),
    ];
    let horizontal = [
        expand6((((b3 >> 2) & 0x1F) << 1) | (b3 & 1)),
        expand7(b4 >> 1),
        expand6(((b4 & 1) << 5) | (b5 >> 3)),
    ];
    let vertical = [
        expand6(((b5 & 7) << 3) | (b6 >> 5)),
        expand7(((b6 & 0x1F) << 2) | (b7 >> 6)),
        expand6(b7),
    ];

    let mut result = Decoded4x4Block::default();
    for y in 0..4i32 {
        for x in 0..4i32 {
            let channel = |c: usize| {
                (x * (horizontal[c] - origin[c]) + y * (vertical[c] - origin[c]) + 4 * origin[c] + 2)
                    >> 2
            };
            result.set_pixel(
                x as usize,
                y as usize,
                to_color([channel(0), channel(1), channel(2)]),
            );
        }
    }
    result
}

/// Decodes an 8 byte EAC alpha block into 16 row-major values.
pub fn decode_eac_alpha_block(block: &[u8; 8]) -> [u8; 16] {
    let base = block[0] as i32;
    let multiplier = (block[1] >> 4) as i32;
    let table = &EAC_MODIFIERS[(block[1] & 0xF) as usize];
    let bits = u64::from_be_bytes(*block);

    let mut values = [0u8; 16];
    for y in 0..4 {
        for x in 0..4 {
            let index = ((bits >> (45 - 3 * (x * 4 + y))) & 7) as usize;
            values[y * 4 + x] = clamp(base + table[index] * multiplier);
        }
    }
    values
}

/// Decodes a single ETC2 RGBA8 block.
pub fn decode_etc2_rgba8_block(block: &[u8; 16]) -> Decoded4x4Block {
    let (alpha, color) = crate::format::split_block(block);
    let mut result = decode_etc2_rgb_block(&color);
    for (pixel, a) in result.pixels.iter_mut().zip(decode_eac_alpha_block(&alpha)) {
        pixel.a = a;
    }
    result
}

/// Safely wraps [`decode_etc2_rgba8_block`] for use with slices
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline(always)]
pub fn decode_etc2_rgba8_block_from_slice(src: &[u8]) -> Option<Decoded4x4Block> {
    src.first_chunk::<ETC2_RGBA8_BLOCK_SIZE>()
        .map(decode_etc2_rgba8_block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn individual_mode_applies_modifier() {
        let decoded = decode_etc2_rgb_block(&[0x88, 0x88, 0x88, 0x00, 0, 0, 0, 0]);
        assert!(decoded
            .pixels
            .iter()
            .all(|&p| p == Color8888::new(138, 138, 138, 255)));
    }

    #[test]
    fn individual_mode_flip_splits_rows() {
        // first half 0x0, second half 0xF; table 0, flip set
        let decoded = decode_etc2_rgb_block(&[0x0F, 0x0F, 0x0F, 0x01, 0, 0, 0, 0]);
        assert_eq!(decoded.get_pixel(3, 1).r, 2);
        assert_eq!(decoded.get_pixel(0, 2).r, 255);
    }

    #[test]
    fn differential_mode_applies_delta() {
        // r = 16, dr = +1 -> second base 17
        let decoded = decode_etc2_rgb_block(&[0x81, 0x80, 0x80, 0x02, 0, 0, 0, 0]);
        assert_eq!(decoded.get_pixel(0, 0).r, expand5(16) as u8 + 2);
        assert_eq!(decoded.get_pixel(3, 0).r, expand5(17) as u8 + 2);
        assert_eq!(decoded.get_pixel(3, 0).g, expand5(16) as u8 + 2);
    }

    #[test]
    fn red_overflow_selects_t_mode() {
        let block = [0xF9, 0x00, 0xF0, 0x02, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(decode_etc2_rgb_block(&block).pixels[0], Color8888::new(221, 0, 0, 255));

        let block = [0xF9, 0x00, 0xF0, 0x02, 0x00, 0x00, 0xFF, 0xFF];
        assert_eq!(decode_etc2_rgb_block(&block).pixels[0], Color8888::new(255, 3, 3, 255));
    }

    #[test]
    fn green_overflow_selects_h_mode() {
        let block = [0x00, 0x07, 0x00, 0x02, 0, 0, 0, 0];
        assert_eq!(decode_etc2_rgb_block(&block).pixels[0], Color8888::new(6, 6, 108, 255));
    }

    #[test]
    fn blue_overflow_selects_planar_mode() {
        let decoded = decode_etc2_rgb_block(&[0x00, 0x00, 0x07, 0x02, 0, 0, 0, 0]);
        assert_eq!(decoded.get_pixel(0, 0), Color8888::new(0, 0, 24, 255));
        assert_eq!(decoded.get_pixel(1, 0), Color8888::new(0, 0, 18, 255));
        assert_eq!(decoded.get_pixel(3, 3), Color8888::new(0, 0, 0, 255));
    }

    #[test]
    fn eac_alpha_uses_column_major_indices() {
        let block = [100, 0x1D, 0xE0, 0, 0, 0, 0, 0];
        let values = decode_eac_alpha_block(&block);
        assert_eq!(values[0], 109);
        assert!(values[1..].iter().all(|&a| a == 99));
    }

    #[test]
    fn rgba_block_combines_alpha_and_colour() {
        let mut block = [0u8; 16];
        block[0] = 100;
        block[1] = 0x1D;
        block[8..12].copy_from_slice(&[0x88, 0x88, 0x88, 0x00]);

        let decoded = decode_etc2_rgba8_block(&block);
        assert_eq!(decoded.pixels[5], Color8888::new(138, 138, 138, 99));
    }
}
