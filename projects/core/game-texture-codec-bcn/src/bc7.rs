//! # BC7
//!
//! A 16 byte block with eight modes. The mode is the position of the lowest set bit of
//! the first byte; a first byte of zero is reserved and decodes to transparent black.
//!
//! Every mode stores, in order: the mode bits, an optional partition, rotation and index
//! selector, the colour endpoints (all reds, then all greens, then all blues), the alpha
//! endpoints, the p-bits and finally one or two index sets. Fields are read LSB first.

use game_texture_codec_common::color_8888::Color8888;
use game_texture_codec_common::decoded_4x4_block::Decoded4x4Block;
use likely_stable::unlikely;

/// Size of a BC7 block in bytes.
pub const BC7_BLOCK_SIZE: usize = 16;

/// Field widths of one BC7 mode.
#[derive(Debug, Clone, Copy)]
struct ModeInfo {
    subsets: usize,
    partition_bits: usize,
    rotation_bits: usize,
    index_selection_bits: usize,
    color_bits: usize,
    alpha_bits: usize,
    endpoint_pbits: bool,
    shared_pbits: bool,
    index_bits: usize,
    secondary_index_bits: usize,
}

#[allow(clippy::too_many_arguments)]
const fn mode(
    subsets: usize,
    partition_bits: usize,
    rotation_bits: usize,
    index_selection_bits: usize,
    color_bits: usize,
    alpha_bits: usize,
    endpoint_pbits: bool,
    shared_pbits: bool,
    index_bits: usize,
    secondary_index_bits: usize,
) -> ModeInfo {
    ModeInfo {
        subsets,
        partition_bits,
        rotation_bits,
        index_selection_bits,
        color_bits,
        alpha_bits,
        endpoint_pbits,
        shared_pbits,
        index_bits,
        secondary_index_bits,
    }
}

#[rustfmt::skip]
const MODES: [ModeInfo; 8] = [
    mode(3, 4, 0, 0, 4, 0, true,  false, 3, 0),
    mode(2, 6, 0, 0, 6, 0, false, true,  3, 0),
    mode(3, 6, 0, 0, 5, 0, false, false, 2, 0),
    mode(2, 6, 0, 0, 7, 0, true,  false, 2, 0),
    mode(1, 0, 2, 1, 5, 6, false, false, 2, 3),
    mode(1, 0, 2, 0, 7, 8, false, false, 2, 2),
    mode(1, 0, 0, 0, 7, 7, true,  false, 4, 0),
    mode(2, 6, 0, 0, 5, 5, true,  false, 2, 0),
];

const WEIGHTS_2: [u32; 4] = [0, 21, 43, 64];
const WEIGHTS_3: [u32; 8] = [0, 9, 18, 27, 37, 46, 55, 64];
const WEIGHTS_4: [u32; 16] = [0, 4, 9, 13, 17, 21, 26, 30, 34, 38, 43, 47, 51, 55, 60, 64];

/// Two subset partitions; bit `i` is the subset of pixel `i`.
#[rustfmt::skip]
const PARTITIONS_2: [u16; 64] = [
    0xCCCC, 0x8888, 0xEEEE, 0xECC8, 0xC880, 0xFEEC, 0xFEC8, 0xEC80,
    0xC800, 0xFFEC, 0xFE80, 0xE800, 0xFFE8, 0xFF00, 0xFFF0, 0xF000,
    0xF710, 0x008E, 0x7100, 0x08CE, 0x008C, 0x7310, 0x3100, 0x8CCE,
    0x088C, 0x3110, 0x6666, 0x366C, 0x17E8, 0x0FF0, 0x718E, 0x399C,
    0xAAAA, 0xF0F0, 0x5A5A, 0x33CC, 0x3C3C, 0x55AA, 0x9696, 0xA55A,
    0x73CE, 0x13C8, 0x324C, 0x3BDC, 0x6996, 0xC33C, 0x9966, 0x0660,
    0x0272, 0x04E4, 0x4E40, 0x2720, 0xC936, 0x936C, 0x39C6, 0x639C,
    0x9336, 0x9CC6, 0x817E, 0xE718, 0xCCF0, 0x0FCC, 0x7744, 0xEE22,
];

#[rustfmt::skip]
const PARTITIONS_3: [[u8; 16]; 64] = [
    [0,0,1,1,0,0,1,1,0,2,2,1,2,2,2,2], [0,0,0,1,0,0,1,1,2,2,1,1,2,2,2,1],
    [0,0,0,0,2,0,0,1,2,2,1,1,2,2,1,1], [0,2,2,2,0,0,2,2,0,0,1,1,0,1,1,1],
    [0,0,0,0,0,0,0,0,1,1,2,2,1,1,2,2], [0,0,1,1,0,0,1,1,0,0,2,2,0,0,2,2],
    [0,0,2,2,0,0,2,2,1,1,1,1,1,1,1,1], [0,0,1,1,0,0,1,1,2,2,1,1,2,2,1,1],
    [0,0,0,0,0,0,0,0,1,1,1,1,2,2,2,2], [0,0,0,0,1,1,1,1,1,1,1,1,2,2,2,2],
    [0,0,0,0,1,1,1,1,2,2,2,2,2,2,2,2], [0,0,1,2,0,0,1,2,0,0,1,2,0,0,1,2],
    [0,1,1,2,0,1,1,2,0,1,1,2,0,1,1,2], [0,1,2,2,0,1,2,2,0,1,2,2,0,1,2,2],
    [0,0,1,1,0,1,1,2,1,1,2,2,1,2,2,2], [0,0,1,1,2,0,0,1,2,2,0,0,2,2,2,0],
    [0,0,0,1,0,0,1,1,0,1,1,2,1,1,2,2], [0,1,1,1,0,0,1,1,2,0,0,1,2,2,0,0],
    [0,0,0,0,1,1,2,2,1,1,2,2,1,1,2,2], [0,0,2,2,0,0,2,2,0,0,2,2,1,1,1,1],
    [0,1,1,1,0,1,1,1,0,2,2,2,0,2,2,2], [0,0,0,1,0,0,0,1,2,2,2,1,2,2,2,1],
    [0,0,0,0,0,0,1,1,0,1,2,2,0,1,2,2], [0,0,0,0,1,1,0,0,2,2,1,0,2,2,1,0],
    [0,1,2,2,0,1,2,2,0,0,1,1,0,0,0,0], [0,0,1,2,0,0,1,2,1,1,2,2,2,2,2,2],
    [0,1,1,0,1,2,2,1,1,2,2,1,0,1,1,0], [0,0,0,0,0,1,1,0,1,2,2,1,1,2,2,1],
    [0,0,2,2,1,1,0,2,1,1,0,2,0,0,2,2], [0,1,1,0,0,1,1,0,2,0,0,2,2,2,2,2],
    [0,0,1,1,0,1,2,2,0,1,2,2,0,0,1,1], [0,0,0,0,2,0,0,0,2,2,1,1,2,2,2,1],
    [0,0,0,0,0,0,0,2,1,1,2,2,1,2,2,2], [0,2,2,2,0,0,2,2,0,0,1,2,0,0,1,1],
    [0,0,1,1,0,0,1,2,0,0,2,2,0,2,2,2], [0,1,2,0,0,1,2,0,0,1,2,0,0,1,2,0],
    [0,0,0,0,1,1,1,1,2,2,2,2,0,0,0,0], [0,1,2,0,1,2,0,1,2,0,1,2,0,1,2,0],
    [0,1,2,0,2,0,1,2,1,2,0,1,0,1,2,0], [0,0,1,1,2,2,0,0,1,1,2,2,0,0,1,1],
    [0,0,1,1,1,1,2,2,2,2,0,0,0,0,1,1], [0,1,0,1,0,1,0,1,2,2,2,2,2,2,2,2],
    [0,0,0,0,0,0,0,0,2,1,2,1,2,1,2,1], [0,0,2,2,1,1,2,2,0,0,2,2,1,1,2,2],
    [0,0,2,2,0,0,1,1,0,0,2,2,0,0,1,1], [0,2,2,0,1,2,2,1,0,2,2,0,1,2,2,1],
    [0,1,0,1,2,2,2,2,2,2,2,2,0,1,0,1], [0,0,0,0,2,1,2,1,2,1,2,1,2,1,2,1],
    [0,1,0,1,0,1,0,1,0,1,0,1,2,2,2,2], [0,2,2,2,0,1,1,1,0,2,2,2,0,1,1,1],
    [0,0,0,2,1,1,1,2,0,0,0,2,1,1,1,2], [0,0,0,0,2,1,1,2,2,1,1,2,2,1,1,2],
    [0,2,2,2,0,1,1,1,0,1,1,1,0,2,2,2], [0,0,0,2,1,1,1,2,1,1,1,2,0,0,0,2],
    [0,1,1,0,0,1,1,0,0,1,1,0,2,2,2,2], [0,0,0,0,0,0,0,0,2,1,1,2,2,1,1,2],
    [0,1,1,0,0,1,1,0,2,2,2,2,2,2,2,2], [0,0,2,2,0,0,1,1,0,0,1,1,0,0,2,2],
    [0,0,2,2,1,1,2,2,1,1,2,2,0,0,2,2], [0,0,0,0,0,0,0,0,0,0,0,0,2,1,1,2],
    [0,0,0,2,0,0,0,1,0,0,0,2,0,0,0,1], [0,2,2,2,1,2,2,2,0,2,2,2,1,2,2,2],
    [0,1,0,1,2,2,2,2,2,2,2,2,2,2,2,2], [0,1,1,1,2,0,1,1,2,2,0,1,2,2,2,0],
];

/// Anchor of the second subset in two subset partitions.
#[rustfmt::skip]
const ANCHORS_2: [u8; 64] = [
    15,15,15,15,15,15,15,15, 15,15,15,15,15,15,15,15,
    15, 2, 8, 2, 2, 8, 8,15,  2, 8, 2, 2, 8, 8, 2, 2,
    15,15, 6, 8, 2, 8,15,15,  2, 8, 2, 2, 2,15,15, 6,
     6, 2, 6, 8,15,15, 2, 2, 15,15,15,15,15, 2, 2,15,
];

/// Anchor of the second subset in three subset partitions.
#[rustfmt::skip]
const ANCHORS_3_SECOND: [u8; 64] = [
     3, 3,15,15, 8, 3,15,15,  8, 8, 6, 6, 6, 5, 3, 3,
     3, 3, 8,15, 3, 3, 6,10,  5, 8, 8, 6, 8, 5,15,15,
     8,15, 3, 5, 6,10, 8,15, 15, 3,15, 5,15,15,15,15,
     3,15, 5, 5, 5, 8, 5,10,  5,10, 8,13,15,12, 3, 3,
];

/// Anchor of the third subset in three subset partitions.
#[rustfmt::skip]
const ANCHORS_3_THIRD: [u8; 64] = [
    15, 8, 8, 3,15,15, 3, 8, 15,15,15,15,15,15,15, 8,
    15, 8,15, 3,15, 8,15, 8,  3,15, 6,10,15,15,10, 8,
    15, 3,15,10,10, 8, 9,10,  6,15, 8,15, 3, 6, 6, 8,
    15, 3,15,15,15,15,15,15, 15,15,15,15, 3,15,15, 8,
];

/// LSB-first reader over the 128 bits of a block.
struct BitReader<'a> {
    data: &'a [u8; 16],
    position: usize,
}

impl<'a> BitReader<'a> {
    fn new(data: &'a [u8; 16]) -> Self {
        Self { data, position: 0 }
    }

    fn read(&mut self, count: usize) -> u8 {
        let mut value = 0u32;
        for bit in 0..count {
            let position = self.position + bit;
            if let Some(byte) = self.data.get(position >> 3) {
                value |= (((byte >> (position & 7)) & 1) as u32) << bit;
            }
        }
        self.position += count;
        value as u8
    }
}

#[inline(always)]
fn subset_of(info: &ModeInfo, partition: usize, pixel: usize) -> usize {
    match info.subsets {
        2 => ((PARTITIONS_2[partition] >> pixel) & 1) as usize,
        3 => PARTITIONS_3[partition][pixel] as usize,
        _ => 0,
    }
}

#[inline(always)]
fn is_anchor(info: &ModeInfo, partition: usize, pixel: usize) -> bool {
    if pixel == 0 {
        return true;
    }
    match info.subsets {
        2 => pixel == ANCHORS_2[partition] as usize,
        3 => {
            pixel == ANCHORS_3_SECOND[partition] as usize
                || pixel == ANCHORS_3_THIRD[partition] as usize
        }
        _ => false,
    }
}

/// Widens an `bits` wide value to 8 bits by replicating its top bits.
#[inline(always)]
fn expand(value: u8, bits: usize) -> u8 {
    if bits >= 8 {
        return value;
    }
    let shifted = (value as u32) << (8 - bits);
    (shifted | (shifted >> bits)) as u8
}

#[inline(always)]
fn interpolate(e0: u8, e1: u8, weight: u32) -> u8 {
    (((64 - weight) * e0 as u32 + weight * e1 as u32 + 32) >> 6) as u8
}

#[inline(always)]
fn weight(bits: usize, index: u8) -> u32 {
    match bits {
        2 => WEIGHTS_2[(index & 3) as usize],
        3 => WEIGHTS_3[(index & 7) as usize],
        _ => WEIGHTS_4[(index & 15) as usize],
    }
}

/// Decodes a single BC7 block.
///
/// # Examples
///
/// ```
/// use game_texture_codec_bcn::bc7::decode_bc7_block;
/// use game_texture_codec_common::color_8888::Color8888;
///
/// // The reserved mode decodes to transparent black.
/// let block = decode_bc7_block(&[0; 16]);
/// assert!(block.pixels.iter().all(|&p| p == Color8888::TRANSPARENT));
/// ```
pub fn decode_bc7_block(block: &[u8; 16]) -> Decoded4x4Block {
    if unlikely(block[0] == 0) {
        return Decoded4x4Block::default();
    }

    let mode_index = block[0].trailing_zeros() as usize;
    let info = MODES[mode_index];
    let mut bits = BitReader::new(block);
    bits.read(mode_index + 1);

    let partition = bits.read(info.partition_bits) as usize;
    let rotation = bits.read(info.rotation_bits);
    let index_selection = bits.read(info.index_selection_bits);

    // [endpoint][channel], two endpoints per subset
    let endpoint_count = info.subsets * 2;
    let mut endpoints = [[0u8; 4]; 6];
    for channel in 0..3 {
        for endpoint in endpoints.iter_mut().take(endpoint_count) {
            endpoint[channel] = bits.read(info.color_bits);
        }
    }
    if info.alpha_bits > 0 {
        for endpoint in endpoints.iter_mut().take(endpoint_count) {
            endpoint[3] = bits.read(info.alpha_bits);
        }
    }

    let mut pbits = [0u8; 6];
    if info.endpoint_pbits {
        for pbit in pbits.iter_mut().take(endpoint_count) {
            *pbit = bits.read(1);
        }
    } else if info.shared_pbits {
        for subset in 0..info.subsets {
            let pbit = bits.read(1);
            pbits[subset * 2] = pbit;
            pbits[subset * 2 + 1] = pbit;
        }
    }

    let has_pbits = info.endpoint_pbits || info.shared_pbits;
    let color_precision = info.color_bits + has_pbits as usize;
    let alpha_precision = info.alpha_bits + has_pbits as usize;
    for (endpoint, pbit) in endpoints.iter_mut().zip(pbits).take(endpoint_count) {
        for channel in endpoint.iter_mut().take(3) {
            let value = if has_pbits { (*channel << 1) | pbit } else { *channel };
            *channel = expand(value, color_precision);
        }

        endpoint[3] = if info.alpha_bits > 0 {
            let value = if has_pbits { (endpoint[3] << 1) | pbit } else { endpoint[3] };
            expand(value, alpha_precision)
        } else {
            255
        };
    }

    let mut primary = [0u8; 16];
    for (pixel, index) in primary.iter_mut().enumerate() {
        let width = info.index_bits - is_anchor(&info, partition, pixel) as usize;
        *index = bits.read(width);
    }

    let mut secondary = [0u8; 16];
    if info.secondary_index_bits > 0 {
        for (pixel, index) in secondary.iter_mut().enumerate() {
            let width = info.secondary_index_bits - (pixel == 0) as usize;
            *index = bits.read(width);
        }
    }

    let mut result = Decoded4x4Block::default();
    for (pixel, out) in result.pixels.iter_mut().enumerate() {
        let subset = subset_of(&info, partition, pixel);
        let e0 = endpoints[subset * 2];
        let e1 = endpoints[subset * 2 + 1];

        let (color_weight, alpha_weight) = if info.secondary_index_bits == 0 {
            let w = weight(info.index_bits, primary[pixel]);
            (w, w)
        } else if index_selection == 0 {
            (
                weight(info.index_bits, primary[pixel]),
                weight(info.secondary_index_bits, secondary[pixel]),
            )
        } else {
            (
                weight(info.secondary_index_bits, secondary[pixel]),
                weight(info.index_bits, primary[pixel]),
            )
        };

        let mut color = Color8888::new(
            interpolate(e0[0], e1[0], color_weight),
            interpolate(e0[1], e1[1], color_weight),
            interpolate(e0[2], e1[2], color_weight),
            interpolate(e0[3], e1[3], alpha_weight),
        );

        match rotation {
            1 => core::mem::swap(&mut color.a, &mut color.r),
            2 => core::mem::swap(&mut color.a, &mut color.g),
            3 => core::mem::swap(&mut color.a, &mut color.b),
            _ => {}
        }

        *out = color;
    }

    result
}

/// Safely wraps [`decode_bc7_block`] for use with slices
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline(always)]
pub fn decode_bc7_block_from_slice(src: &[u8]) -> Option<Decoded4x4Block> {
    src.first_chunk::<BC7_BLOCK_SIZE>().map(decode_bc7_block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// LSB-first writer used to build test blocks.
    struct BitWriter {
        data: [u8; 16],
        position: usize,
    }

    impl BitWriter {
        fn new() -> Self {
            Self {
                data: [0; 16],
                position: 0,
            }
        }

        fn write(&mut self, value: u32, count: usize) {
            for bit in 0..count {
                if (value >> bit) & 1 != 0 {
                    let position = self.position + bit;
                    self.data[position >> 3] |= 1 << (position & 7);
                }
            }
            self.position += count;
        }
    }

    /// Mode 6 block with both endpoints set to the same 7-bit colour + p-bit.
    fn solid_mode_6(rgba: [u32; 4], pbit: u32) -> [u8; 16] {
        let mut writer = BitWriter::new();
        writer.write(1 << 6, 7);
        for channel in rgba {
            writer.write(channel, 7);
            writer.write(channel, 7);
        }
        writer.write(pbit, 1);
        writer.write(pbit, 1);
        // indices stay zero
        writer.data
    }

    #[rstest]
    #[case([127, 0, 0, 127], 1, Color8888::new(255, 1, 1, 255))]
    #[case([0, 0, 0, 0], 0, Color8888::new(0, 0, 0, 0))]
    #[case([64, 32, 16, 127], 0, Color8888::new(128, 64, 32, 254))]
    fn decodes_solid_mode_6(
        #[case] rgba: [u32; 4],
        #[case] pbit: u32,
        #[case] expected: Color8888,
    ) {
        let decoded = decode_bc7_block(&solid_mode_6(rgba, pbit));
        assert!(decoded.pixels.iter().all(|&p| p == expected), "{:?}", decoded.pixels[0]);
    }

    #[test]
    fn mode_6_interpolates_with_four_bit_weights() {
        let mut writer = BitWriter::new();
        writer.write(1 << 6, 7);
        // red 0 -> 127, green/blue 0, alpha 127 both
        writer.write(0, 7);
        writer.write(127, 7);
        writer.write(0, 14);
        writer.write(0, 14);
        writer.write(127, 7);
        writer.write(127, 7);
        // p-bits: endpoint 0 = 0, endpoint 1 = 1
        writer.write(0, 1);
        writer.write(1, 1);
        // pixel 0 (anchor) index 7 in 3 bits, pixel 1 index 15
        writer.write(7, 3);
        writer.write(15, 4);

        let decoded = decode_bc7_block(&writer.data);
        // e0.r = 0, e1.r = 255, weight 30
        assert_eq!(decoded.pixels[0].r, ((30 * 255 + 32) >> 6) as u8);
        assert_eq!(decoded.pixels[1].r, 255);
        assert_eq!(decoded.pixels[2].r, 0);
    }

    #[test]
    fn mode_5_rotation_swaps_alpha_into_red() {
        let mut writer = BitWriter::new();
        writer.write(1 << 5, 6);
        writer.write(1, 2); // rotation: alpha <-> red
        // colour endpoints (7 bits): red 0, green 127, blue 0
        writer.write(0, 14);
        writer.write(127, 7);
        writer.write(127, 7);
        writer.write(0, 14);
        // alpha endpoints (8 bits)
        writer.write(200, 8);
        writer.write(200, 8);

        let decoded = decode_bc7_block(&writer.data);
        assert_eq!(decoded.pixels[0], Color8888::new(200, 255, 0, 0));
    }

    #[test]
    fn every_mode_decodes_without_panicking() {
        for mode in 0..8 {
            let mut block = [0xA5u8; 16];
            block[0] = 1 << mode;
            let _ = decode_bc7_block(&block);
        }
    }
}
