//! # Morton (Z-order) Swizzle
//!
//! The tiled position of the unit at `(x, y)` is the interleave of the coordinates' bits,
//! `x` taking the even bits and `y` the odd bits:
//!
//! ```text
//! x = x2 x1 x0, y = y2 y1 y0  ->  y2 x2 y1 x1 y0 x0
//! ```
//!
//! A unit is `block_size` consecutive elements, e.g. a 4 byte pixel or an 8 byte BC1 block.

use alloc::vec;
use alloc::vec::Vec;

/// Interleaves the bits of `x` (even bits) and `y` (odd bits).
///
/// # Examples
///
/// ```
/// use game_texture_codec_swizzle::morton::calculate_morton_2d;
///
/// assert_eq!(calculate_morton_2d(1, 0), 1);
/// assert_eq!(calculate_morton_2d(0, 1), 2);
/// assert_eq!(calculate_morton_2d(3, 3), 15);
/// ```
#[inline]
pub const fn calculate_morton_2d(x: u32, y: u32) -> u64 {
    spread_bits(x) | (spread_bits(y) << 1)
}

/// Spreads the 32 bits of `value` over the even bits of a `u64`.
#[inline(always)]
const fn spread_bits(value: u32) -> u64 {
    let mut v = value as u64;
    v = (v | (v << 16)) & 0x0000_FFFF_0000_FFFF;
    v = (v | (v << 8)) & 0x00FF_00FF_00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333_3333_3333;
    v = (v | (v << 1)) & 0x5555_5555_5555_5555;
    v
}

/// Converts Morton ordered data into linear (row-major) order.
///
/// `width` and `height` count units of `block_size` elements. Linear unit `y * width + x`
/// is read from Morton unit [`calculate_morton_2d`]`(x, y)`. The result has the same
/// length as `data`; units whose Morton position lies past the end of `data` are skipped
/// and stay zeroed.
///
/// # Examples
///
/// ```
/// use game_texture_codec_swizzle::morton::unswizzle_morton;
///
/// // 2x2 units of one byte: Morton order is (0,0) (1,0) (0,1) (1,1), the same as linear.
/// assert_eq!(unswizzle_morton(&[1u8, 2, 3, 4], 2, 2, 1), [1, 2, 3, 4]);
///
/// // 4x1 has units at Morton 0, 1, 4, 5: the last two fall outside the buffer.
/// assert_eq!(unswizzle_morton(&[1u8, 2, 3, 4], 4, 1, 1), [1, 2, 0, 0]);
/// ```
pub fn unswizzle_morton<T: Copy + Default>(
    data: &[T],
    width: u32,
    height: u32,
    block_size: usize,
) -> Vec<T> {
    let mut result = vec![T::default(); data.len()];
    for_each_unit(width, height, |linear, morton| {
        crate::copy_block(data, morton, &mut result, linear, block_size);
    });
    result
}

/// Converts linear (row-major) data into Morton order; the inverse of [`unswizzle_morton`].
///
/// Units whose Morton position lies past the end of the output are skipped.
pub fn swizzle_morton<T: Copy + Default>(
    data: &[T],
    width: u32,
    height: u32,
    block_size: usize,
) -> Vec<T> {
    let mut result = vec![T::default(); data.len()];
    for_each_unit(width, height, |linear, morton| {
        crate::copy_block(data, linear, &mut result, morton, block_size);
    });
    result
}

/// Calls `f(linear_index, morton_index)` for every unit in raster order.
#[inline(always)]
fn for_each_unit(width: u32, height: u32, mut f: impl FnMut(usize, usize)) {
    let mut linear = 0usize;
    for y in 0..height {
        for x in 0..width {
            let morton = calculate_morton_2d(x, y);
            if let Ok(morton) = usize::try_from(morton) {
                f(linear, morton);
            }
            linear += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 0)]
    #[case(2, 0, 4)]
    #[case(0, 2, 8)]
    #[case(5, 3, 0b01_10_11)]
    #[case(u32::MAX, 0, 0x5555_5555_5555_5555)]
    #[case(0, u32::MAX, 0xAAAA_AAAA_AAAA_AAAA)]
    fn interleaves_bits(#[case] x: u32, #[case] y: u32, #[case] expected: u64) {
        assert_eq!(calculate_morton_2d(x, y), expected);
    }

    #[test]
    fn unswizzles_four_by_four() {
        // Morton order of a 4x4 grid, written as the linear index each unit belongs to.
        let swizzled: [u8; 16] = [0, 1, 4, 5, 2, 3, 6, 7, 8, 9, 12, 13, 10, 11, 14, 15];
        let linear = unswizzle_morton(&swizzled, 4, 4, 1);
        let expected: Vec<u8> = (0..16).collect();
        assert_eq!(linear, expected);
    }

    #[rstest]
    #[case(4, 4, 1)]
    #[case(8, 8, 4)]
    #[case(16, 16, 8)]
    #[case(4, 2, 16)]
    fn swizzle_is_inverted_by_unswizzle(
        #[case] width: u32,
        #[case] height: u32,
        #[case] block_size: usize,
    ) {
        let data: Vec<u8> = (0..width as usize * height as usize * block_size)
            .map(|i| (i % 251) as u8)
            .collect();
        let swizzled = swizzle_morton(&data, width, height, block_size);
        assert_ne!(swizzled, data);
        assert_eq!(unswizzle_morton(&swizzled, width, height, block_size), data);
    }

    #[test]
    fn works_on_u32_pixels() {
        let data: Vec<u32> = (0..64).map(|i| 0xFF00_0000 | i).collect();
        let swizzled = swizzle_morton(&data, 8, 8, 1);
        assert_eq!(unswizzle_morton(&swizzled, 8, 8, 1), data);
    }

    #[test]
    fn out_of_range_units_are_skipped() {
        // 2x4 reaches Morton index 10 for (0, 3); data only holds 8 units.
        let data: Vec<u8> = (1..=8).collect();
        let linear = unswizzle_morton(&data, 2, 4, 1);
        assert_eq!(&linear[..4], &[1, 2, 3, 4]);
        assert_eq!(&linear[4..], &[0, 0, 0, 0]);
    }
}
