//! # PlayStation 2 Swizzle
//!
//! The GS stores 8-bit textures in 16x16 pixel blocks. Inside a block, every pair of rows
//! is interleaved into 8-pixel column groups, and the column groups of alternate row
//! quads are rotated by 4 (the "swap selector").
//!
//! The same index function serves elements of any type: bytes of an 8-bit texture or
//! already expanded `u32` pixels. It is a bijection for widths that are a multiple of 16
//! and heights that are a multiple of 4.

use alloc::vec;
use alloc::vec::Vec;

/// Position in the swizzled buffer of the linear pixel at `(x, y)`.
///
/// # Examples
///
/// ```
/// use game_texture_codec_swizzle::ps2::ps2_swizzle_index;
///
/// assert_eq!(ps2_swizzle_index(0, 0, 16), 0);
/// assert_eq!(ps2_swizzle_index(1, 0, 16), 4);
/// assert_eq!(ps2_swizzle_index(0, 1, 16), 32);
/// ```
#[inline]
pub const fn ps2_swizzle_index(x: usize, y: usize, width: usize) -> usize {
    let block = (y & !0xF) * width + (x & !0xF) * 2;
    let swap_selector = (((y + 2) >> 2) & 1) * 4;
    let pos_y = (((y & !3) >> 1) + (y & 1)) & 7;
    let column = pos_y * width * 2 + ((x + swap_selector) & 7) * 4;
    let byte_num = ((y >> 1) & 1) + ((x >> 2) & 2);
    block + column + byte_num
}

/// Converts PS2 swizzled data to linear (row-major) order.
///
/// Elements whose swizzled position lies outside `data` are skipped and stay at their
/// default value. The result holds `width * height` elements.
pub fn unswizzle_ps2<T: Copy + Default>(data: &[T], width: u32, height: u32) -> Vec<T> {
    let (width, height) = (width as usize, height as usize);
    let mut result = vec![T::default(); width * height];
    for y in 0..height {
        for x in 0..width {
            let swizzled = ps2_swizzle_index(x, y, width);
            crate::copy_block(data, swizzled, &mut result, y * width + x, 1);
        }
    }
    result
}

/// Converts linear (row-major) data to PS2 swizzled order; the inverse of [`unswizzle_ps2`].
pub fn swizzle_ps2<T: Copy + Default>(data: &[T], width: u32, height: u32) -> Vec<T> {
    let (width, height) = (width as usize, height as usize);
    let mut result = vec![T::default(); width * height];
    for y in 0..height {
        for x in 0..width {
            let swizzled = ps2_swizzle_index(x, y, width);
            crate::copy_block(data, y * width + x, &mut result, swizzled, 1);
        }
    }
    result
}
