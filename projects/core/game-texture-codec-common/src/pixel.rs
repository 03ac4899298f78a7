//! # Packed ARGB32 Pixels
//!
//! Every decoder in the workspace produces pixels as a single [`u32`] laid out as
//! `(alpha << 24) | (red << 16) | (green << 8) | blue`. This module holds the small
//! helpers used to build and pick apart such values, plus the conversions from
//! floating point channels.

use half::f16;

/// A packed `0xAARRGGBB` pixel.
pub type Pixel = u32;

/// Fully opaque alpha, pre-shifted into position.
pub const OPAQUE: Pixel = 0xFF00_0000;

/// Packs four 8-bit channels into a [`Pixel`].
///
/// # Examples
///
/// ```
/// use game_texture_codec_common::pixel::argb;
///
/// assert_eq!(argb(0xFF, 0x12, 0x34, 0x56), 0xFF12_3456);
/// ```
#[inline(always)]
pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Pixel {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Alpha channel of a packed pixel.
#[inline(always)]
pub const fn alpha(pixel: Pixel) -> u8 {
    (pixel >> 24) as u8
}

/// Red channel of a packed pixel.
#[inline(always)]
pub const fn red(pixel: Pixel) -> u8 {
    (pixel >> 16) as u8
}

/// Green channel of a packed pixel.
#[inline(always)]
pub const fn green(pixel: Pixel) -> u8 {
    (pixel >> 8) as u8
}

/// Blue channel of a packed pixel.
#[inline(always)]
pub const fn blue(pixel: Pixel) -> u8 {
    pixel as u8
}

/// Replaces the alpha channel of a packed pixel.
#[inline(always)]
pub const fn with_alpha(pixel: Pixel, a: u8) -> Pixel {
    (pixel & 0x00FF_FFFF) | ((a as u32) << 24)
}

/// Summed absolute difference of all four channels.
///
/// Palette matching and colour reduction compare colours with this.
#[inline]
pub fn channel_distance(a: Pixel, b: Pixel) -> u32 {
    let diff = |x: u8, y: u8| (x as i32 - y as i32).unsigned_abs();
    diff(alpha(a), alpha(b)) + diff(red(a), red(b)) + diff(green(a), green(b)) + diff(blue(a), blue(b))
}

/// Converts a floating point channel to 8 bits.
///
/// The value is clamped to `[0, 1]`, scaled by 255 and truncated. `NaN` maps to 0.
#[inline]
pub fn unorm_f32_to_u8(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

/// Converts an IEEE-754 half precision channel to 8 bits.
///
/// The half is widened to `f32` exactly (exponent rebias, subnormal renormalisation)
/// and then scaled by [`unorm_f32_to_u8`].
#[inline]
pub fn unorm_f16_to_u8(bits: u16) -> u8 {
    unorm_f32_to_u8(f16::from_bits(bits).to_f32())
}

/// Converts a 16-bit unsigned normalized channel to 8 bits.
#[inline]
pub fn unorm16_to_u8(value: u16) -> u8 {
    (value as f32 / 65535.0 * 255.0) as u8
}
