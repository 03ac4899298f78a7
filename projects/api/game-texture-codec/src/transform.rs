//! # Derived Transforms
//!
//! Post-decode (and pre-encode) fixups that games apply on top of a base pixel format.
//!
//! Every transform consumes an [`ImageBuffer`] and returns the result. Spatial transforms
//! move raw values, so paletted images keep their indices and palette. Colour transforms
//! rewrite the palette of a paletted image and leave its indices alone.

use crate::ImageBuffer;
use game_texture_codec_common::pixel::{alpha, argb, blue, green, red, with_alpha, Pixel};
use game_texture_codec_swizzle::{morton, ps2};
use std::sync::Arc;

/// Reverses the row order.
pub fn flip_vertical(image: ImageBuffer) -> ImageBuffer {
    let (width, height) = (image.width(), image.height());
    let pixels = image
        .pixels()
        .chunks_exact(width as usize)
        .rev()
        .flatten()
        .copied()
        .collect();
    image.with_pixels(width, height, pixels)
}

/// Rotates 90 degrees clockwise. The result is `height` x `width`.
pub fn rotate_90(image: ImageBuffer) -> ImageBuffer {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let src = image.pixels();
    let mut pixels = vec![0u32; src.len()];
    for y in 0..height {
        for x in 0..width {
            pixels[x * height + (height - 1 - y)] = src[y * width + x];
        }
    }
    image.with_pixels(height as u32, width as u32, pixels)
}

/// Swaps columns `2k` and `2k + 1` in every row. A trailing odd column stays put.
pub fn swap_column_pairs(image: ImageBuffer) -> ImageBuffer {
    let (width, height) = (image.width(), image.height());
    let mut pixels = image.pixels().to_vec();
    for row in pixels.chunks_exact_mut(width as usize) {
        for pair in row.chunks_exact_mut(2) {
            pair.swap(0, 1);
        }
    }
    image.with_pixels(width, height, pixels)
}

/// Linear row held by each stored row: `0, stride, 2 * stride, ..., 1, 1 + stride, ...`.
fn interlaced_rows(height: usize, stride: usize) -> impl Iterator<Item = usize> {
    (0..stride).flat_map(move |start| (start..height).step_by(stride))
}

/// Reorders linear rows into interlaced storage order.
///
/// Stored rows hold linear rows `0, stride, 2 * stride, ...`, then `1, 1 + stride, ...`,
/// and so on. A `stride` of 0 or 1 leaves the image unchanged.
///
/// # Examples
///
/// ```
/// use game_texture_codec::transform::{deinterlace, interlace};
/// use game_texture_codec::ImageBuffer;
///
/// let image = ImageBuffer::new(1, 5, vec![0, 1, 2, 3, 4]).unwrap();
/// let stored = interlace(image.clone(), 2);
/// assert_eq!(stored.pixels(), &[0, 2, 4, 1, 3]);
/// assert_eq!(deinterlace(stored, 2), image);
/// ```
pub fn interlace(image: ImageBuffer, stride: u32) -> ImageBuffer {
    if stride <= 1 {
        return image;
    }
    let (width, height) = (image.width(), image.height());
    let rows: Vec<&[u32]> = image.pixels().chunks_exact(width as usize).collect();
    let pixels = interlaced_rows(height as usize, stride as usize)
        .flat_map(|row| rows[row].iter().copied())
        .collect();
    image.with_pixels(width, height, pixels)
}

/// Inverse of [`interlace`].
pub fn deinterlace(image: ImageBuffer, stride: u32) -> ImageBuffer {
    if stride <= 1 {
        return image;
    }
    let (width, height) = (image.width() as usize, image.height());
    let mut pixels = vec![0u32; image.pixels().len()];
    for (stored, row) in interlaced_rows(height as usize, stride as usize).enumerate() {
        pixels[row * width..(row + 1) * width]
            .copy_from_slice(&image.pixels()[stored * width..(stored + 1) * width]);
    }
    image.with_pixels(width as u32, height, pixels)
}

/// Calls `f(linear_index)` for every in-image pixel in tile order.
///
/// Tiles are visited in raster order and pixels within a tile row by row; positions past
/// the right or bottom edge are skipped rather than stored.
fn for_each_tiled(width: usize, height: usize, block_width: usize, block_height: usize, mut f: impl FnMut(usize)) {
    for tile_y in (0..height).step_by(block_height) {
        for tile_x in (0..width).step_by(block_width) {
            for y in tile_y..(tile_y + block_height).min(height) {
                for x in tile_x..(tile_x + block_width).min(width) {
                    f(y * width + x);
                }
            }
        }
    }
}

/// Converts tile ordered pixels (`block_width` x `block_height` tiles in raster order)
/// to linear order. A zero block dimension leaves the image unchanged.
pub fn reorder_blocks(image: ImageBuffer, block_width: u32, block_height: u32) -> ImageBuffer {
    if block_width == 0 || block_height == 0 {
        return image;
    }
    let (width, height) = (image.width(), image.height());
    let src = image.pixels();
    let mut pixels = vec![0u32; src.len()];
    let mut next = 0;
    for_each_tiled(width as usize, height as usize, block_width as usize, block_height as usize, |linear| {
        pixels[linear] = src[next];
        next += 1;
    });
    image.with_pixels(width, height, pixels)
}

/// Inverse of [`reorder_blocks`].
pub fn tile_blocks(image: ImageBuffer, block_width: u32, block_height: u32) -> ImageBuffer {
    if block_width == 0 || block_height == 0 {
        return image;
    }
    let (width, height) = (image.width(), image.height());
    let src = image.pixels();
    let mut pixels = Vec::with_capacity(src.len());
    for_each_tiled(width as usize, height as usize, block_width as usize, block_height as usize, |linear| {
        pixels.push(src[linear]);
    });
    image.with_pixels(width, height, pixels)
}

/// Converts Morton (Z-order) pixels to linear order.
pub fn unswizzle_morton(image: ImageBuffer) -> ImageBuffer {
    let (width, height) = (image.width(), image.height());
    let pixels = morton::unswizzle_morton(image.pixels(), width, height, 1);
    image.with_pixels(width, height, pixels)
}

/// Converts linear pixels to Morton (Z-order); the inverse of [`unswizzle_morton`] when
/// both dimensions are equal powers of two.
pub fn swizzle_morton(image: ImageBuffer) -> ImageBuffer {
    let (width, height) = (image.width(), image.height());
    let pixels = morton::swizzle_morton(image.pixels(), width, height, 1);
    image.with_pixels(width, height, pixels)
}

/// Converts PS2 swizzled 32-bit pixels to linear order.
///
/// Widths below 16 map some pixels outside the buffer; those are left zeroed.
pub fn unswizzle_ps2(image: ImageBuffer) -> ImageBuffer {
    let (width, height) = (image.width(), image.height());
    let pixels = ps2::unswizzle_ps2(image.pixels(), width, height);
    image.with_pixels(width, height, pixels)
}

/// Converts linear 32-bit pixels to PS2 swizzled order.
pub fn swizzle_ps2(image: ImageBuffer) -> ImageBuffer {
    let (width, height) = (image.width(), image.height());
    let pixels = ps2::swizzle_ps2(image.pixels(), width, height);
    image.with_pixels(width, height, pixels)
}

/// Applies `f` to every colour: the palette entries of a paletted image, else each pixel.
fn map_colors(image: ImageBuffer, f: impl Fn(Pixel) -> Pixel) -> ImageBuffer {
    match image.palette() {
        Some(palette) => {
            let mapped = palette.colors().iter().map(|&color| f(color)).collect();
            image.with_palette(Arc::new(mapped))
        }
        None => {
            let (width, height) = (image.width(), image.height());
            let pixels = image.pixels().iter().map(|&pixel| f(pixel)).collect();
            image.with_pixels(width, height, pixels)
        }
    }
}

/// Swaps the red and blue channels.
pub fn swap_red_blue(image: ImageBuffer) -> ImageBuffer {
    map_colors(image, |p| argb(alpha(p), blue(p), green(p), red(p)))
}

/// Reinterprets pixels read as ARGB whose bytes were really `G, B, A, R`.
///
/// # Examples
///
/// ```
/// use game_texture_codec::transform::gbar_to_argb;
/// use game_texture_codec::ImageBuffer;
///
/// let image = ImageBuffer::new(1, 1, vec![0x1122_3344]).unwrap();
/// assert_eq!(gbar_to_argb(image).pixels(), &[0x3344_1122]);
/// ```
pub fn gbar_to_argb(image: ImageBuffer) -> ImageBuffer {
    map_colors(image, |p| {
        let [g, b, a, r] = p.to_be_bytes();
        argb(a, r, g, b)
    })
}

/// `a = 255 - a`.
pub fn invert_alpha(image: ImageBuffer) -> ImageBuffer {
    map_colors(image, |p| with_alpha(p, 255 - alpha(p)))
}

/// Expands 7-bit alpha: `a >= 128` becomes 255, anything else doubles.
pub fn double_alpha(image: ImageBuffer) -> ImageBuffer {
    map_colors(image, |p| {
        let a = alpha(p);
        with_alpha(p, if a >= 128 { 255 } else { a * 2 })
    })
}

/// Narrows alpha for storage as 7 bits: 255 becomes 128, anything else halves.
///
/// [`double_alpha`] undoes this for every even alpha and for 255.
pub fn halve_alpha(image: ImageBuffer) -> ImageBuffer {
    map_colors(image, |p| {
        let a = alpha(p);
        with_alpha(p, if a == 255 { 128 } else { a / 2 })
    })
}

/// Makes the image opaque if every pixel has alpha 0. Otherwise returns it unchanged.
pub fn opaque_if_fully_transparent(image: ImageBuffer) -> ImageBuffer {
    if image.argb_pixels().iter().any(|&p| alpha(p) != 0) {
        return image;
    }
    log::debug!("image is fully transparent, forcing alpha to 255");
    map_colors(image, |p| with_alpha(p, 255))
}
