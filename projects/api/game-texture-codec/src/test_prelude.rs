//! Test prelude for the api crate.
//!
//! Re-exports [`rstest`] and provides generators for test images.

pub use rstest::rstest;

use crate::ImageBuffer;
use game_texture_codec_common::pixel::argb;

/// Opaque horizontal grey ramp, black at `x = 0` to white at `x = width - 1`.
pub fn gradient_image(width: u32, height: u32) -> ImageBuffer {
    let mut pixels = Vec::with_capacity((width * height) as usize);
    for _ in 0..height {
        for x in 0..width {
            let level = (x * 255 / (width - 1).max(1)) as u8;
            pixels.push(argb(255, level, level, level));
        }
    }
    ImageBuffer::new(width, height, pixels).unwrap()
}

/// Pseudo random pixels (all four channels) from a fixed seed.
pub fn noise_image(width: u32, height: u32, seed: u32) -> ImageBuffer {
    let mut state = seed.wrapping_mul(0x9E37_79B9) | 1;
    let pixels = (0..width * height)
        .map(|_| {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state
        })
        .collect();
    ImageBuffer::new(width, height, pixels).unwrap()
}

/// Image where every pixel encodes its own coordinates: `0xFF00_0000 | y << 8 | x`.
pub fn coordinate_image(width: u32, height: u32) -> ImageBuffer {
    let pixels = (0..height)
        .flat_map(|y| (0..width).map(move |x| 0xFF00_0000 | (y << 8) | x))
        .collect();
    ImageBuffer::new(width, height, pixels).unwrap()
}
