#![no_main]

// Checks that every deswizzle inverts its swizzle on sizes where the layout is a bijection.

use game_texture_codec_swizzle::morton::{swizzle_morton, unswizzle_morton};
use game_texture_codec_swizzle::ps2::{swizzle_ps2, unswizzle_ps2};
use game_texture_codec_swizzle::tegra::{deswizzle_block_linear, swizzle_block_linear, BlockHeight};
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct SwizzleInput {
    pub width_log2: u8,
    pub height_log2: u8,
    pub tegra_width: u8,
    pub tegra_height: u8,
    pub bytes_per_pixel: u8,
    pub block_height: u8,
    pub seed: u8,
}

fuzz_target!(|input: SwizzleInput| {
    // Morton: power of two sides up to 64. PS2: width of at least 16.
    let width = 1u32 << (input.width_log2 % 7);
    let height = 1u32 << (input.height_log2 % 7);
    let data: Vec<u8> = (0..width * height)
        .map(|i| (i as u8).wrapping_add(input.seed))
        .collect();

    if width == height {
        let swizzled = swizzle_morton(&data, width, height, 1);
        assert_eq!(unswizzle_morton(&swizzled, width, height, 1), data);
    }

    if width >= 16 {
        let swizzled = swizzle_ps2(&data, width, height);
        assert_eq!(unswizzle_ps2(&swizzled, width, height), data);
    }

    let heights = BlockHeight::all_values();
    let block_height = heights[input.block_height as usize % heights.len()];
    let bytes_per_pixel = 1 + input.bytes_per_pixel as usize % 16;
    let (width, height) = (1 + input.tegra_width as u32, 1 + input.tegra_height as u32);
    let data: Vec<u8> = (0..width as usize * height as usize * bytes_per_pixel)
        .map(|i| (i as u8) ^ input.seed)
        .collect();
    let swizzled = swizzle_block_linear(&data, width, height, bytes_per_pixel, block_height);
    assert_eq!(
        deswizzle_block_linear(&swizzled, width, height, bytes_per_pixel, block_height),
        data
    );
});
