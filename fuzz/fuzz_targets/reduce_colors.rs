#![no_main]

// Reduces arbitrary palettes and checks the result has exactly the requested size and
// only in-range indices.

use game_texture_codec_palette::{reduce_colors, Palette};
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct ReduceInput {
    pub colors: Vec<u32>,
    pub indices: Vec<u8>,
    pub target: u8,
}

fuzz_target!(|input: ReduceInput| {
    if input.colors.is_empty() || input.colors.len() > 512 {
        return;
    }
    let target = 1 + input.target as usize;
    let palette = Palette::from(input.colors.clone());
    let indices: Vec<u32> = input
        .indices
        .iter()
        .map(|&index| index as u32 % palette.len() as u32)
        .collect();

    let (reduced, remapped) = match reduce_colors(&palette, &indices, target) {
        Ok(result) => result,
        Err(error) => panic!("in-range indices were rejected: {error}"),
    };
    assert_eq!(reduced.len(), target);
    assert_eq!(remapped.len(), indices.len());
    assert!(remapped.iter().all(|&index| (index as usize) < target));
});
