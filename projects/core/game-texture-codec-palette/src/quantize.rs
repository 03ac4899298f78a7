//! Colour quantization.
//!
//! Every function here is deterministic: pairs are visited in ascending index order and
//! ties resolve to the lowest index.

use crate::color_entry::{resolve, ColorEntry};
use crate::{Palette, PaletteError};
use alloc::vec::Vec;
use game_texture_codec_common::pixel::{self, Pixel};

/// Largest possible [`ColorEntry::closeness`].
const MAX_CLOSENESS: u32 = 4 * 255;

/// Reduces `palette` to exactly `target` colours by greedily merging near colours.
///
/// If the palette already has `target` colours or fewer, it is padded with transparent
/// black to `target` and `indices` are returned unchanged.
///
/// Otherwise, for closeness thresholds `1, 2, 3, ...`, every pair `(i, j)` with `i < j`
/// (ascending `i`, then ascending `j`) where neither colour has been merged yet and
/// `closeness <= threshold` merges `j` into `i`. Merging stops the moment `target`
/// colours remain. The survivors keep their relative order in the new palette and every
/// index is remapped through the merges.
///
/// # Errors
///
/// - [`PaletteError::ZeroTarget`] if `target` is 0
/// - [`PaletteError::IndexOutOfRange`] if an index is not inside `palette`
///
/// # Examples
///
/// ```
/// use game_texture_codec_palette::{reduce_colors, Palette};
///
/// let palette = Palette::from(vec![0xFF00_0000, 0xFF00_0001, 0xFFFF_FFFF]);
/// let (reduced, indices) = reduce_colors(&palette, &[0, 1, 2], 2).unwrap();
/// assert_eq!(reduced.colors(), &[0xFF00_0000, 0xFFFF_FFFF]);
/// assert_eq!(indices, [0, 0, 1]);
/// ```
pub fn reduce_colors(
    palette: &Palette,
    indices: &[u32],
    target: usize,
) -> Result<(Palette, Vec<u32>), PaletteError> {
    if target == 0 {
        return Err(PaletteError::ZeroTarget);
    }
    check_indices(indices, palette.len())?;

    if palette.len() <= target {
        let mut padded = palette.clone();
        padded.pad_to(target);
        return Ok((padded, indices.to_vec()));
    }

    let mut entries: Vec<ColorEntry> = palette.colors().iter().copied().map(ColorEntry::new).collect();
    let mut unique = entries.len();
    let mut threshold = 1;

    'thresholds: while unique > target && threshold <= MAX_CLOSENESS {
        log::trace!("reduce_colors: threshold {threshold}, {unique} unique colours");
        for i in 0..entries.len() {
            if entries[i].is_merged() {
                continue;
            }
            for j in (i + 1)..entries.len() {
                if entries[j].is_merged() {
                    continue;
                }
                if entries[i].closeness(&entries[j]) <= threshold {
                    entries[j].mapped_to = Some(i);
                    unique -= 1;
                    if unique == target {
                        break 'thresholds;
                    }
                }
            }
        }
        threshold += 1;
    }

    let mut reduced = Palette::new();
    for entry in entries.iter_mut().filter(|entry| !entry.is_merged()) {
        entry.palette_index = Some(reduced.push(entry.color));
    }
    reduced.pad_to(target);

    let remapped = indices
        .iter()
        .map(|&index| {
            let root = resolve(&entries, index as usize);
            entries[root].palette_index.unwrap_or(0) as u32
        })
        .collect();

    Ok((reduced, remapped))
}

/// Remaps indices into `source` onto the nearest colours of `target`.
///
/// Each source colour maps to the target colour with the smallest
/// [`ColorEntry::closeness`]; the lowest target index wins a tie.
///
/// # Errors
///
/// - [`PaletteError::EmptyPalette`] if `target` is empty and there is anything to map
/// - [`PaletteError::IndexOutOfRange`] if an index is not inside `source`
pub fn match_to_palette(
    source: &Palette,
    indices: &[u32],
    target: &Palette,
) -> Result<Vec<u32>, PaletteError> {
    check_indices(indices, source.len())?;
    if indices.is_empty() {
        return Ok(Vec::new());
    }
    if target.is_empty() {
        return Err(PaletteError::EmptyPalette);
    }

    let targets: Vec<ColorEntry> = target.colors().iter().copied().map(ColorEntry::new).collect();
    let mapping: Vec<u32> = source
        .colors()
        .iter()
        .map(|&color| nearest(&targets, &ColorEntry::new(color)) as u32)
        .collect();

    Ok(indices.iter().map(|&index| mapping[index as usize]).collect())
}

/// Builds a palette of the unique colours in `pixels` and the index of every pixel.
///
/// The palette is sorted by packed ARGB value.
///
/// # Examples
///
/// ```
/// use game_texture_codec_palette::convert_to_paletted;
///
/// let (palette, indices) = convert_to_paletted(&[30, 10, 30, 20]);
/// assert_eq!(palette.colors(), &[10, 20, 30]);
/// assert_eq!(indices, [2, 0, 2, 1]);
/// ```
pub fn convert_to_paletted(pixels: &[Pixel]) -> (Palette, Vec<u32>) {
    let mut sorted = pixels.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let indices = pixels
        .iter()
        .map(|pixel| sorted.binary_search(pixel).unwrap_or(0) as u32)
        .collect();
    (Palette::from(sorted), indices)
}

/// Per-channel truncating mean of `colors`; `0` for an empty slice.
///
/// # Examples
///
/// ```
/// use game_texture_codec_palette::get_average;
///
/// assert_eq!(get_average(&[0xFF00_0000, 0xFF00_0003]), 0xFF00_0001);
/// assert_eq!(get_average(&[]), 0);
/// ```
pub fn get_average(colors: &[Pixel]) -> Pixel {
    if colors.is_empty() {
        return 0;
    }

    let mut sums = [0u64; 4];
    for &color in colors {
        sums[0] += pixel::alpha(color) as u64;
        sums[1] += pixel::red(color) as u64;
        sums[2] += pixel::green(color) as u64;
        sums[3] += pixel::blue(color) as u64;
    }

    let count = colors.len() as u64;
    let [a, r, g, b] = sums.map(|sum| (sum / count) as u8);
    pixel::argb(a, r, g, b)
}

/// Index of the entry in `palette` closest to `color`, lowest index on a tie.
fn nearest(palette: &[ColorEntry], color: &ColorEntry) -> usize {
    let mut best_index = 0;
    let mut best_distance = u32::MAX;
    for (index, entry) in palette.iter().enumerate() {
        let distance = entry.closeness(color);
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }
    best_index
}

fn check_indices(indices: &[u32], len: usize) -> Result<(), PaletteError> {
    match indices.iter().find(|&&index| index as usize >= len) {
        Some(&index) => Err(PaletteError::IndexOutOfRange {
            index: index as usize,
            len,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rstest::rstest;

    fn count_unique(indices: &[u32]) -> usize {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        sorted.len()
    }

    fn gradient(count: u32) -> Palette {
        (0..count).map(|i| pixel::argb(255, (i * 3) as u8, 0, 0)).collect()
    }

    #[rstest]
    #[case(16, 4)]
    #[case(64, 16)]
    #[case(86, 85)]
    #[case(10, 1)]
    fn reduces_to_exact_count(#[case] count: u32, #[case] target: usize) {
        let palette = gradient(count);
        let indices: Vec<u32> = (0..count).collect();
        let (reduced, remapped) = reduce_colors(&palette, &indices, target).unwrap();

        assert_eq!(reduced.len(), target);
        assert_eq!(count_unique(&remapped), target);
        assert!(remapped.iter().all(|&index| (index as usize) < target));
    }

    #[test]
    fn small_palette_is_padded_not_altered() {
        let palette = Palette::from(vec![0xFF11_2233, 0xFF44_5566]);
        let (reduced, indices) = reduce_colors(&palette, &[1, 0, 1], 4).unwrap();
        assert_eq!(reduced.colors(), &[0xFF11_2233, 0xFF44_5566, 0, 0]);
        assert_eq!(indices, [1, 0, 1]);
    }

    #[test]
    fn merges_closest_pairs_first() {
        // 0 and 1 are 2 apart, 2 and 3 are 1 apart: threshold 1 merges 3 into 2 first.
        let palette = Palette::from(vec![0xFF00_0000, 0xFF00_0002, 0xFF80_0000, 0xFF80_0001]);
        let (reduced, indices) = reduce_colors(&palette, &[0, 1, 2, 3], 3).unwrap();
        assert_eq!(reduced.colors(), &[0xFF00_0000, 0xFF00_0002, 0xFF80_0000]);
        assert_eq!(indices, [0, 1, 2, 2]);
    }

    #[test]
    fn merge_order_is_ascending_pairs() {
        // Threshold 1 merges 1 into 0; 1 is then no longer a merge target, so 2 only
        // joins 0 once the threshold reaches 2.
        let palette = Palette::from(vec![0xFF00_0000, 0xFF00_0001, 0xFF00_0002, 0xFFFF_FFFF]);
        let (reduced, indices) = reduce_colors(&palette, &[0, 1, 2, 3], 2).unwrap();
        assert_eq!(reduced.colors(), &[0xFF00_0000, 0xFFFF_FFFF]);
        assert_eq!(indices, [0, 0, 0, 1]);
    }

    #[test]
    fn reduce_is_deterministic() {
        let palette = gradient(40);
        let indices: Vec<u32> = (0..40).rev().collect();
        let first = reduce_colors(&palette, &indices, 7).unwrap();
        let second = reduce_colors(&palette, &indices, 7).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn reduce_rejects_bad_indices() {
        let palette = gradient(4);
        assert_eq!(
            reduce_colors(&palette, &[4], 2),
            Err(PaletteError::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[rstest]
    #[case(gradient(4))]
    #[case(Palette::new())]
    fn reduce_rejects_zero_target(#[case] palette: Palette) {
        assert_eq!(reduce_colors(&palette, &[], 0), Err(PaletteError::ZeroTarget));
    }

    #[test]
    fn match_prefers_lowest_index_on_tie() {
        let source = Palette::from(vec![0xFF00_0005]);
        let target = Palette::from(vec![0xFF00_0000, 0xFF00_000A, 0xFF00_0005]);
        assert_eq!(match_to_palette(&source, &[0, 0], &target), Ok(vec![2, 2]));

        let tie = Palette::from(vec![0xFF00_0000, 0xFF00_000A]);
        assert_eq!(match_to_palette(&source, &[0], &tie), Ok(vec![0]));
    }

    #[test]
    fn match_to_empty_palette_fails() {
        let source = Palette::from(vec![1]);
        assert_eq!(
            match_to_palette(&source, &[0], &Palette::new()),
            Err(PaletteError::EmptyPalette)
        );
        assert_eq!(match_to_palette(&source, &[], &Palette::new()), Ok(vec![]));
    }

    #[test]
    fn convert_round_trips_through_palette() {
        let pixels = [0xFF00_00FF, 0x8000_FF00, 0xFF00_00FF, 0x0000_0000, 0x8000_FF00];
        let (palette, indices) = convert_to_paletted(&pixels);
        assert_eq!(palette.len(), 3);
        for (pixel, index) in pixels.iter().zip(indices) {
            assert_eq!(palette.get(index as usize), Some(*pixel));
        }
    }

    #[rstest]
    #[case(&[0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF], 0xFFFF_FFFF)]
    #[case(&[0x0000_0000, 0x0000_0001, 0x0000_0001, 0x0000_0001], 0x0000_0000)]
    #[case(&[0x0400_0000, 0x0000_0400, 0x0004_0000, 0x0000_0004], 0x0101_0101)]
    fn average_truncates(#[case] colors: &[Pixel], #[case] expected: Pixel) {
        assert_eq!(get_average(colors), expected);
    }
}
