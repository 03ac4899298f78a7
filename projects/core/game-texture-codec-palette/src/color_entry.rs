//! Colours as seen by the quantizer.
//!
//! Merged colours are tracked with [`ColorEntry::mapped_to`], an index into the same
//! arena (`[ColorEntry]`) that points at the colour it was merged into. [`resolve`]
//! follows those links to the surviving entry.

use game_texture_codec_common::pixel::{self, Pixel};

/// An ARGB colour split into channels, with quantizer bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorEntry {
    /// The packed colour.
    pub color: Pixel,
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha channel.
    pub alpha: u8,
    /// Arena index of the entry this one was merged into.
    pub mapped_to: Option<usize>,
    /// Index in the output palette, once assigned. Never set on a merged entry.
    pub palette_index: Option<usize>,
}

impl ColorEntry {
    /// Splits `color` into channels.
    #[inline]
    pub const fn new(color: Pixel) -> Self {
        Self {
            color,
            red: pixel::red(color),
            green: pixel::green(color),
            blue: pixel::blue(color),
            alpha: pixel::alpha(color),
            mapped_to: None,
            palette_index: None,
        }
    }

    /// Sum of absolute channel differences; `0` for identical colours, at most `1020`.
    ///
    /// # Examples
    ///
    /// ```
    /// use game_texture_codec_palette::ColorEntry;
    ///
    /// let a = ColorEntry::new(0xFF10_2030);
    /// let b = ColorEntry::new(0xF012_1E30);
    /// assert_eq!(a.closeness(&b), 15 + 2 + 2);
    /// ```
    #[inline]
    pub fn closeness(&self, other: &Self) -> u32 {
        pixel::channel_distance(self.color, other.color)
    }

    /// Whether the entry has been merged into another.
    #[inline]
    pub const fn is_merged(&self) -> bool {
        self.mapped_to.is_some()
    }
}

/// Follows `mapped_to` links from `index` to the entry that was not merged away.
///
/// Links always point at a lower index, so the walk is bounded by `index`.
/// A link that points outside the arena, or not strictly downwards, ends the walk.
pub fn resolve(entries: &[ColorEntry], mut index: usize) -> usize {
    while let Some(target) = entries.get(index).and_then(|entry| entry.mapped_to) {
        if target >= index {
            break;
        }
        index = target;
    }
    index
}
