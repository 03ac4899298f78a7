//! An ordered list of ARGB colours.

use crate::PaletteError;
use alloc::vec::Vec;
use game_texture_codec_common::pixel::Pixel;

/// An ordered list of ARGB colours. A colour's index is its insertion position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Palette {
    colors: Vec<Pixel>,
}

impl Palette {
    /// Creates an empty palette.
    pub const fn new() -> Self {
        Self { colors: Vec::new() }
    }

    /// Number of colours.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette holds no colours.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The colours, in index order.
    #[inline]
    pub fn colors(&self) -> &[Pixel] {
        &self.colors
    }

    /// Appends a colour and returns its index.
    pub fn push(&mut self, color: Pixel) -> usize {
        self.colors.push(color);
        self.colors.len() - 1
    }

    /// Colour at `index`, if present.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Pixel> {
        self.colors.get(index).copied()
    }

    /// Colour at `index`.
    ///
    /// # Errors
    ///
    /// [`PaletteError::IndexOutOfRange`] if `index >= self.len()`.
    #[inline]
    pub fn resolve(&self, index: usize) -> Result<Pixel, PaletteError> {
        self.get(index).ok_or(PaletteError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Grows the palette to `len` colours by appending transparent black.
    /// A palette that is already long enough is left unchanged.
    pub fn pad_to(&mut self, len: usize) {
        if self.colors.len() < len {
            self.colors.resize(len, 0);
        }
    }

    /// Consumes the palette, returning its colours.
    pub fn into_colors(self) -> Vec<Pixel> {
        self.colors
    }
}

impl From<Vec<Pixel>> for Palette {
    fn from(colors: Vec<Pixel>) -> Self {
        Self { colors }
    }
}

impl From<&[Pixel]> for Palette {
    fn from(colors: &[Pixel]) -> Self {
        Self {
            colors: colors.to_vec(),
        }
    }
}

impl FromIterator<Pixel> for Palette {
    fn from_iter<I: IntoIterator<Item = Pixel>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().collect(),
        }
    }
}
