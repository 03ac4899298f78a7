//! The decoded image.

use crate::ImageError;
use game_texture_codec_common::dimensions::{checked_pixel_count, DimensionError};
use game_texture_codec_common::pixel::Pixel;
use game_texture_codec_palette::{convert_to_paletted, match_to_palette, reduce_colors, Palette, PaletteError};
use std::borrow::Cow;
use std::sync::Arc;

/// A decoded image: `width * height` ARGB pixels, or palette indices plus the palette.
///
/// Buffers are owned values; operations that change the image consume it and return the
/// result. Only the palette is shared, through [`Arc`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    palette: Option<Arc<Palette>>,
}

impl ImageBuffer {
    /// Creates a direct colour image.
    ///
    /// # Errors
    ///
    /// [`ImageError::Dimensions`] if a dimension is zero, or `pixels` does not hold
    /// exactly `width * height` pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, ImageError> {
        check_len(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
            palette: None,
        })
    }

    /// Creates a paletted image.
    ///
    /// # Errors
    ///
    /// - [`ImageError::Dimensions`] as for [`ImageBuffer::new`]
    /// - [`ImageError::Palette`] if an index is outside `palette`
    pub fn paletted(
        width: u32,
        height: u32,
        indices: Vec<u32>,
        palette: Arc<Palette>,
    ) -> Result<Self, ImageError> {
        check_len(width, height, indices.len())?;
        if let Some(&index) = indices.iter().find(|&&index| index as usize >= palette.len()) {
            return Err(PaletteError::IndexOutOfRange {
                index: index as usize,
                len: palette.len(),
            }
            .into());
        }

        Ok(Self {
            width,
            height,
            pixels: indices,
            palette: Some(palette),
        })
    }

    /// Creates an image of `width` x `height` copies of `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self, ImageError> {
        let count = checked_pixel_count(width, height)?;
        Self::new(width, height, vec![pixel; count])
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// ARGB pixels, or palette indices when [`ImageBuffer::is_paletted`].
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// The palette, for paletted images.
    #[inline]
    pub fn palette(&self) -> Option<&Arc<Palette>> {
        self.palette.as_ref()
    }

    /// Whether [`ImageBuffer::pixels`] holds palette indices.
    #[inline]
    pub fn is_paletted(&self) -> bool {
        self.palette.is_some()
    }

    /// Raw value (pixel or index) at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Colour at `(x, y)`, looked up in the palette for paletted images.
    pub fn color(&self, x: u32, y: u32) -> Option<Pixel> {
        let value = self.pixel(x, y)?;
        match &self.palette {
            Some(palette) => palette.get(value as usize),
            None => Some(value),
        }
    }

    /// Consumes the image, returning the raw pixels (or indices) and the palette.
    pub fn into_parts(self) -> (Vec<u32>, Option<Arc<Palette>>) {
        (self.pixels, self.palette)
    }

    /// ARGB pixels, resolving palette indices when needed.
    pub fn argb_pixels(&self) -> Cow<'_, [Pixel]> {
        match &self.palette {
            None => Cow::Borrowed(&self.pixels),
            Some(palette) => Cow::Owned(
                self.pixels
                    .iter()
                    .map(|&index| palette.get(index as usize).unwrap_or(0))
                    .collect(),
            ),
        }
    }

    /// Resolves a paletted image to ARGB. Direct colour images are returned as they are.
    pub fn to_argb(self) -> Self {
        if self.palette.is_none() {
            return self;
        }
        let pixels = self.argb_pixels().into_owned();
        Self {
            pixels,
            palette: None,
            ..self
        }
    }

    /// Converts a direct colour image to a paletted one holding every unique colour.
    /// Paletted images are returned as they are.
    pub fn into_paletted(self) -> Self {
        if self.palette.is_some() {
            return self;
        }
        let (palette, indices) = convert_to_paletted(&self.pixels);
        Self {
            pixels: indices,
            palette: Some(Arc::new(palette)),
            ..self
        }
    }

    /// Reduces the image to a palette of exactly `colors` entries.
    ///
    /// Direct colour images are converted with [`ImageBuffer::into_paletted`] first. See
    /// [`reduce_colors`] for the merging rules.
    pub fn reduce_colors(self, colors: usize) -> Result<Self, ImageError> {
        let image = self.into_paletted();
        let palette = image.palette.clone().unwrap_or_default();
        let (reduced, indices) = reduce_colors(&palette, &image.pixels, colors)?;
        log::debug!(
            "reduced palette from {} to {} colours",
            palette.len(),
            reduced.len()
        );
        Self::paletted(image.width, image.height, indices, Arc::new(reduced))
    }

    /// Remaps the image onto `target` by nearest colour.
    ///
    /// Direct colour images are converted with [`ImageBuffer::into_paletted`] first.
    pub fn match_to_palette(self, target: Arc<Palette>) -> Result<Self, ImageError> {
        let image = self.into_paletted();
        let source = image.palette.clone().unwrap_or_default();
        let indices = match_to_palette(&source, &image.pixels, &target)?;
        Self::paletted(image.width, image.height, indices, target)
    }

    /// Replaces the pixels, keeping the palette. Used by the transforms.
    pub(crate) fn with_pixels(self, width: u32, height: u32, pixels: Vec<u32>) -> Self {
        Self {
            width,
            height,
            pixels,
            palette: self.palette,
        }
    }

    /// Replaces the palette. Used by the colour transforms.
    pub(crate) fn with_palette(self, palette: Arc<Palette>) -> Self {
        Self {
            palette: Some(palette),
            ..self
        }
    }
}

fn check_len(width: u32, height: u32, actual: usize) -> Result<(), DimensionError> {
    let expected = checked_pixel_count(width, height)?;
    if expected != actual {
        return Err(DimensionError::PixelCountMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(0, 4, 0)]
    #[case(4, 0, 0)]
    fn rejects_zero_dimensions(#[case] width: u32, #[case] height: u32, #[case] len: usize) {
        assert_eq!(
            ImageBuffer::new(width, height, vec![0; len]),
            Err(ImageError::Dimensions(DimensionError::ZeroDimension { width, height }))
        );
    }

    #[test]
    fn rejects_length_mismatch() {
        assert_eq!(
            ImageBuffer::new(2, 2, vec![0; 3]),
            Err(ImageError::Dimensions(DimensionError::PixelCountMismatch {
                expected: 4,
                actual: 3
            }))
        );
    }

    #[test]
    fn rejects_out_of_range_index() {
        let palette = Arc::new(Palette::from(vec![1, 2]));
        assert_eq!(
            ImageBuffer::paletted(2, 1, vec![0, 2], palette),
            Err(ImageError::Palette(PaletteError::IndexOutOfRange { index: 2, len: 2 }))
        );
    }

    #[test]
    fn paletted_round_trip_through_argb() {
        let image = gradient_image(8, 4);
        let paletted = image.clone().into_paletted();
        assert!(paletted.is_paletted());
        assert_eq!(paletted.color(3, 2), image.pixel(3, 2));
        assert_eq!(paletted.to_argb(), image);
    }

    #[test]
    fn pixel_is_bounds_checked() {
        let image = ImageBuffer::filled(3, 2, 7).unwrap();
        assert_eq!(image.pixel(2, 1), Some(7));
        assert_eq!(image.pixel(3, 0), None);
        assert_eq!(image.pixel(0, 2), None);
    }

    #[rstest]
    #[case(4)]
    #[case(16)]
    #[case(100)]
    fn reduce_colors_yields_exact_palette(#[case] colors: usize) {
        let image = noise_image(16, 16, 7).reduce_colors(colors).unwrap();
        assert_eq!(image.palette().map(|p| p.len()), Some(colors));
        assert!(image.pixels().iter().all(|&index| (index as usize) < colors));
    }

    #[test]
    fn match_to_palette_uses_target() {
        let target = Arc::new(Palette::from(vec![0xFF00_0000, 0xFFFF_FFFF]));
        let image = gradient_image(16, 1).match_to_palette(target.clone()).unwrap();
        assert!(Arc::ptr_eq(image.palette().unwrap(), &target));
        assert_eq!(image.color(0, 0), Some(0xFF00_0000));
        assert_eq!(image.color(15, 0), Some(0xFFFF_FFFF));
    }
}
