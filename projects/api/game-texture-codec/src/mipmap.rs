//! Mipmap chains.

use crate::{ImageBuffer, ImageError};
use game_texture_codec_common::pixel::Pixel;
use game_texture_codec_palette::{convert_to_paletted, get_average, match_to_palette};
use std::sync::Arc;

impl ImageBuffer {
    /// Number of levels in a full chain: halvings until the smaller dimension reaches 1,
    /// plus the source level.
    ///
    /// # Examples
    ///
    /// ```
    /// use game_texture_codec::ImageBuffer;
    ///
    /// let image = ImageBuffer::filled(256, 64, 0).unwrap();
    /// assert_eq!(image.full_mip_count(), 7);
    /// ```
    pub fn full_mip_count(&self) -> usize {
        self.width().min(self.height()).ilog2() as usize + 1
    }

    /// Builds a direct colour mipmap chain starting with this image resolved to ARGB.
    ///
    /// Each level halves both dimensions; every output pixel is the [`get_average`] of a
    /// 2x2 square, clamped at the right and bottom edges. The chain ends once another
    /// halving would make a dimension 0, so `levels` larger than
    /// [`ImageBuffer::full_mip_count`] is capped, and `Some(0)` still yields the source.
    ///
    /// Every level is direct colour, including level 0 of a paletted source. See
    /// [`ImageBuffer::generate_paletted_mipmaps`] to keep the palette.
    pub fn generate_mipmaps(&self, levels: Option<usize>) -> Vec<ImageBuffer> {
        let full = self.full_mip_count();
        let count = levels.unwrap_or(full).clamp(1, full);

        let source = self.clone().to_argb();
        let mut width = source.width();
        let mut height = source.height();
        let mut current = source.pixels().to_vec();

        let mut chain = Vec::with_capacity(count);
        chain.push(source);
        for level in 1..count {
            let (next_width, next_height) = (width / 2, height / 2);
            current = downsample(&current, width, height, next_width, next_height);
            width = next_width;
            height = next_height;
            log::trace!("mip level {level}: {width}x{height}");

            // Dimensions halve from a valid image and stay non-zero.
            if let Ok(image) = ImageBuffer::new(width, height, current.clone()) {
                chain.push(image);
            }
        }
        chain
    }

    /// Builds a mipmap chain where every level indexes the same palette.
    ///
    /// Levels are averaged as in [`ImageBuffer::generate_mipmaps`], then matched back
    /// onto this image's palette by nearest colour. A direct colour source is first
    /// converted with [`ImageBuffer::into_paletted`].
    pub fn generate_paletted_mipmaps(&self, levels: Option<usize>) -> Result<Vec<ImageBuffer>, ImageError> {
        let source = self.clone().into_paletted();
        let palette = source.palette().cloned().unwrap_or_default();

        let levels = source.generate_mipmaps(levels);
        let mut chain = Vec::with_capacity(levels.len());
        chain.push(source);
        for level in levels.into_iter().skip(1) {
            let (local, indices) = convert_to_paletted(level.pixels());
            let indices = match_to_palette(&local, &indices, &palette)?;
            chain.push(ImageBuffer::paletted(
                level.width(),
                level.height(),
                indices,
                Arc::clone(&palette),
            )?);
        }
        Ok(chain)
    }
}

fn downsample(src: &[Pixel], width: u32, height: u32, next_width: u32, next_height: u32) -> Vec<Pixel> {
    let (width, height) = (width as usize, height as usize);
    let at = |x: usize, y: usize| src[y.min(height - 1) * width + x.min(width - 1)];

    let mut out = Vec::with_capacity(next_width as usize * next_height as usize);
    for y in 0..next_height as usize {
        for x in 0..next_width as usize {
            let (sx, sy) = (x * 2, y * 2);
            out.push(get_average(&[
                at(sx, sy),
                at(sx + 1, sy),
                at(sx, sy + 1),
                at(sx + 1, sy + 1),
            ]));
        }
    }
    out
}
