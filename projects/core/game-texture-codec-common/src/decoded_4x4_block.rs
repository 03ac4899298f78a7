//! # Decoded 4x4 Block
//!
//! The [`Decoded4x4Block`] structure holds one block worth of pixels for the block
//! compressed formats (BC1-BC5, BC7, ETC2 and the 4x4 sub-blocks of CMPR).
//!
//! Decoders fill a block and then [scatter](Decoded4x4Block::write_to_image) it into the
//! destination image; encoders [gather](Decoded4x4Block::read_from_image) a block from
//! the source image before compressing it.
//!
//! ## Usage
//!
//! ```
//! use game_texture_codec_common::color_8888::Color8888;
//! use game_texture_codec_common::decoded_4x4_block::Decoded4x4Block;
//!
//! // Create a block filled with red pixels
//! let red_pixel = Color8888::new(255, 0, 0, 255);
//! let block = Decoded4x4Block::new(red_pixel);
//!
//! // Check if all pixels are identical
//! assert!(block.has_identical_pixels());
//! ```
//!
//! ## Memory Layout
//!
//! The pixels are stored in row-major order:
//! ```text
//! [ 0] [ 1] [ 2] [ 3]
//! [ 4] [ 5] [ 6] [ 7]
//! [ 8] [ 9] [10] [11]
//! [12] [13] [14] [15]
//! ```
//!
//! ## Edges
//!
//! Images whose dimensions are not multiples of 4 still store whole blocks. Pixels that
//! fall outside the image are dropped on write, and are filled by clamping to the last
//! row/column on read.

use crate::color_8888::Color8888;
use crate::pixel::Pixel;

/// Represents a decoded 4x4 block of BC pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded4x4Block {
    /// The 16 pixels in the block (row-major order)
    /// (i.e. `pixels[0]` is top-left, `pixels[3]` is top-right, etc.)
    pub pixels: [Color8888; 16],
}

impl Default for Decoded4x4Block {
    fn default() -> Self {
        Self::new(Color8888::TRANSPARENT)
    }
}

impl Decoded4x4Block {
    /// Constructs a new decoded block initialised with 16 copies of the provided pixel.
    ///
    /// # Examples
    ///
    /// ```
    /// use game_texture_codec_common::color_8888::Color8888;
    /// use game_texture_codec_common::decoded_4x4_block::Decoded4x4Block;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// let block = Decoded4x4Block::new(pixel);
    /// assert!(block.pixels.iter().all(|&p| p == pixel));
    /// ```
    pub fn new(pixel: Color8888) -> Self {
        Self {
            pixels: [pixel; 16],
        }
    }

    /// Gets the pixel at the specified coordinates.
    ///
    /// # Panics
    ///
    /// If `x >= 4` or `y >= 4`.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Color8888 {
        self.pixels[y * 4 + x]
    }

    /// Sets the pixel at the specified coordinates.
    ///
    /// # Panics
    ///
    /// If `x >= 4` or `y >= 4`.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Color8888) {
        self.pixels[y * 4 + x] = pixel;
    }

    /// Checks if all pixels in the block have the same color values
    ///
    /// # Returns
    /// `true` if all pixels in the block are identical, `false` otherwise
    #[inline]
    pub fn has_identical_pixels(&self) -> bool {
        let first = self.pixels[0];
        self.pixels.iter().all(|pixel| *pixel == first)
    }

    /// Checks if all pixels in the block have the same color values
    /// Ignoring the alpha values.
    #[inline]
    pub fn has_identical_pixels_ignore_alpha(&self) -> bool {
        let first_pixel_no_alpha = self.pixels[0].without_alpha();
        self.pixels
            .iter()
            .all(|pixel| pixel.without_alpha() == first_pixel_no_alpha)
    }

    /// Checks if all pixels in the block have the same alpha values
    #[inline]
    pub fn has_identical_alpha(&self) -> bool {
        let first_pixel_alpha = self.pixels[0].a;
        self.pixels.iter().all(|pixel| pixel.a == first_pixel_alpha)
    }

    /// Scatters this block into a row-major ARGB image.
    ///
    /// `block_x`/`block_y` are the pixel coordinates of the block's top-left corner.
    /// Pixels falling outside `width` x `height` are skipped, as are rows that would
    /// index past the end of `dest`.
    ///
    /// # Examples
    ///
    /// ```
    /// use game_texture_codec_common::color_8888::Color8888;
    /// use game_texture_codec_common::decoded_4x4_block::Decoded4x4Block;
    ///
    /// let block = Decoded4x4Block::new(Color8888::new(1, 2, 3, 4));
    /// let mut image = vec![0u32; 2 * 2];
    /// block.write_to_image(&mut image, 2, 2, 0, 0);
    /// assert!(image.iter().all(|&p| p == 0x0401_0203));
    /// ```
    pub fn write_to_image(
        &self,
        dest: &mut [Pixel],
        width: usize,
        height: usize,
        block_x: usize,
        block_y: usize,
    ) {
        for y in 0..4 {
            let image_y = block_y + y;
            if image_y >= height {
                break;
            }

            for x in 0..4 {
                let image_x = block_x + x;
                if image_x >= width {
                    break;
                }

                if let Some(slot) = dest.get_mut(image_y * width + image_x) {
                    *slot = self.pixels[y * 4 + x].to_argb();
                }
            }
        }
    }

    /// Gathers a block from a row-major ARGB image.
    ///
    /// Coordinates outside the image are clamped to the nearest edge pixel.
    /// Returns a transparent block for an empty image.
    pub fn read_from_image(
        src: &[Pixel],
        width: usize,
        height: usize,
        block_x: usize,
        block_y: usize,
    ) -> Self {
        let mut block = Self::default();
        if width == 0 || height == 0 {
            return block;
        }

        for y in 0..4 {
            let image_y = (block_y + y).min(height - 1);
            for x in 0..4 {
                let image_x = (block_x + x).min(width - 1);
                if let Some(&pixel) = src.get(image_y * width + image_x) {
                    block.pixels[y * 4 + x] = Color8888::from_argb(pixel);
                }
            }
        }

        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_block() -> Decoded4x4Block {
        let mut block = Decoded4x4Block::default();
        for (index, pixel) in block.pixels.iter_mut().enumerate() {
            *pixel = Color8888::new(index as u8, 0, 0, 255);
        }
        block
    }

    #[test]
    fn write_clips_to_image_bounds() {
        let block = numbered_block();
        let mut image = [0u32; 3 * 2];
        block.write_to_image(&mut image, 3, 2, 0, 0);

        let reds: [u8; 6] = image.map(|p| (p >> 16) as u8);
        assert_eq!(reds, [0, 1, 2, 4, 5, 6]);
    }

    #[test]
    fn write_honours_block_offset() {
        let block = Decoded4x4Block::new(Color8888::new(9, 9, 9, 9));
        let mut image = [0u32; 6 * 6];
        block.write_to_image(&mut image, 6, 6, 4, 4);

        assert_eq!(image[4 * 6 + 4], 0x0909_0909);
        assert_eq!(image[5 * 6 + 5], 0x0909_0909);
        assert_eq!(image[3 * 6 + 4], 0);
        assert_eq!(image[4 * 6 + 3], 0);
    }

    #[test]
    fn read_clamps_to_edges() {
        // 2x1 image: [A, B]
        let image = [0xFF00_0001, 0xFF00_0002];
        let block = Decoded4x4Block::read_from_image(&image, 2, 1, 0, 0);

        for y in 0..4 {
            assert_eq!(block.get_pixel(0, y).b, 1);
            assert_eq!(block.get_pixel(1, y).b, 2);
            assert_eq!(block.get_pixel(3, y).b, 2);
        }
    }

    #[test]
    fn identical_checks() {
        let mut block = Decoded4x4Block::new(Color8888::new(1, 2, 3, 4));
        assert!(block.has_identical_pixels());

        block.set_pixel(3, 3, Color8888::new(1, 2, 3, 5));
        assert!(!block.has_identical_pixels());
        assert!(block.has_identical_pixels_ignore_alpha());
        assert!(!block.has_identical_alpha());
    }
}
