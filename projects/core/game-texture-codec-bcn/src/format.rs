//! Block format descriptors shared by the image level codecs.

use derive_enum_all_values::AllValues;
use game_texture_codec_common::dimensions::blocks_for;

/// A block compressed texture format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues)]
pub enum BlockFormat {
    /// BC1 / DXT1. 8 bytes per 4x4 block, optional 1-bit alpha.
    Bc1,
    /// BC2 / DXT3. 16 bytes per 4x4 block, explicit 4-bit alpha.
    Bc2,
    /// BC3 / DXT5. 16 bytes per 4x4 block, interpolated alpha.
    Bc3,
    /// BC4 / ATI1. 8 bytes per 4x4 block, single channel.
    Bc4,
    /// BC5 / ATI2. 16 bytes per 4x4 block, red + green.
    Bc5,
    /// BC7. 16 bytes per 4x4 block. Decode only.
    Bc7,
    /// ETC2 RGBA8 (EAC alpha + ETC2 colour). Decode only.
    Etc2Rgba8,
    /// GameCube/Wii CMPR. 32 bytes per 8x8 super-block. Decode only.
    Cmpr,
}

impl BlockFormat {
    /// Width and height, in pixels, of the unit that is laid out in raster order.
    ///
    /// This is 4 for every format except [`BlockFormat::Cmpr`], whose 4x4 blocks are
    /// grouped into 8x8 super-blocks.
    #[inline]
    pub const fn block_dimension(self) -> u32 {
        match self {
            BlockFormat::Cmpr => 8,
            _ => 4,
        }
    }

    /// Size in bytes of one unit of [`BlockFormat::block_dimension`] pixels squared.
    #[inline]
    pub const fn bytes_per_block(self) -> usize {
        match self {
            BlockFormat::Bc1 | BlockFormat::Bc4 => 8,
            BlockFormat::Bc2 | BlockFormat::Bc3 | BlockFormat::Bc5 => 16,
            BlockFormat::Bc7 | BlockFormat::Etc2Rgba8 => 16,
            BlockFormat::Cmpr => 32,
        }
    }

    /// Whether [`encode_image`](crate::encode_image) supports this format.
    #[inline]
    pub const fn can_encode(self) -> bool {
        matches!(self, BlockFormat::Bc1 | BlockFormat::Bc2 | BlockFormat::Bc3)
    }

    /// Number of whole blocks covering `width` x `height` pixels, per axis.
    #[inline]
    pub const fn block_counts(self, width: u32, height: u32) -> (usize, usize) {
        let dim = self.block_dimension();
        (blocks_for(width, dim) as usize, blocks_for(height, dim) as usize)
    }

    /// Number of bytes an image of `width` x `height` pixels occupies.
    ///
    /// Partial blocks at the right and bottom edges count as whole blocks.
    ///
    /// # Examples
    ///
    /// ```
    /// use game_texture_codec_bcn::BlockFormat;
    ///
    /// assert_eq!(BlockFormat::Bc1.required_bytes(5, 4), 16);
    /// assert_eq!(BlockFormat::Cmpr.required_bytes(8, 8), 32);
    /// ```
    #[inline]
    pub const fn required_bytes(self, width: u32, height: u32) -> usize {
        let (blocks_x, blocks_y) = self.block_counts(width, height);
        blocks_x
            .saturating_mul(blocks_y)
            .saturating_mul(self.bytes_per_block())
    }
}

/// Splits a 16 byte block into its two 8 byte halves.
#[inline(always)]
pub(crate) fn split_block(block: &[u8; 16]) -> ([u8; 8], [u8; 8]) {
    let mut first = [0u8; 8];
    let mut second = [0u8; 8];
    first.copy_from_slice(&block[..8]);
    second.copy_from_slice(&block[8..]);
    (first, second)
}
