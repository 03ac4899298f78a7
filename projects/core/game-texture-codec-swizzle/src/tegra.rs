//! # Tegra X1 Block Linear Swizzle
//!
//! Block linear surfaces are built from GOBs ("groups of bytes"): 64 bytes wide by 8 rows,
//! 512 bytes in total. GOBs are stacked vertically into blocks of [`BlockHeight`] GOBs, and
//! blocks are laid out left to right, then top to bottom.
//!
//! Within a GOB, byte `(x, y)` lives at:
//!
//! ```text
//! ((x % 64) / 32) * 256 + ((y % 8) / 2) * 64 + ((x % 32) / 16) * 32 + (y % 2) * 16 + x % 16
//! ```
//!
//! All widths here are in bytes (`width * bytes_per_pixel`), so the same code handles
//! uncompressed pixels and compressed blocks (pass block counts as the dimensions and the
//! block size as `bytes_per_pixel`).

use alloc::vec;
use alloc::vec::Vec;
use derive_enum_all_values::AllValues;

/// Width of a GOB in bytes.
pub const GOB_WIDTH_IN_BYTES: usize = 64;

/// Height of a GOB in rows.
pub const GOB_HEIGHT_IN_ROWS: usize = 8;

/// Size of a GOB in bytes.
pub const GOB_SIZE_IN_BYTES: usize = GOB_WIDTH_IN_BYTES * GOB_HEIGHT_IN_ROWS;

/// Number of GOBs stacked vertically in one block.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues)]
pub enum BlockHeight {
    /// 1 GOB (8 rows).
    One = 1,
    /// 2 GOBs (16 rows).
    Two = 2,
    /// 4 GOBs (32 rows).
    Four = 4,
    /// 8 GOBs (64 rows).
    Eight = 8,
    /// 16 GOBs (128 rows).
    Sixteen = 16,
}

impl BlockHeight {
    /// Number of GOBs per block.
    #[inline]
    pub const fn gobs(self) -> usize {
        self as usize
    }

    /// Picks the block height the driver would use for a surface `height` rows tall.
    ///
    /// # Examples
    ///
    /// ```
    /// use game_texture_codec_swizzle::tegra::BlockHeight;
    ///
    /// assert_eq!(BlockHeight::for_height(512), BlockHeight::Sixteen);
    /// assert_eq!(BlockHeight::for_height(48), BlockHeight::Eight);
    /// assert_eq!(BlockHeight::for_height(8), BlockHeight::One);
    /// ```
    pub const fn for_height(height: u32) -> Self {
        let scaled = height as u64 + height as u64 / 2;
        if scaled >= 128 {
            BlockHeight::Sixteen
        } else if scaled >= 64 {
            BlockHeight::Eight
        } else if scaled >= 32 {
            BlockHeight::Four
        } else if scaled >= 16 {
            BlockHeight::Two
        } else {
            BlockHeight::One
        }
    }
}

/// Shorthand for [`BlockHeight::for_height`].
#[inline]
pub const fn block_height_for(height: u32) -> BlockHeight {
    BlockHeight::for_height(height)
}

/// Size in bytes of the swizzled surface, including the padding to whole blocks.
pub fn swizzled_size(width: u32, height: u32, bytes_per_pixel: usize, block_height: BlockHeight) -> usize {
    let width_in_gobs = (width as usize * bytes_per_pixel).div_ceil(GOB_WIDTH_IN_BYTES);
    let block_rows = GOB_HEIGHT_IN_ROWS * block_height.gobs();
    let height_in_blocks = (height as usize).div_ceil(block_rows);
    width_in_gobs * height_in_blocks * GOB_SIZE_IN_BYTES * block_height.gobs()
}

/// Offset in the swizzled surface of byte column `x` in row `y`.
#[inline]
pub fn gob_address(x: usize, y: usize, width_in_gobs: usize, block_height: BlockHeight) -> usize {
    let gobs = block_height.gobs();
    let block_rows = GOB_HEIGHT_IN_ROWS * gobs;
    let block_size = GOB_SIZE_IN_BYTES * gobs;

    (y / block_rows) * block_size * width_in_gobs
        + (x / GOB_WIDTH_IN_BYTES) * block_size
        + ((y % block_rows) / GOB_HEIGHT_IN_ROWS) * GOB_SIZE_IN_BYTES
        + ((x % 64) / 32) * 256
        + ((y % 8) / 2) * 64
        + ((x % 32) / 16) * 32
        + (y % 2) * 16
        + x % 16
}

/// Converts a block linear surface to a tightly packed linear one of
/// `width * height * bytes_per_pixel` bytes.
///
/// Bytes whose swizzled address lies outside `data` are skipped and stay zero.
pub fn deswizzle_block_linear(
    data: &[u8],
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
    block_height: BlockHeight,
) -> Vec<u8> {
    let row_bytes = width as usize * bytes_per_pixel;
    let mut result = vec![0u8; row_bytes * height as usize];
    for_each_byte(row_bytes, height, block_height, |linear, swizzled| {
        if let (Some(&byte), Some(slot)) = (data.get(swizzled), result.get_mut(linear)) {
            *slot = byte;
        }
    });
    result
}

/// Converts a tightly packed linear surface to block linear; the inverse of
/// [`deswizzle_block_linear`]. The result is [`swizzled_size`] bytes long.
pub fn swizzle_block_linear(
    data: &[u8],
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
    block_height: BlockHeight,
) -> Vec<u8> {
    let row_bytes = width as usize * bytes_per_pixel;
    let mut result = vec![0u8; swizzled_size(width, height, bytes_per_pixel, block_height)];
    for_each_byte(row_bytes, height, block_height, |linear, swizzled| {
        if let (Some(&byte), Some(slot)) = (data.get(linear), result.get_mut(swizzled)) {
            *slot = byte;
        }
    });
    result
}

#[inline(always)]
fn for_each_byte(
    row_bytes: usize,
    height: u32,
    block_height: BlockHeight,
    mut f: impl FnMut(usize, usize),
) {
    let width_in_gobs = row_bytes.div_ceil(GOB_WIDTH_IN_BYTES);
    for y in 0..height as usize {
        for x in 0..row_bytes {
            f(y * row_bytes + x, gob_address(x, y, width_in_gobs, block_height));
        }
    }
}
