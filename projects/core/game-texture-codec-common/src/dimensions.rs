//! Validation of image dimensions.

use thiserror::Error;

/// Errors raised when an image's dimensions cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DimensionError {
    /// Either dimension is zero.
    #[error("Image dimensions must be non-zero, got {width}x{height}.")]
    ZeroDimension {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// `width * height` exceeds `u32::MAX` or does not fit in `usize`.
    #[error("Image dimensions {width}x{height} overflow the addressable pixel count.")]
    PixelCountOverflow {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// A pixel buffer's length does not match its dimensions.
    #[error("Expected {expected} pixels, got {actual}.")]
    PixelCountMismatch {
        /// `width * height`
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },
}

/// Returns `width * height`, rejecting zero dimensions and pixel counts that do not fit
/// in a `u32`.
///
/// # Examples
///
/// ```
/// use game_texture_codec_common::dimensions::{checked_pixel_count, DimensionError};
///
/// assert_eq!(checked_pixel_count(4, 8), Ok(32));
/// assert_eq!(
///     checked_pixel_count(0, 8),
///     Err(DimensionError::ZeroDimension { width: 0, height: 8 })
/// );
/// ```
pub fn checked_pixel_count(width: u32, height: u32) -> Result<usize, DimensionError> {
    if width == 0 || height == 0 {
        return Err(DimensionError::ZeroDimension { width, height });
    }

    let count = width as u64 * height as u64;
    if count > u32::MAX as u64 {
        return Err(DimensionError::PixelCountOverflow { width, height });
    }
    usize::try_from(count).map_err(|_| DimensionError::PixelCountOverflow { width, height })
}

/// Number of blocks of `block_size` needed to cover `extent` pixels.
#[inline]
pub const fn blocks_for(extent: u32, block_size: u32) -> u32 {
    extent.div_ceil(block_size)
}
