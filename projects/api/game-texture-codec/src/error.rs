//! Error types for decoding, encoding and building images.

use crate::PixelFormat;
use game_texture_codec_bcn::BlockImageError;
use game_texture_codec_common::dimensions::DimensionError;
use game_texture_codec_palette::PaletteError;
use thiserror::Error;

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for encode operations
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors raised while building an [`ImageBuffer`](crate::ImageBuffer).
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ImageError {
    /// Dimensions are zero, overflow, or do not match the pixel buffer.
    #[error("Invalid dimensions: {0}")]
    Dimensions(#[from] DimensionError),

    /// A palette index is out of range.
    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),
}

/// Errors that can occur while decoding pixel data.
///
/// Truncated block compressed data is not an error; [`decode`](crate::decode) returns
/// `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The requested dimensions cannot be decoded.
    #[error("Invalid dimensions: {0}")]
    Dimensions(#[from] DimensionError),

    /// The byte source ended early while reading a non block format.
    #[error("Read failed: {0}")]
    Io(#[from] std::io::Error),

    /// A paletted format was requested without a palette or a current palette.
    #[error("{0:?} needs a palette, but none was given and the context has none")]
    MissingPalette(PixelFormat),

    /// A palette index is out of range.
    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),

    /// The block decoder rejected its buffers.
    #[error("Block decode failed: {0}")]
    Block(#[from] BlockImageError),
}

impl From<ImageError> for DecodeError {
    fn from(error: ImageError) -> Self {
        match error {
            ImageError::Dimensions(error) => DecodeError::Dimensions(error),
            ImageError::Palette(error) => DecodeError::Palette(error),
        }
    }
}

/// Errors that can occur while encoding pixel data.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The format has no encoder.
    #[error("Encoding to {0:?} is not supported")]
    UnsupportedFormat(PixelFormat),

    /// The image dimensions cannot be encoded.
    #[error("Invalid dimensions: {0}")]
    Dimensions(#[from] DimensionError),

    /// Writing to the sink failed.
    #[error("Write failed: {0}")]
    Io(#[from] std::io::Error),

    /// A palette index is out of range.
    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),

    /// The image uses more colours than the index width can address.
    #[error("Palette has {colors} colours, but the format holds at most {max}")]
    PaletteTooLarge {
        /// Number of colours in the palette
        colors: usize,
        /// Largest palette the format can address
        max: usize,
    },

    /// The block encoder rejected its buffers.
    #[error("Block encode failed: {0}")]
    Block(#[from] BlockImageError),
}

impl From<ImageError> for EncodeError {
    fn from(error: ImageError) -> Self {
        match error {
            ImageError::Dimensions(error) => EncodeError::Dimensions(error),
            ImageError::Palette(error) => EncodeError::Palette(error),
        }
    }
}
