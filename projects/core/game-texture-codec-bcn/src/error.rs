//! Error types for image level block coding.

use crate::BlockFormat;
use thiserror::Error;

/// Errors returned by [`decode_image`](crate::decode_image) and
/// [`encode_image`](crate::encode_image).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockImageError {
    /// The compressed input holds fewer bytes than the image needs.
    #[error("Input too short: need {needed} bytes, but only {actual} bytes available.")]
    InputTooShort {
        /// The required size in bytes
        needed: usize,
        /// The actual size in bytes
        actual: usize,
    },

    /// The output buffer is too small for the image.
    #[error("Output buffer too small: need {needed} elements, but only {actual} available.")]
    OutputTooSmall {
        /// The required size
        needed: usize,
        /// The actual size
        actual: usize,
    },

    /// The format has no encoder.
    #[error("Encoding to {0:?} is not supported.")]
    EncodeUnsupported(BlockFormat),
}
