//! Error types for palette operations.

use thiserror::Error;

/// Errors that can occur while resolving or remapping palette indices.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PaletteError {
    /// An index refers past the end of the palette.
    #[error("Palette index {index} is out of range for a palette of {len} colours.")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Number of colours in the palette
        len: usize,
    },

    /// The operation needs at least one colour.
    #[error("The palette is empty.")]
    EmptyPalette,

    /// A colour reduction was asked to keep no colours.
    #[error("Cannot reduce a palette to zero colours.")]
    ZeroTarget,
}
