#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod byte_source;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod image;
pub mod mipmap;
pub mod options;
pub mod palette_io;
pub mod transform;

#[cfg(test)]
pub(crate) mod test_prelude;

pub use byte_source::{ByteSink, ByteSource};
pub use decode::decode;
pub use encode::encode;
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult, ImageError};
pub use format::PixelFormat;
pub use image::ImageBuffer;
pub use options::{DecodeOptions, DecodeOptionsBuilder, PaletteContext, PaletteMode};
pub use palette_io::{read_palette, write_palette, PaletteChannelOrder};

pub use game_texture_codec_common::pixel::Pixel;
pub use game_texture_codec_palette::Palette;

/// Re-export of the layout conversions for tiled sources.
pub use game_texture_codec_swizzle as swizzle;
