#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod clut;
pub mod color_entry;
pub mod error;
pub mod palette;
pub mod quantize;

pub use color_entry::ColorEntry;
pub use error::PaletteError;
pub use palette::Palette;
pub use quantize::{convert_to_paletted, get_average, match_to_palette, reduce_colors};
