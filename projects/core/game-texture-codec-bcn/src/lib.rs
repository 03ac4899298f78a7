#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

pub mod bc1;
pub mod bc2;
pub mod bc3;
pub mod bc4;
pub mod bc5;
pub mod bc7;
pub mod channel;
pub mod cmpr;
pub mod error;
pub mod etc2;
pub mod format;
pub mod image;

pub use error::BlockImageError;
pub use format::BlockFormat;
pub use image::{decode_image, encode_image};
