#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod morton;
pub mod ps2;
pub mod tegra;

/// Copies `block_size` elements from `src[src_index * block_size..]` to
/// `dst[dst_index * block_size..]`, skipping the copy if either range is out of bounds.
#[inline(always)]
pub(crate) fn copy_block<T: Copy>(
    src: &[T],
    src_index: usize,
    dst: &mut [T],
    dst_index: usize,
    block_size: usize,
) {
    let src_start = src_index * block_size;
    let dst_start = dst_index * block_size;
    if let (Some(from), Some(to)) = (
        src.get(src_start..src_start + block_size),
        dst.get_mut(dst_start..dst_start + block_size),
    ) {
        to.copy_from_slice(from);
    }
}
