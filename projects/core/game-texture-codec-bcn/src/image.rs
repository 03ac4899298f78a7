//! Whole image block coding.
//!
//! Blocks are stored in raster order: left to right, then top to bottom. Images whose
//! dimensions are not a multiple of the block size still store whole blocks; the
//! decoder crops the excess and the encoder fills it by replicating edge pixels.

use crate::bc1::{decode_bc1_block_from_slice, encode_bc1_block};
use crate::bc2::{decode_bc2_block_from_slice, encode_bc2_block};
use crate::bc3::{decode_bc3_block_from_slice, encode_bc3_block};
use crate::bc4::decode_bc4_block_from_slice;
use crate::bc5::decode_bc5_block_from_slice;
use crate::bc7::decode_bc7_block_from_slice;
use crate::cmpr::{decode_cmpr_superblock, SUBBLOCK_OFFSETS};
use crate::etc2::decode_etc2_rgba8_block_from_slice;
use crate::{BlockFormat, BlockImageError};
use game_texture_codec_common::decoded_4x4_block::Decoded4x4Block;
use game_texture_codec_common::pixel::Pixel;

/// Decodes a block compressed image into row-major ARGB pixels.
///
/// # Parameters
///
/// - `format`: Format of `src`
/// - `src`: Compressed blocks, at least [`BlockFormat::required_bytes`] long
/// - `width`, `height`: Image dimensions in pixels
/// - `dst`: Output pixels, at least `width * height` long
///
/// # Errors
///
/// - [`BlockImageError::InputTooShort`] if `src` does not cover every block
/// - [`BlockImageError::OutputTooSmall`] if `dst` cannot hold the image
///
/// # Examples
///
/// ```
/// use game_texture_codec_bcn::{decode_image, BlockFormat};
///
/// // One solid red BC1 block covering a 2x2 image.
/// let src = [0x00, 0xF8, 0x00, 0x00, 0, 0, 0, 0];
/// let mut dst = [0u32; 4];
/// decode_image(BlockFormat::Bc1, &src, 2, 2, &mut dst).unwrap();
/// assert_eq!(dst, [0xFFFF_0000; 4]);
/// ```
pub fn decode_image(
    format: BlockFormat,
    src: &[u8],
    width: u32,
    height: u32,
    dst: &mut [Pixel],
) -> Result<(), BlockImageError> {
    let needed = format.required_bytes(width, height);
    if src.len() < needed {
        return Err(BlockImageError::InputTooShort {
            needed,
            actual: src.len(),
        });
    }
    check_pixel_buffer(dst.len(), width, height)?;

    let (width, height) = (width as usize, height as usize);
    let (blocks_x, blocks_y) = format.block_counts(width as u32, height as u32);
    let dim = format.block_dimension() as usize;
    let block_size = format.bytes_per_block();

    for block_y in 0..blocks_y {
        for block_x in 0..blocks_x {
            let offset = (block_y * blocks_x + block_x) * block_size;
            let block = &src[offset..offset + block_size];
            let (pixel_x, pixel_y) = (block_x * dim, block_y * dim);

            if format == BlockFormat::Cmpr {
                if let Some(superblock) = block.first_chunk::<32>() {
                    let decoded = decode_cmpr_superblock(superblock);
                    for ((sub_x, sub_y), sub) in SUBBLOCK_OFFSETS.iter().zip(decoded.iter()) {
                        sub.write_to_image(dst, width, height, pixel_x + sub_x, pixel_y + sub_y);
                    }
                }
                continue;
            }

            if let Some(decoded) = decode_block(format, block) {
                decoded.write_to_image(dst, width, height, pixel_x, pixel_y);
            }
        }
    }

    Ok(())
}

/// Encodes row-major ARGB pixels into BC1, BC2 or BC3 blocks.
///
/// # Errors
///
/// - [`BlockImageError::EncodeUnsupported`] if [`BlockFormat::can_encode`] is false
/// - [`BlockImageError::InputTooShort`] if `src` holds fewer than `width * height` pixels
/// - [`BlockImageError::OutputTooSmall`] if `dst` is shorter than [`BlockFormat::required_bytes`]
pub fn encode_image(
    format: BlockFormat,
    src: &[Pixel],
    width: u32,
    height: u32,
    dst: &mut [u8],
) -> Result<(), BlockImageError> {
    if !format.can_encode() {
        return Err(BlockImageError::EncodeUnsupported(format));
    }

    let pixel_count = width as usize * height as usize;
    if src.len() < pixel_count {
        return Err(BlockImageError::InputTooShort {
            needed: pixel_count,
            actual: src.len(),
        });
    }

    let needed = format.required_bytes(width, height);
    if dst.len() < needed {
        return Err(BlockImageError::OutputTooSmall {
            needed,
            actual: dst.len(),
        });
    }

    let (blocks_x, blocks_y) = format.block_counts(width, height);
    let block_size = format.bytes_per_block();
    let (width, height) = (width as usize, height as usize);

    for block_y in 0..blocks_y {
        for block_x in 0..blocks_x {
            let block = Decoded4x4Block::read_from_image(src, width, height, block_x * 4, block_y * 4);
            let offset = (block_y * blocks_x + block_x) * block_size;
            let out = &mut dst[offset..offset + block_size];
            match format {
                BlockFormat::Bc1 => out.copy_from_slice(&encode_bc1_block(&block)),
                BlockFormat::Bc2 => out.copy_from_slice(&encode_bc2_block(&block)),
                _ => out.copy_from_slice(&encode_bc3_block(&block)),
            }
        }
    }

    Ok(())
}

#[inline]
fn decode_block(format: BlockFormat, block: &[u8]) -> Option<Decoded4x4Block> {
    match format {
        BlockFormat::Bc1 => decode_bc1_block_from_slice(block),
        BlockFormat::Bc2 => decode_bc2_block_from_slice(block),
        BlockFormat::Bc3 => decode_bc3_block_from_slice(block),
        BlockFormat::Bc4 => decode_bc4_block_from_slice(block),
        BlockFormat::Bc5 => decode_bc5_block_from_slice(block),
        BlockFormat::Bc7 => decode_bc7_block_from_slice(block),
        BlockFormat::Etc2Rgba8 => decode_etc2_rgba8_block_from_slice(block),
        BlockFormat::Cmpr => None,
    }
}

#[inline]
fn check_pixel_buffer(actual: usize, width: u32, height: u32) -> Result<(), BlockImageError> {
    let needed = width as usize * height as usize;
    if actual < needed {
        return Err(BlockImageError::OutputTooSmall { needed, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_texture_codec_common::pixel;
    use rstest::rstest;

    const RED: Pixel = 0xFFFF_0000;
    const BLUE: Pixel = 0xFF00_00FF;

    fn solid_bc1(color: u16) -> [u8; 8] {
        let mut block = [0u8; 8];
        block[0..2].copy_from_slice(&color.to_le_bytes());
        block
    }

    #[test]
    fn blocks_are_raster_ordered() {
        // 8x4 image: left block red, right block blue.
        let mut src = [0u8; 16];
        src[..8].copy_from_slice(&solid_bc1(0xF800));
        src[8..].copy_from_slice(&solid_bc1(0x001F));

        let mut dst = [0u32; 32];
        decode_image(BlockFormat::Bc1, &src, 8, 4, &mut dst).unwrap();
        for y in 0..4 {
            assert_eq!(dst[y * 8], RED);
            assert_eq!(dst[y * 8 + 7], BLUE);
        }
    }

    #[test]
    fn partial_blocks_are_cropped() {
        let mut src = [0u8; 32];
        for chunk in src.chunks_exact_mut(8) {
            chunk.copy_from_slice(&solid_bc1(0xF800));
        }

        let mut dst = [0u32; 25];
        decode_image(BlockFormat::Bc1, &src, 5, 5, &mut dst).unwrap();
        assert!(dst.iter().all(|&p| p == RED));
    }

    #[test]
    fn cmpr_superblocks_cover_eight_by_eight() {
        let mut src = [0u8; 32];
        let colors: [u16; 4] = [0xF800, 0x001F, 0xF800, 0x001F];
        for (chunk, color) in src.chunks_exact_mut(8).zip(colors) {
            chunk[0..2].copy_from_slice(&color.to_be_bytes());
        }

        let mut dst = [0u32; 64];
        decode_image(BlockFormat::Cmpr, &src, 8, 8, &mut dst).unwrap();
        assert_eq!(dst[0], RED);
        assert_eq!(dst[4], BLUE);
        assert_eq!(dst[4 * 8], RED);
        assert_eq!(dst[4 * 8 + 4], BLUE);
    }

    #[test]
    fn short_input_is_an_error() {
        let mut dst = [0u32; 16];
        assert_eq!(
            decode_image(BlockFormat::Bc3, &[0u8; 15], 4, 4, &mut dst),
            Err(BlockImageError::InputTooShort {
                needed: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn small_output_is_an_error() {
        let mut dst = [0u32; 15];
        assert!(matches!(
            decode_image(BlockFormat::Bc1, &[0u8; 8], 4, 4, &mut dst),
            Err(BlockImageError::OutputTooSmall { .. })
        ));
    }

    #[rstest]
    #[case(BlockFormat::Bc4)]
    #[case(BlockFormat::Bc5)]
    #[case(BlockFormat::Bc7)]
    #[case(BlockFormat::Etc2Rgba8)]
    #[case(BlockFormat::Cmpr)]
    fn decode_only_formats_refuse_encoding(#[case] format: BlockFormat) {
        let mut dst = [0u8; 64];
        assert_eq!(
            encode_image(format, &[0u32; 16], 4, 4, &mut dst),
            Err(BlockImageError::EncodeUnsupported(format))
        );
    }

    #[rstest]
    #[case(BlockFormat::Bc1)]
    #[case(BlockFormat::Bc2)]
    #[case(BlockFormat::Bc3)]
    fn solid_image_round_trips(#[case] format: BlockFormat) {
        let color = pixel::argb(255, 0, 255, 0);
        let src = [color; 6 * 6];
        let mut encoded = [0u8; 64];
        let encoded = &mut encoded[..format.required_bytes(6, 6)];
        encode_image(format, &src, 6, 6, encoded).unwrap();

        let mut decoded = [0u32; 36];
        decode_image(format, encoded, 6, 6, &mut decoded).unwrap();
        assert_eq!(decoded, src);
    }
}
