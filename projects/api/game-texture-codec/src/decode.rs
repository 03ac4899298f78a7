//! Byte stream to [`ImageBuffer`].

use crate::byte_source::ByteSource;
use crate::{DecodeError, DecodeOptions, DecodeResult, ImageBuffer, PaletteContext, PaletteMode, PixelFormat};
use game_texture_codec_bcn::{decode_image, BlockFormat};
use game_texture_codec_common::dimensions::checked_pixel_count;
use game_texture_codec_common::packed::{self, decode_packed};
use game_texture_codec_common::pixel::{argb, unorm16_to_u8, unorm_f16_to_u8, unorm_f32_to_u8, Pixel};
use game_texture_codec_palette::Palette;
use std::io::{self, ErrorKind};
use std::sync::Arc;

/// Decodes a `width` x `height` image in `format` from `source`.
///
/// # Parameters
///
/// - `source`: Positioned at the first byte of pixel data
/// - `format`: Format of the data
/// - `width`, `height`: Image dimensions in pixels
/// - `palette`: Palette for paletted formats; falls back to `context` when [`None`]
/// - `context`: Holds the current palette
/// - `options`: See [`DecodeOptions`]
///
/// # Returns
///
/// The image, or `Ok(None)` when `format` is block compressed and the source holds fewer
/// than `expected - options.truncation_tolerance` bytes. Block data within the
/// tolerance is zero filled.
///
/// # Errors
///
/// - [`DecodeError::Dimensions`] if a dimension is zero or the pixel count is too large
/// - [`DecodeError::Io`] if a non block format runs out of data
/// - [`DecodeError::MissingPalette`] if a paletted format has no palette
/// - [`DecodeError::Palette`] if deferred indices fall outside the palette
pub fn decode<S: ByteSource + ?Sized>(
    source: &mut S,
    format: PixelFormat,
    width: u32,
    height: u32,
    palette: Option<Arc<Palette>>,
    context: &PaletteContext,
    options: &DecodeOptions,
) -> DecodeResult<Option<ImageBuffer>> {
    let count = checked_pixel_count(width, height)?;
    log::debug!("decoding {width}x{height} {format:?}");

    if let Some(block) = format.block_format() {
        return decode_blocks(source, block, width, height, count, options);
    }

    if format.is_paletted() {
        let palette = palette
            .or_else(|| context.current_palette().cloned())
            .ok_or(DecodeError::MissingPalette(format))?;
        return decode_indexed(source, format, width, height, count, palette, options).map(Some);
    }

    let bytes_per_pixel = format.bytes_per_pixel().unwrap_or(1);
    let capacity = usize::try_from(source.remaining_length() / bytes_per_pixel as u64)
        .unwrap_or(count)
        .min(count);
    let mut pixels = Vec::with_capacity(capacity);
    for _ in 0..count {
        pixels.push(read_pixel(source, format)?);
    }
    Ok(Some(ImageBuffer::new(width, height, pixels)?))
}

fn decode_blocks<S: ByteSource + ?Sized>(
    source: &mut S,
    block: BlockFormat,
    width: u32,
    height: u32,
    count: usize,
    options: &DecodeOptions,
) -> DecodeResult<Option<ImageBuffer>> {
    let expected = block.required_bytes(width, height);
    let remaining = source.remaining_length();
    if remaining.saturating_add(options.truncation_tolerance as u64) < expected as u64 {
        log::warn!(
            "{block:?} data truncated: {width}x{height} needs {expected} bytes, {remaining} available"
        );
        return Ok(None);
    }

    let mut data = source.read_available(expected)?;
    if data.len() < expected {
        log::debug!("zero filling {} missing {block:?} bytes", expected - data.len());
        data.resize(expected, 0);
    }

    let mut pixels = vec![0u32; count];
    decode_image(block, &data, width, height, &mut pixels)?;
    Ok(Some(ImageBuffer::new(width, height, pixels)?))
}

fn decode_indexed<S: ByteSource + ?Sized>(
    source: &mut S,
    format: PixelFormat,
    width: u32,
    height: u32,
    count: usize,
    palette: Arc<Palette>,
    options: &DecodeOptions,
) -> DecodeResult<ImageBuffer> {
    let indices = read_indices(source, format, count)?;

    match options.palette_mode {
        PaletteMode::Deferred => Ok(ImageBuffer::paletted(width, height, indices, palette)?),
        PaletteMode::Resolve => {
            let mut missing = 0usize;
            let pixels = indices
                .iter()
                .map(|&index| {
                    palette.get(index as usize).unwrap_or_else(|| {
                        missing += 1;
                        0
                    })
                })
                .collect();
            if missing > 0 {
                log::warn!(
                    "{missing} indices fall outside the {} colour palette and resolved to 0",
                    palette.len()
                );
            }
            Ok(ImageBuffer::new(width, height, pixels)?)
        }
    }
}

fn read_indices<S: ByteSource + ?Sized>(
    source: &mut S,
    format: PixelFormat,
    count: usize,
) -> io::Result<Vec<u32>> {
    let bits = format.index_bits().unwrap_or(8) as usize;
    let bytes = read_exact(source, (count * bits).div_ceil(8))?;
    let indices = match format {
        PixelFormat::Indexed4 => bytes
            .iter()
            .flat_map(|&byte| [byte & 0xF, byte >> 4])
            .take(count)
            .map(u32::from)
            .collect(),
        PixelFormat::Indexed4Msb => bytes
            .iter()
            .flat_map(|&byte| [byte >> 4, byte & 0xF])
            .take(count)
            .map(u32::from)
            .collect(),
        PixelFormat::Indexed16 => bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]) as u32)
            .collect(),
        _ => bytes.iter().map(|&byte| byte as u32).collect(),
    };
    Ok(indices)
}

/// Reads exactly `count` bytes without allocating more than the source holds.
fn read_exact<S: ByteSource + ?Sized>(source: &mut S, count: usize) -> io::Result<Vec<u8>> {
    let bytes = source.read_available(count)?;
    if bytes.len() < count {
        return Err(io::Error::new(
            ErrorKind::UnexpectedEof,
            format!("needed {count} bytes, {} available", bytes.len()),
        ));
    }
    Ok(bytes)
}

#[inline]
fn read_array<const N: usize, S: ByteSource + ?Sized>(source: &mut S) -> io::Result<[u8; N]> {
    let mut bytes = [0u8; N];
    for byte in bytes.iter_mut() {
        *byte = source.read_u8()?;
    }
    Ok(bytes)
}

/// Reads one pixel of a direct or float format.
fn read_pixel<S: ByteSource + ?Sized>(source: &mut S, format: PixelFormat) -> io::Result<Pixel> {
    use PixelFormat::*;
    let pixel = match format {
        Rgba8888 => {
            let [r, g, b, a] = read_array(source)?;
            argb(a, r, g, b)
        }
        Argb8888 => {
            let [a, r, g, b] = read_array(source)?;
            argb(a, r, g, b)
        }
        Bgra8888 => {
            let [b, g, r, a] = read_array(source)?;
            argb(a, r, g, b)
        }
        Abgr8888 => {
            let [a, b, g, r] = read_array(source)?;
            argb(a, r, g, b)
        }
        Rgb888 => {
            let [r, g, b] = read_array(source)?;
            argb(255, r, g, b)
        }
        Bgr888 => {
            let [b, g, r] = read_array(source)?;
            argb(255, r, g, b)
        }

        Rgb565 => decode_packed::<packed::Rgb565>(source.read_u16_le()?),
        Rgb565Be => decode_packed::<packed::Rgb565>(source.read_u16_be()?),
        Bgr565 => decode_packed::<packed::Bgr565>(source.read_u16_le()?),
        Bgr565Be => decode_packed::<packed::Bgr565>(source.read_u16_be()?),
        Argb4444 => decode_packed::<packed::Argb4444>(source.read_u16_le()?),
        Argb4444Be => decode_packed::<packed::Argb4444>(source.read_u16_be()?),
        Abgr4444 => decode_packed::<packed::Abgr4444>(source.read_u16_le()?),
        Rgba4444 => decode_packed::<packed::Rgba4444>(source.read_u16_le()?),
        Argb1555 => decode_packed::<packed::Argb1555>(source.read_u16_le()?),
        Argb1555Be => decode_packed::<packed::Argb1555>(source.read_u16_be()?),
        Abgr1555 => decode_packed::<packed::Abgr1555>(source.read_u16_le()?),
        Rgba5551 => decode_packed::<packed::Rgba5551>(source.read_u16_le()?),
        Rgba5551Be => decode_packed::<packed::Rgba5551>(source.read_u16_be()?),

        L8 => {
            let l = source.read_u8()?;
            argb(255, l, l, l)
        }
        A8 => argb(source.read_u8()?, 255, 255, 255),
        A8L8 => {
            let [l, a] = read_array(source)?;
            argb(a, l, l, l)
        }
        U8V8 => {
            let [u, v] = read_array(source)?;
            argb(255, (u as i8 as i16 + 128) as u8, (v as i8 as i16 + 128) as u8, 255)
        }

        R16 => argb(255, unorm16_to_u8(source.read_u16_le()?), 0, 0),
        R16G16 => {
            let r = unorm16_to_u8(source.read_u16_le()?);
            let g = unorm16_to_u8(source.read_u16_le()?);
            argb(255, r, g, 0)
        }
        R16F => argb(255, unorm_f16_to_u8(source.read_u16_le()?), 0, 0),
        Rg16F => {
            let r = unorm_f16_to_u8(source.read_u16_le()?);
            let g = unorm_f16_to_u8(source.read_u16_le()?);
            argb(255, r, g, 0)
        }
        Rgba16F => {
            let r = unorm_f16_to_u8(source.read_u16_le()?);
            let g = unorm_f16_to_u8(source.read_u16_le()?);
            let b = unorm_f16_to_u8(source.read_u16_le()?);
            let a = unorm_f16_to_u8(source.read_u16_le()?);
            argb(a, r, g, b)
        }
        R32F => argb(255, unorm_f32_to_u8(source.read_f32_le()?), 0, 0),
        Rg32F => {
            let r = unorm_f32_to_u8(source.read_f32_le()?);
            let g = unorm_f32_to_u8(source.read_f32_le()?);
            argb(255, r, g, 0)
        }
        Rgb32F => {
            let r = unorm_f32_to_u8(source.read_f32_le()?);
            let g = unorm_f32_to_u8(source.read_f32_le()?);
            let b = unorm_f32_to_u8(source.read_f32_le()?);
            argb(255, r, g, b)
        }
        Rgba32F => {
            let r = unorm_f32_to_u8(source.read_f32_le()?);
            let g = unorm_f32_to_u8(source.read_f32_le()?);
            let b = unorm_f32_to_u8(source.read_f32_le()?);
            let a = unorm_f32_to_u8(source.read_f32_le()?);
            argb(a, r, g, b)
        }

        Indexed4 | Indexed4Msb | Indexed8 | Indexed16 | Dxt1 | Dxt3 | Dxt5 | Bc4 | Bc5 | Bc7
        | Etc2Rgba8 | Cmpr => {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("{format:?} is not a per-pixel format"),
            ))
        }
    };
    Ok(pixel)
}
