//! [`ImageBuffer`] to byte stream.

use crate::byte_source::ByteSink;
use crate::{EncodeError, EncodeResult, ImageBuffer, PixelFormat};
use game_texture_codec_bcn::{encode_image, BlockFormat};
use game_texture_codec_common::packed::{self, encode_packed};
use game_texture_codec_common::pixel::{alpha, blue, green, red, Pixel};
use game_texture_codec_palette::{convert_to_paletted, Palette};
use std::borrow::Cow;
use std::io;

/// Encodes `image` into `sink` as `format`.
///
/// Paletted images are resolved for direct and block formats. Direct colour images are
/// converted with [`convert_to_paletted`] for the indexed formats.
///
/// # Errors
///
/// - [`EncodeError::UnsupportedFormat`] if [`PixelFormat::is_writable`] is false
/// - [`EncodeError::PaletteTooLarge`] if the palette does not fit the index width
/// - [`EncodeError::Io`] if the sink fails
///
/// # Examples
///
/// ```
/// use game_texture_codec::{encode, ImageBuffer, PixelFormat};
///
/// let image = ImageBuffer::new(2, 1, vec![0xFF11_2233, 0x8044_5566]).unwrap();
/// let mut bytes = Vec::new();
/// encode(&mut bytes, &image, PixelFormat::Rgba8888).unwrap();
/// assert_eq!(bytes, [0x11, 0x22, 0x33, 0xFF, 0x44, 0x55, 0x66, 0x80]);
/// ```
pub fn encode<W: ByteSink + ?Sized>(
    sink: &mut W,
    image: &ImageBuffer,
    format: PixelFormat,
) -> EncodeResult<()> {
    if !format.is_writable() {
        return Err(EncodeError::UnsupportedFormat(format));
    }
    log::debug!("encoding {}x{} {format:?}", image.width(), image.height());

    if let Some(block) = format.block_format() {
        return encode_blocks(sink, image, block);
    }

    if format.is_paletted() {
        return encode_indexed(sink, image, format);
    }

    for &pixel in image.argb_pixels().iter() {
        write_pixel(sink, format, pixel)?;
    }
    Ok(())
}

fn encode_blocks<W: ByteSink + ?Sized>(
    sink: &mut W,
    image: &ImageBuffer,
    block: BlockFormat,
) -> EncodeResult<()> {
    let (width, height) = (image.width(), image.height());
    let mut data = vec![0u8; block.required_bytes(width, height)];
    encode_image(block, &image.argb_pixels(), width, height, &mut data)?;
    sink.write_bytes(&data)?;
    Ok(())
}

fn encode_indexed<W: ByteSink + ?Sized>(
    sink: &mut W,
    image: &ImageBuffer,
    format: PixelFormat,
) -> EncodeResult<()> {
    let (palette, indices): (Cow<'_, Palette>, Cow<'_, [u32]>) = match image.palette() {
        Some(palette) => (Cow::Borrowed(palette.as_ref()), Cow::Borrowed(image.pixels())),
        None => {
            let (palette, indices) = convert_to_paletted(image.pixels());
            (Cow::Owned(palette), Cow::Owned(indices))
        }
    };

    let max = format.max_palette_len().unwrap_or(0);
    if palette.len() > max {
        return Err(EncodeError::PaletteTooLarge {
            colors: palette.len(),
            max,
        });
    }

    match format {
        PixelFormat::Indexed4 => {
            for pair in indices.chunks(2) {
                let low = pair[0] as u8;
                let high = pair.get(1).copied().unwrap_or(0) as u8;
                sink.write_u8(low | (high << 4))?;
            }
        }
        PixelFormat::Indexed4Msb => {
            for pair in indices.chunks(2) {
                let high = pair[0] as u8;
                let low = pair.get(1).copied().unwrap_or(0) as u8;
                sink.write_u8((high << 4) | low)?;
            }
        }
        PixelFormat::Indexed16 => {
            for &index in indices.iter() {
                sink.write_u16_le(index as u16)?;
            }
        }
        _ => {
            for &index in indices.iter() {
                sink.write_u8(index as u8)?;
            }
        }
    }
    Ok(())
}

/// Writes one pixel of a direct or float format.
fn write_pixel<W: ByteSink + ?Sized>(sink: &mut W, format: PixelFormat, pixel: Pixel) -> io::Result<()> {
    use PixelFormat::*;
    let (a, r, g, b) = (alpha(pixel), red(pixel), green(pixel), blue(pixel));
    let unorm = |channel: u8| channel as f32 / 255.0;

    match format {
        Rgba8888 => sink.write_bytes(&[r, g, b, a]),
        Argb8888 => sink.write_bytes(&[a, r, g, b]),
        Bgra8888 => sink.write_bytes(&[b, g, r, a]),
        Abgr8888 => sink.write_bytes(&[a, b, g, r]),
        Rgb888 => sink.write_bytes(&[r, g, b]),
        Bgr888 => sink.write_bytes(&[b, g, r]),

        Rgb565 => sink.write_u16_le(encode_packed::<packed::Rgb565>(pixel)),
        Rgb565Be => sink.write_u16_be(encode_packed::<packed::Rgb565>(pixel)),
        Bgr565 => sink.write_u16_le(encode_packed::<packed::Bgr565>(pixel)),
        Bgr565Be => sink.write_u16_be(encode_packed::<packed::Bgr565>(pixel)),
        Argb4444 => sink.write_u16_le(encode_packed::<packed::Argb4444>(pixel)),
        Argb4444Be => sink.write_u16_be(encode_packed::<packed::Argb4444>(pixel)),
        Abgr4444 => sink.write_u16_le(encode_packed::<packed::Abgr4444>(pixel)),
        Rgba4444 => sink.write_u16_le(encode_packed::<packed::Rgba4444>(pixel)),
        Argb1555 => sink.write_u16_le(encode_packed::<packed::Argb1555>(pixel)),
        Argb1555Be => sink.write_u16_be(encode_packed::<packed::Argb1555>(pixel)),
        Abgr1555 => sink.write_u16_le(encode_packed::<packed::Abgr1555>(pixel)),
        Rgba5551 => sink.write_u16_le(encode_packed::<packed::Rgba5551>(pixel)),
        Rgba5551Be => sink.write_u16_be(encode_packed::<packed::Rgba5551>(pixel)),

        L8 => sink.write_u8(((r as u32 + g as u32 + b as u32) / 3) as u8),
        A8 => sink.write_u8(a),
        A8L8 => sink.write_bytes(&[((r as u32 + g as u32 + b as u32) / 3) as u8, a]),

        R32F => sink.write_f32_le(unorm(r)),
        Rg32F => {
            sink.write_f32_le(unorm(r))?;
            sink.write_f32_le(unorm(g))
        }
        Rgb32F => {
            sink.write_f32_le(unorm(r))?;
            sink.write_f32_le(unorm(g))?;
            sink.write_f32_le(unorm(b))
        }
        Rgba32F => {
            sink.write_f32_le(unorm(r))?;
            sink.write_f32_le(unorm(g))?;
            sink.write_f32_le(unorm(b))?;
            sink.write_f32_le(unorm(a))
        }

        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{format:?} is not a writable per-pixel format"),
        )),
    }
}
