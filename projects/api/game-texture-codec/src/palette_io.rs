//! Palette readers and writers.

use crate::byte_source::{ByteSink, ByteSource};
use crate::{DecodeResult, EncodeResult};
use derive_enum_all_values::AllValues;
use game_texture_codec_common::pixel::{alpha, argb, blue, green, red};
use game_texture_codec_palette::Palette;

/// Byte order of one stored palette colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
pub enum PaletteChannelOrder {
    /// `r, g, b, a`
    Rgba,
    /// `a, r, g, b`
    Argb,
    /// `b, g, r, a`
    Bgra,
    /// `a, b, g, r`
    Abgr,
    /// `r, g, b`; alpha reads as 255
    Rgb,
    /// `b, g, r`; alpha reads as 255
    Bgr,
}

impl PaletteChannelOrder {
    /// Stored size of one colour.
    pub const fn bytes_per_color(self) -> usize {
        match self {
            PaletteChannelOrder::Rgb | PaletteChannelOrder::Bgr => 3,
            _ => 4,
        }
    }
}

/// Reads `count` colours stored in `order`.
///
/// # Errors
///
/// [`DecodeError::Io`](crate::DecodeError::Io) if the source holds fewer than
/// `count * order.bytes_per_color()` bytes.
pub fn read_palette<S: ByteSource + ?Sized>(
    source: &mut S,
    count: usize,
    order: PaletteChannelOrder,
) -> DecodeResult<Palette> {
    let needed = count.saturating_mul(order.bytes_per_color());
    if source.remaining_length() < needed as u64 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("palette needs {needed} bytes, {} available", source.remaining_length()),
        )
        .into());
    }

    let bytes = source.read_bytes(needed)?;
    let colors = bytes
        .chunks_exact(order.bytes_per_color())
        .map(|c| match order {
            PaletteChannelOrder::Rgba => argb(c[3], c[0], c[1], c[2]),
            PaletteChannelOrder::Argb => argb(c[0], c[1], c[2], c[3]),
            PaletteChannelOrder::Bgra => argb(c[3], c[2], c[1], c[0]),
            PaletteChannelOrder::Abgr => argb(c[0], c[3], c[2], c[1]),
            PaletteChannelOrder::Rgb => argb(255, c[0], c[1], c[2]),
            PaletteChannelOrder::Bgr => argb(255, c[2], c[1], c[0]),
        })
        .collect::<Vec<_>>();
    log::trace!("read {} colour {order:?} palette", colors.len());
    Ok(Palette::from(colors))
}

/// Writes every colour of `palette` in `order`. 3-byte orders drop alpha.
pub fn write_palette<W: ByteSink + ?Sized>(
    sink: &mut W,
    palette: &Palette,
    order: PaletteChannelOrder,
) -> EncodeResult<()> {
    for &color in palette.colors() {
        let (a, r, g, b) = (alpha(color), red(color), green(color), blue(color));
        match order {
            PaletteChannelOrder::Rgba => sink.write_bytes(&[r, g, b, a])?,
            PaletteChannelOrder::Argb => sink.write_bytes(&[a, r, g, b])?,
            PaletteChannelOrder::Bgra => sink.write_bytes(&[b, g, r, a])?,
            PaletteChannelOrder::Abgr => sink.write_bytes(&[a, b, g, r])?,
            PaletteChannelOrder::Rgb => sink.write_bytes(&[r, g, b])?,
            PaletteChannelOrder::Bgr => sink.write_bytes(&[b, g, r])?,
        }
    }
    Ok(())
}
