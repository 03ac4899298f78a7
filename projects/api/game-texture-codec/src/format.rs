//! The pixel formats understood by [`decode`](crate::decode) and [`encode`](crate::encode).

use derive_enum_all_values::AllValues;
use game_texture_codec_bcn::BlockFormat;

/// A pixel format.
///
/// Multi-byte values are little-endian unless the name ends in `Be`. For the 8-bit per
/// channel formats the name lists the channels in byte order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues)]
pub enum PixelFormat {
    /// Bytes `r, g, b, a`.
    Rgba8888,
    /// Bytes `a, r, g, b`.
    Argb8888,
    /// Bytes `b, g, r, a`.
    Bgra8888,
    /// Bytes `a, b, g, r`.
    Abgr8888,
    /// Bytes `r, g, b`; opaque.
    Rgb888,
    /// Bytes `b, g, r`; opaque.
    Bgr888,

    /// `RRRRRGGG GGGBBBBB`; opaque.
    Rgb565,
    /// [`PixelFormat::Rgb565`], big-endian.
    Rgb565Be,
    /// `BBBBBGGG GGGRRRRR`; opaque.
    Bgr565,
    /// [`PixelFormat::Bgr565`], big-endian.
    Bgr565Be,
    /// `AAAARRRR GGGGBBBB`.
    Argb4444,
    /// [`PixelFormat::Argb4444`], big-endian.
    Argb4444Be,
    /// `AAAABBBB GGGGRRRR`.
    Abgr4444,
    /// `RRRRGGGG BBBBAAAA`.
    Rgba4444,
    /// `ARRRRRGG GGGBBBBB`.
    Argb1555,
    /// [`PixelFormat::Argb1555`], big-endian.
    Argb1555Be,
    /// `ABBBBBGG GGGRRRRR`.
    Abgr1555,
    /// `RRRRRGGG GGBBBBBA`.
    Rgba5551,
    /// [`PixelFormat::Rgba5551`], big-endian.
    Rgba5551Be,

    /// 8-bit luminance; opaque grey.
    L8,
    /// 8-bit alpha over white.
    A8,
    /// Bytes `luminance, alpha`.
    A8L8,
    /// Signed 8-bit `u, v` offset by 128 into red and green; blue and alpha 255.
    U8V8,

    /// 16-bit unsigned normalized red.
    R16,
    /// 16-bit unsigned normalized red, green.
    R16G16,
    /// Half float red.
    R16F,
    /// Half float red, green.
    Rg16F,
    /// Half float red, green, blue, alpha.
    Rgba16F,
    /// Single float red.
    R32F,
    /// Single float red, green.
    Rg32F,
    /// Single float red, green, blue.
    Rgb32F,
    /// Single float red, green, blue, alpha.
    Rgba32F,

    /// 4-bit palette indices, low nibble first.
    Indexed4,
    /// 4-bit palette indices, high nibble first.
    Indexed4Msb,
    /// 8-bit palette indices.
    Indexed8,
    /// 16-bit little-endian palette indices.
    Indexed16,

    /// BC1 / DXT1.
    Dxt1,
    /// BC2 / DXT3.
    Dxt3,
    /// BC3 / DXT5.
    Dxt5,
    /// BC4 / ATI1.
    Bc4,
    /// BC5 / ATI2.
    Bc5,
    /// BC7.
    Bc7,
    /// ETC2 RGB with EAC alpha.
    Etc2Rgba8,
    /// GameCube/Wii CMPR.
    Cmpr,
}

impl PixelFormat {
    /// The block codec for block compressed formats.
    pub const fn block_format(self) -> Option<BlockFormat> {
        Some(match self {
            PixelFormat::Dxt1 => BlockFormat::Bc1,
            PixelFormat::Dxt3 => BlockFormat::Bc2,
            PixelFormat::Dxt5 => BlockFormat::Bc3,
            PixelFormat::Bc4 => BlockFormat::Bc4,
            PixelFormat::Bc5 => BlockFormat::Bc5,
            PixelFormat::Bc7 => BlockFormat::Bc7,
            PixelFormat::Etc2Rgba8 => BlockFormat::Etc2Rgba8,
            PixelFormat::Cmpr => BlockFormat::Cmpr,
            _ => return None,
        })
    }

    /// Whether the format stores compressed blocks rather than pixels.
    #[inline]
    pub const fn is_block_compressed(self) -> bool {
        self.block_format().is_some()
    }

    /// Width of a palette index in bits, for paletted formats.
    pub const fn index_bits(self) -> Option<u32> {
        match self {
            PixelFormat::Indexed4 | PixelFormat::Indexed4Msb => Some(4),
            PixelFormat::Indexed8 => Some(8),
            PixelFormat::Indexed16 => Some(16),
            _ => None,
        }
    }

    /// Whether the format stores palette indices.
    #[inline]
    pub const fn is_paletted(self) -> bool {
        self.index_bits().is_some()
    }

    /// Largest palette the format's indices can address.
    #[inline]
    pub const fn max_palette_len(self) -> Option<usize> {
        match self.index_bits() {
            Some(bits) => Some(1 << bits),
            None => None,
        }
    }

    /// Bytes per pixel of the direct and float formats.
    pub const fn bytes_per_pixel(self) -> Option<usize> {
        use PixelFormat::*;
        match self {
            L8 | A8 => Some(1),
            Rgb565 | Rgb565Be | Bgr565 | Bgr565Be | Argb4444 | Argb4444Be | Abgr4444
            | Rgba4444 | Argb1555 | Argb1555Be | Abgr1555 | Rgba5551 | Rgba5551Be | A8L8
            | U8V8 | R16 | R16F => Some(2),
            Rgb888 | Bgr888 => Some(3),
            Rgba8888 | Argb8888 | Bgra8888 | Abgr8888 | R16G16 | Rg16F | R32F => Some(4),
            Rgba16F | Rg32F => Some(8),
            Rgb32F => Some(12),
            Rgba32F => Some(16),
            Indexed4 | Indexed4Msb | Indexed8 | Indexed16 => None,
            Dxt1 | Dxt3 | Dxt5 | Bc4 | Bc5 | Bc7 | Etc2Rgba8 | Cmpr => None,
        }
    }

    /// Whether [`encode`](crate::encode) supports the format.
    ///
    /// Decode only: `U8V8`, `R16`, `R16G16`, the half float formats, and every block
    /// format except DXT1/3/5.
    pub const fn is_writable(self) -> bool {
        use PixelFormat::*;
        !matches!(
            self,
            U8V8 | R16 | R16G16 | R16F | Rg16F | Rgba16F | Bc4 | Bc5 | Bc7 | Etc2Rgba8 | Cmpr
        )
    }

    /// Size in bytes of a `width` x `height` image in this format.
    ///
    /// # Examples
    ///
    /// ```
    /// use game_texture_codec::PixelFormat;
    ///
    /// assert_eq!(PixelFormat::Rgb565.encoded_len(4, 4), 32);
    /// assert_eq!(PixelFormat::Indexed4.encoded_len(3, 3), 5);
    /// assert_eq!(PixelFormat::Dxt1.encoded_len(5, 5), 32);
    /// ```
    pub const fn encoded_len(self, width: u32, height: u32) -> usize {
        let pixels = width as usize * height as usize;
        if let Some(block) = self.block_format() {
            return block.required_bytes(width, height);
        }
        match self.index_bits() {
            Some(bits) => (pixels * bits as usize).div_ceil(8),
            None => match self.bytes_per_pixel() {
                Some(bytes) => pixels * bytes,
                None => 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_format_has_exactly_one_storage_kind() {
        for format in PixelFormat::all_values() {
            let kinds = [
                format.is_block_compressed(),
                format.is_paletted(),
                format.bytes_per_pixel().is_some(),
            ];
            assert_eq!(kinds.iter().filter(|&&kind| kind).count(), 1, "{format:?}");
        }
    }

    #[test]
    fn writable_block_formats_are_dxt() {
        let writable: Vec<_> = PixelFormat::all_values()
            .iter()
            .filter(|format| format.is_block_compressed() && format.is_writable())
            .copied()
            .collect();
        assert_eq!(writable, [PixelFormat::Dxt1, PixelFormat::Dxt3, PixelFormat::Dxt5]);
    }

    #[test]
    fn palette_limits() {
        assert_eq!(PixelFormat::Indexed4Msb.max_palette_len(), Some(16));
        assert_eq!(PixelFormat::Indexed16.max_palette_len(), Some(65536));
        assert_eq!(PixelFormat::Rgba8888.max_palette_len(), None);
    }
}
