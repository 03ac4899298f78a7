use crate::color_8888::Color8888;

/// Represents a 16-bit RGB565 color (5 bits red, 6 bits green, 5 bits blue)
/// As encountered in the BC1-BC3 and CMPR block formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Color565 {
    /// The underlying 16-bit RGB565 value
    value: u16,
}

impl Color565 {
    /// Creates a new [`Color565`] from the raw 16-bit value
    #[inline]
    pub const fn from_raw(value: u16) -> Self {
        Self { value }
    }

    /// Creates a new [`Color565`] from separate RGB components
    ///
    /// # Parameters
    ///
    /// - `r`: The red component (0-255)
    /// - `g`: The green component (0-255)
    /// - `b`: The blue component (0-255)
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        // Implementation matches etcpak's to565 function
        // Source: https://github.com/wolfpld/etcpak/blob/master/ProcessDxtc.cpp
        Self {
            value: ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3),
        }
    }

    /// Creates a new [`Color565`] from a [`Color8888`], discarding alpha.
    #[inline]
    pub const fn from_color_8888(color: Color8888) -> Self {
        Self::from_rgb(color.r, color.g, color.b)
    }

    /// Returns the raw 16-bit value
    #[inline]
    pub const fn raw_value(&self) -> u16 {
        self.value
    }

    // NOTE: https://fgiesen.wordpress.com/2021/10/04/gpu-bcn-decoding/
    // D3D11 widens BC1 endpoints from 5 or 6 bits to 8 by replicating the top bits. GPUs match it.

    /// Extracts the expanded 8-bit red component
    #[inline]
    pub const fn red(&self) -> u8 {
        let r = (self.value & 0b11111000_00000000) >> 11;
        ((r << 3) | (r >> 2)) as u8
    }

    /// Extracts the expanded 8-bit green component
    #[inline]
    pub const fn green(&self) -> u8 {
        let g = (self.value & 0b00000111_11100000) >> 5;
        ((g << 2) | (g >> 4)) as u8
    }

    /// Extracts the expanded 8-bit blue component
    #[inline]
    pub const fn blue(&self) -> u8 {
        let b = self.value & 0b00000000_00011111;
        ((b << 3) | (b >> 2)) as u8
    }

    /// Compares two [`Color565`] values
    #[inline]
    pub const fn greater_than(&self, other: &Self) -> bool {
        self.value > other.value
    }

    /// Converts this [`Color565`] to a [`Color8888`] with full opacity (alpha=255)
    ///
    /// # Examples
    ///
    /// ```
    /// use game_texture_codec_common::color_565::Color565;
    ///
    /// let rgb565 = Color565::from_rgb(255, 0, 0);
    /// let rgba8888 = rgb565.to_color_8888();
    /// assert_eq!(rgba8888.r, 255);
    /// assert_eq!(rgba8888.g, 0);
    /// assert_eq!(rgba8888.b, 0);
    /// assert_eq!(rgba8888.a, 255);
    /// ```
    #[inline]
    pub const fn to_color_8888(&self) -> Color8888 {
        Color8888::new(self.red(), self.green(), self.blue(), 255)
    }

    /// Builds the four entry colour table of a BC1 style block.
    ///
    /// With `allow_punch_through` set and `c0 <= c1`, entry 2 is the average of the
    /// endpoints and entry 3 is transparent black. Otherwise entries 2 and 3 are the
    /// 2/3-1/3 and 1/3-2/3 blends of the endpoints.
    ///
    /// # Examples
    ///
    /// ```
    /// use game_texture_codec_common::color_565::Color565;
    /// use game_texture_codec_common::color_8888::Color8888;
    ///
    /// let table = Color565::block_palette(
    ///     Color565::from_raw(0x0000),
    ///     Color565::from_raw(0xFFFF),
    ///     true,
    /// );
    /// assert_eq!(table[2], Color8888::new(127, 127, 127, 255));
    /// assert_eq!(table[3], Color8888::TRANSPARENT);
    /// ```
    #[inline]
    pub fn block_palette(c0: Color565, c1: Color565, allow_punch_through: bool) -> [Color8888; 4] {
        let p0 = c0.to_color_8888();
        let p1 = c1.to_color_8888();

        if !allow_punch_through || c0.greater_than(&c1) {
            [p0, p1, blend_thirds(p0, p1), blend_thirds(p1, p0)]
        } else {
            let r = (p0.r as u32 + p1.r as u32) / 2;
            let g = (p0.g as u32 + p1.g as u32) / 2;
            let b = (p0.b as u32 + p1.b as u32) / 2;
            [
                p0,
                p1,
                Color8888::new(r as u8, g as u8, b as u8, 255),
                Color8888::TRANSPARENT,
            ]
        }
    }
}

/// `(2 * near + far) / 3` on every colour channel.
#[inline(always)]
fn blend_thirds(near: Color8888, far: Color8888) -> Color8888 {
    let r = ((2 * near.r as u32) + far.r as u32) / 3;
    let g = ((2 * near.g as u32) + far.g as u32) / 3;
    let b = ((2 * near.b as u32) + far.b as u32) / 3;
    Color8888::new(r as u8, g as u8, b as u8, 255)
}
