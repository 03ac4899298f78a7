use crate::pixel::{self, Pixel};

/// Represents a single pixel split into its four 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color8888 {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255)
    pub a: u8,
}

impl Color8888 {
    /// Transparent black, the colour of BC1's 'punch through' index.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Constructs a new [`Color8888`] from the specified red, green, blue, and alpha components.
    ///
    /// Each parameter represents the intensity of its corresponding colour channel (0–255).
    ///
    /// # Examples
    ///
    /// ```
    /// use game_texture_codec_common::color_8888::Color8888;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// assert_eq!(pixel.r, 255);
    /// assert_eq!(pixel.g, 0);
    /// assert_eq!(pixel.b, 0);
    /// assert_eq!(pixel.a, 255);
    /// ```
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Splits a packed `0xAARRGGBB` pixel into channels.
    ///
    /// # Examples
    ///
    /// ```
    /// use game_texture_codec_common::color_8888::Color8888;
    ///
    /// let pixel = Color8888::from_argb(0x80FF_4020);
    /// assert_eq!(pixel, Color8888::new(0xFF, 0x40, 0x20, 0x80));
    /// assert_eq!(pixel.to_argb(), 0x80FF_4020);
    /// ```
    #[inline]
    pub const fn from_argb(value: Pixel) -> Self {
        Self {
            r: pixel::red(value),
            g: pixel::green(value),
            b: pixel::blue(value),
            a: pixel::alpha(value),
        }
    }

    /// Packs the channels back into a `0xAARRGGBB` pixel.
    #[inline]
    pub const fn to_argb(self) -> Pixel {
        pixel::argb(self.a, self.r, self.g, self.b)
    }

    /// Returns the colour with alpha forced to zero, for colour-only comparisons.
    #[inline]
    pub const fn without_alpha(self) -> Self {
        Self::new(self.r, self.g, self.b, 0)
    }

    /// Summed absolute difference of the red, green and blue channels.
    #[inline]
    pub fn rgb_distance(&self, other: &Self) -> u32 {
        self.r.abs_diff(other.r) as u32
            + self.g.abs_diff(other.g) as u32
            + self.b.abs_diff(other.b) as u32
    }
}

impl From<Pixel> for Color8888 {
    fn from(value: Pixel) -> Self {
        Self::from_argb(value)
    }
}

impl From<Color8888> for Pixel {
    fn from(value: Color8888) -> Self {
        value.to_argb()
    }
}
