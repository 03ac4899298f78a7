//! # Packed 16-bit Colour Layouts
//!
//! The 16-bit direct colour formats differ only in where each channel lives inside the
//! `u16`. Each layout is a [`bitfield`] over the raw value; the [`PackedColor16`] trait
//! turns them into and out of ARGB [`Pixel`]s.
//!
//! Widening multiplies by the channel's step (`*8` for 5 bits, `*4` for 6 bits, `*16` for
//! 4 bits, 1-bit alpha becomes 0 or 255). Narrowing divides by the same step, so a
//! decode/encode/decode cycle is stable.
//!
//! Note that this is *not* the bit replication used for BC1 endpoints
//! (see [`Color565`](crate::color_565::Color565)); `0b11111` widens to `248` here.

use crate::pixel::{self, Pixel};
use bitfield::bitfield;

/// A colour stored in a packed 16-bit layout.
pub trait PackedColor16: Sized {
    /// Wraps the raw 16-bit value.
    fn from_raw(raw: u16) -> Self;

    /// Returns the raw 16-bit value.
    fn raw(&self) -> u16;

    /// Widens to an ARGB pixel.
    fn to_argb(&self) -> Pixel;

    /// Narrows an ARGB pixel into this layout.
    fn from_argb(pixel: Pixel) -> Self;
}

#[inline(always)]
fn widen_1(bit: bool) -> u8 {
    if bit {
        255
    } else {
        0
    }
}

#[inline(always)]
fn narrow_1(value: u8) -> bool {
    value >= 128
}

macro_rules! impl_packed_color {
    ($name:ident) => {
        impl PackedColor16 for $name {
            #[inline]
            fn from_raw(raw: u16) -> Self {
                $name(raw)
            }

            #[inline]
            fn raw(&self) -> u16 {
                self.0
            }

            #[inline]
            fn to_argb(&self) -> Pixel {
                self.widen()
            }

            #[inline]
            fn from_argb(pixel: Pixel) -> Self {
                let mut value = $name(0);
                value.narrow(pixel);
                value
            }
        }
    };
}

bitfield! {
    /// `RRRRRGGG GGGBBBBB`, opaque.
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct Rgb565(u16);
    impl Debug;
    u8;
    red, set_red: 15, 11;
    green, set_green: 10, 5;
    blue, set_blue: 4, 0;
}

impl Rgb565 {
    fn widen(&self) -> Pixel {
        pixel::argb(255, self.red() * 8, self.green() * 4, self.blue() * 8)
    }

    fn narrow(&mut self, p: Pixel) {
        self.set_red(pixel::red(p) / 8);
        self.set_green(pixel::green(p) / 4);
        self.set_blue(pixel::blue(p) / 8);
    }
}
impl_packed_color!(Rgb565);

bitfield! {
    /// `BBBBBGGG GGGRRRRR`, opaque.
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct Bgr565(u16);
    impl Debug;
    u8;
    blue, set_blue: 15, 11;
    green, set_green: 10, 5;
    red, set_red: 4, 0;
}

impl Bgr565 {
    fn widen(&self) -> Pixel {
        pixel::argb(255, self.red() * 8, self.green() * 4, self.blue() * 8)
    }

    fn narrow(&mut self, p: Pixel) {
        self.set_red(pixel::red(p) / 8);
        self.set_green(pixel::green(p) / 4);
        self.set_blue(pixel::blue(p) / 8);
    }
}
impl_packed_color!(Bgr565);

bitfield! {
    /// `AAAARRRR GGGGBBBB`.
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct Argb4444(u16);
    impl Debug;
    u8;
    alpha, set_alpha: 15, 12;
    red, set_red: 11, 8;
    green, set_green: 7, 4;
    blue, set_blue: 3, 0;
}

bitfield! {
    /// `AAAABBBB GGGGRRRR`.
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct Abgr4444(u16);
    impl Debug;
    u8;
    alpha, set_alpha: 15, 12;
    blue, set_blue: 11, 8;
    green, set_green: 7, 4;
    red, set_red: 3, 0;
}

bitfield! {
    /// `RRRRGGGG BBBBAAAA`.
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct Rgba4444(u16);
    impl Debug;
    u8;
    red, set_red: 15, 12;
    green, set_green: 11, 8;
    blue, set_blue: 7, 4;
    alpha, set_alpha: 3, 0;
}

macro_rules! impl_4444 {
    ($name:ident) => {
        impl $name {
            fn widen(&self) -> Pixel {
                pixel::argb(
                    self.alpha() * 16,
                    self.red() * 16,
                    self.green() * 16,
                    self.blue() * 16,
                )
            }

            fn narrow(&mut self, p: Pixel) {
                self.set_alpha(pixel::alpha(p) / 16);
                self.set_red(pixel::red(p) / 16);
                self.set_green(pixel::green(p) / 16);
                self.set_blue(pixel::blue(p) / 16);
            }
        }
        impl_packed_color!($name);
    };
}

impl_4444!(Argb4444);
impl_4444!(Abgr4444);
impl_4444!(Rgba4444);

bitfield! {
    /// `ARRRRRGG GGGBBBBB`.
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct Argb1555(u16);
    impl Debug;
    u8;
    alpha, set_alpha: 15;
    red, set_red: 14, 10;
    green, set_green: 9, 5;
    blue, set_blue: 4, 0;
}

bitfield! {
    /// `ABBBBBGG GGGRRRRR`.
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct Abgr1555(u16);
    impl Debug;
    u8;
    alpha, set_alpha: 15;
    blue, set_blue: 14, 10;
    green, set_green: 9, 5;
    red, set_red: 4, 0;
}

bitfield! {
    /// `RRRRRGGG GGBBBBBA`.
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct Rgba5551(u16);
    impl Debug;
    u8;
    red, set_red: 15, 11;
    green, set_green: 10, 6;
    blue, set_blue: 5, 1;
    alpha, set_alpha: 0;
}

macro_rules! impl_5551 {
    ($name:ident) => {
        impl $name {
            fn widen(&self) -> Pixel {
                pixel::argb(
                    widen_1(self.alpha()),
                    self.red() * 8,
                    self.green() * 8,
                    self.blue() * 8,
                )
            }

            fn narrow(&mut self, p: Pixel) {
                self.set_alpha(narrow_1(pixel::alpha(p)));
                self.set_red(pixel::red(p) / 8);
                self.set_green(pixel::green(p) / 8);
                self.set_blue(pixel::blue(p) / 8);
            }
        }
        impl_packed_color!($name);
    };
}

impl_5551!(Argb1555);
impl_5551!(Abgr1555);
impl_5551!(Rgba5551);

/// Decodes a raw value in layout `T` straight to ARGB.
///
/// # Examples
///
/// ```
/// use game_texture_codec_common::packed::{decode_packed, Argb4444};
///
/// assert_eq!(decode_packed::<Argb4444>(0xF00F), 0xF000_00F0);
/// ```
#[inline]
pub fn decode_packed<T: PackedColor16>(raw: u16) -> Pixel {
    T::from_raw(raw).to_argb()
}

/// Encodes an ARGB pixel into the raw value of layout `T`.
#[inline]
pub fn encode_packed<T: PackedColor16>(pixel: Pixel) -> u16 {
    T::from_argb(pixel).raw()
}
