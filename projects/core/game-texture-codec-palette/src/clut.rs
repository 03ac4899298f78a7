//! # PlayStation 2 CLUT Striping
//!
//! 256 colour CLUTs are stored on the GS with the middle two 8-entry runs of every
//! 32-entry part swapped:
//!
//! ```text
//! linear : 0..8  8..16  16..24  24..32
//! striped: 0..8  16..24  8..16  24..32
//! ```
//!
//! The permutation is its own inverse, so [`stripe_ps2_clut`] and [`unstripe_ps2_clut`]
//! do the same thing. Entries after the last complete 32-entry part are left untouched.

const PART: usize = 32;
const BLOCKS: usize = 2;
const STRIPES: usize = 2;
const COLORS: usize = 8;

/// Converts a linear CLUT to PS2 striped order, in place.
pub fn stripe_ps2_clut<T: Copy>(colors: &mut [T]) {
    for part in colors.chunks_exact_mut(PART) {
        let mut source = [part[0]; PART];
        source.copy_from_slice(part);
        for block in 0..BLOCKS {
            for stripe in 0..STRIPES {
                for color in 0..COLORS {
                    part[block * 16 + stripe * 8 + color] = source[stripe * 16 + block * 8 + color];
                }
            }
        }
    }
}

/// Converts a PS2 striped CLUT to linear order, in place.
#[inline]
pub fn unstripe_ps2_clut<T: Copy>(colors: &mut [T]) {
    stripe_ps2_clut(colors);
}
