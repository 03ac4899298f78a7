//! Decode settings and the caller owned palette context.

use game_texture_codec_palette::Palette;
use std::sync::Arc;

/// Default for [`DecodeOptions::truncation_tolerance`].
pub const DEFAULT_TRUNCATION_TOLERANCE: usize = 64;

/// What a paletted decode produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaletteMode {
    /// Look every index up immediately; the result holds ARGB pixels.
    #[default]
    Resolve,

    /// Keep the raw indices and attach the palette to the result, so several frames can
    /// share one palette.
    Deferred,
}

/// Settings for [`decode`](crate::decode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeOptions {
    /// How many bytes block compressed data may fall short of its expected size and
    /// still be decoded, zero filled. Anything shorter decodes to `Ok(None)`.
    pub truncation_tolerance: usize,

    /// How paletted formats are decoded.
    pub palette_mode: PaletteMode,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            truncation_tolerance: DEFAULT_TRUNCATION_TOLERANCE,
            palette_mode: PaletteMode::Resolve,
        }
    }
}

/// Builder for [`DecodeOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptionsBuilder {
    truncation_tolerance: Option<usize>,
    palette_mode: Option<PaletteMode>,
}

impl DecodeOptionsBuilder {
    /// Create a new options builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the truncation tolerance, in bytes.
    pub fn truncation_tolerance(mut self, bytes: usize) -> Self {
        self.truncation_tolerance = Some(bytes);
        self
    }

    /// Set how paletted formats are decoded.
    pub fn palette_mode(mut self, mode: PaletteMode) -> Self {
        self.palette_mode = Some(mode);
        self
    }

    /// Build the options, taking defaults for anything not set.
    pub fn build(self) -> DecodeOptions {
        let defaults = DecodeOptions::default();
        DecodeOptions {
            truncation_tolerance: self
                .truncation_tolerance
                .unwrap_or(defaults.truncation_tolerance),
            palette_mode: self.palette_mode.unwrap_or(defaults.palette_mode),
        }
    }
}

/// The palette paletted formats fall back to when none is passed explicitly.
///
/// Archives often store one palette ahead of several images. Keep one context per
/// archive (or per thread) and set the palette as it is read.
#[derive(Debug, Clone, Default)]
pub struct PaletteContext {
    current: Option<Arc<Palette>>,
}

impl PaletteContext {
    /// Creates a context holding `palette`.
    pub fn with_palette(palette: Arc<Palette>) -> Self {
        Self {
            current: Some(palette),
        }
    }

    /// Whether a current palette is set.
    #[inline]
    pub fn has_current_palette(&self) -> bool {
        self.current.is_some()
    }

    /// The current palette, if any.
    #[inline]
    pub fn current_palette(&self) -> Option<&Arc<Palette>> {
        self.current.as_ref()
    }

    /// Replaces the current palette.
    pub fn set_current_palette(&mut self, palette: Arc<Palette>) {
        self.current = Some(palette);
    }

    /// Removes the current palette.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_options_defaults() {
        assert_eq!(DecodeOptionsBuilder::new().build(), DecodeOptions::default());
    }

    #[test]
    fn builder_overrides() {
        let options = DecodeOptionsBuilder::new()
            .truncation_tolerance(0)
            .palette_mode(PaletteMode::Deferred)
            .build();
        assert_eq!(options.truncation_tolerance, 0);
        assert_eq!(options.palette_mode, PaletteMode::Deferred);
    }

    #[test]
    fn context_holds_and_clears() {
        let mut context = PaletteContext::default();
        assert!(!context.has_current_palette());

        let palette = Arc::new(Palette::from(vec![0xFF00_0000]));
        context.set_current_palette(palette.clone());
        assert!(context.has_current_palette());
        assert!(Arc::ptr_eq(context.current_palette().unwrap(), &palette));

        context.clear();
        assert!(context.current_palette().is_none());
    }
}
