#![no_main]

// Feeds arbitrary bytes to every decoder. Decoding may fail, but must never panic, and a
// decoded image always holds width * height pixels.

use game_texture_codec::{
    decode, DecodeOptionsBuilder, Palette, PaletteContext, PaletteMode, PixelFormat,
};
use libfuzzer_sys::{arbitrary, fuzz_target};
use std::io::Cursor;
use std::sync::Arc;

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct DecodeInput {
    pub format: u8,
    pub width: u8,
    pub height: u8,
    pub palette_len: u8,
    pub deferred: bool,
    pub tolerance: u8,
    pub data: Vec<u8>,
}

fuzz_target!(|input: DecodeInput| {
    let formats = PixelFormat::all_values();
    let format = formats[input.format as usize % formats.len()];
    let (width, height) = (input.width as u32, input.height as u32);

    let context = PaletteContext::with_palette(Arc::new(Palette::from(vec![
        0xFF80_8080;
        input.palette_len as usize
    ])));
    let mode = if input.deferred {
        PaletteMode::Deferred
    } else {
        PaletteMode::Resolve
    };
    let options = DecodeOptionsBuilder::new()
        .truncation_tolerance(input.tolerance as usize)
        .palette_mode(mode)
        .build();

    let result = decode(
        &mut Cursor::new(&input.data[..]),
        format,
        width,
        height,
        None,
        &context,
        &options,
    );

    if let Ok(Some(image)) = result {
        assert_eq!(image.pixels().len(), (width * height) as usize, "{format:?}");
    }
});
