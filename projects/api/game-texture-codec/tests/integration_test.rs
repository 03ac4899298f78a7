//! Integration tests for the decode/encode API

use game_texture_codec::swizzle::morton::{swizzle_morton, unswizzle_morton};
use game_texture_codec::swizzle::ps2::{swizzle_ps2, unswizzle_ps2};
use game_texture_codec::swizzle::tegra::{block_height_for, deswizzle_block_linear, swizzle_block_linear};
use game_texture_codec::{
    decode, encode, DecodeError, DecodeOptions, DecodeOptionsBuilder, ImageBuffer, Palette,
    PaletteContext, PaletteMode, PixelFormat,
};
use rstest::rstest;
use std::io::Cursor;
use std::sync::Arc;

/// Deterministic pseudo random bytes (xorshift32).
fn noise_bytes(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

fn noise_image(width: u32, height: u32, seed: u32) -> ImageBuffer {
    let pixels = noise_bytes((width * height * 4) as usize, seed)
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    ImageBuffer::new(width, height, pixels).expect("valid dimensions")
}

fn decode_with(
    bytes: &[u8],
    format: PixelFormat,
    width: u32,
    height: u32,
    context: &PaletteContext,
    options: &DecodeOptions,
) -> Result<Option<ImageBuffer>, DecodeError> {
    decode(&mut Cursor::new(bytes), format, width, height, None, context, options)
}

fn decode_simple(bytes: &[u8], format: PixelFormat, width: u32, height: u32) -> ImageBuffer {
    decode_with(
        bytes,
        format,
        width,
        height,
        &PaletteContext::default(),
        &DecodeOptions::default(),
    )
    .expect("decode should succeed")
    .expect("data is not truncated")
}

fn encode_to_vec(image: &ImageBuffer, format: PixelFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    encode(&mut bytes, image, format).expect("encode should succeed");
    bytes
}

#[rstest]
#[case(PixelFormat::Rgba8888)]
#[case(PixelFormat::Argb8888)]
#[case(PixelFormat::Bgra8888)]
#[case(PixelFormat::Abgr8888)]
#[case(PixelFormat::Rgba32F)]
fn eight_bit_channels_round_trip_losslessly(#[case] format: PixelFormat) {
    let image = noise_image(13, 7, 42);
    let bytes = encode_to_vec(&image, format);
    assert_eq!(decode_simple(&bytes, format, 13, 7), image);
}

#[test]
fn rgb565_error_is_bounded() {
    let image = noise_image(16, 16, 7);
    let decoded = decode_simple(&encode_to_vec(&image, PixelFormat::Rgb565), PixelFormat::Rgb565, 16, 16);

    for (&original, &result) in image.pixels().iter().zip(decoded.pixels()) {
        let channel = |p: u32, shift: u32| (p >> shift) as u8;
        assert!(channel(original, 16).abs_diff(channel(result, 16)) <= 8);
        assert!(channel(original, 8).abs_diff(channel(result, 8)) <= 4);
        assert!(channel(original, 0).abs_diff(channel(result, 0)) <= 8);
        assert_eq!(result >> 24, 0xFF);
    }

    let again = decode_simple(&encode_to_vec(&decoded, PixelFormat::Rgb565), PixelFormat::Rgb565, 16, 16);
    assert_eq!(again, decoded);
}

#[test]
fn dxt1_known_block() {
    // c0 = red, c1 = blue, every row uses indices 0, 1, 2, 3.
    let block = [0x00, 0xF8, 0x1F, 0x00, 0xE4, 0xE4, 0xE4, 0xE4];
    let image = decode_simple(&block, PixelFormat::Dxt1, 4, 4);
    for y in 0..4 {
        assert_eq!(image.pixel(0, y), Some(0xFFFF_0000));
        assert_eq!(image.pixel(1, y), Some(0xFF00_00FF));
        assert_eq!(image.pixel(2, y), Some(0xFFAA_0055));
        assert_eq!(image.pixel(3, y), Some(0xFF55_00AA));
    }
}

#[test]
fn truncated_block_data_at_the_tolerance_boundary() {
    // 16x16 DXT5 = 16 blocks of 16 bytes.
    let full = encode_to_vec(&ImageBuffer::filled(16, 16, 0xFFFF_FFFF).unwrap(), PixelFormat::Dxt5);
    assert_eq!(full.len(), 256);

    let options = DecodeOptions::default();
    let context = PaletteContext::default();

    let within = decode_with(&full[..192], PixelFormat::Dxt5, 16, 16, &context, &options)
        .unwrap()
        .expect("64 missing bytes are tolerated");
    assert_eq!(within.pixel(0, 0), Some(0xFFFF_FFFF));
    // The last block row was zero filled: zero alpha, black colour.
    assert_eq!(within.pixel(0, 15), Some(0));

    let beyond = decode_with(&full[..191], PixelFormat::Dxt5, 16, 16, &context, &options).unwrap();
    assert!(beyond.is_none());
}

#[test]
fn mip_chain_of_256_square() {
    let image = noise_image(256, 256, 9);
    let chain = image.generate_mipmaps(None);

    assert_eq!(chain.len(), 9);
    for (level, mip) in chain.iter().enumerate() {
        assert_eq!(mip.width(), 256 >> level);
        assert_eq!(mip.height(), 256 >> level);
    }

    // Top-left pixel of level 1 is the truncating per-channel mean of the 2x2 corner.
    let corner = [
        image.pixel(0, 0).unwrap(),
        image.pixel(1, 0).unwrap(),
        image.pixel(0, 1).unwrap(),
        image.pixel(1, 1).unwrap(),
    ];
    let mean = |shift: u32| corner.iter().map(|&p| (p >> shift) & 0xFF).sum::<u32>() / 4;
    let expected = (mean(24) << 24) | (mean(16) << 16) | (mean(8) << 8) | mean(0);
    assert_eq!(chain[1].pixel(0, 0), Some(expected));
}

#[test]
fn reduce_colors_hits_the_target() {
    let image = noise_image(16, 16, 3);
    let reduced = image.reduce_colors(16).unwrap();

    let palette = reduced.palette().expect("reduced images are paletted");
    assert_eq!(palette.len(), 16);
    assert!(reduced.pixels().iter().all(|&index| index < 16));

    let bytes = encode_to_vec(&reduced, PixelFormat::Indexed4);
    assert_eq!(bytes.len(), 16 * 16 / 2);
}

#[test]
fn deferred_frames_share_the_context_palette() {
    let palette = Arc::new(Palette::from(vec![0xFF00_0000, 0xFFFF_0000, 0xFF00_FF00, 0xFF00_00FF]));
    let context = PaletteContext::with_palette(Arc::clone(&palette));
    let options = DecodeOptionsBuilder::new()
        .palette_mode(PaletteMode::Deferred)
        .build();

    let first = decode_with(&[0x10, 0x32], PixelFormat::Indexed4, 2, 2, &context, &options)
        .unwrap()
        .unwrap();
    let second = decode_with(&[0x23, 0x01], PixelFormat::Indexed4, 2, 2, &context, &options)
        .unwrap()
        .unwrap();

    assert_eq!(first.pixels(), &[0, 1, 2, 3]);
    assert_eq!(second.pixels(), &[3, 2, 1, 0]);
    assert!(Arc::ptr_eq(first.palette().unwrap(), &palette));
    assert!(Arc::ptr_eq(second.palette().unwrap(), &palette));
    assert_eq!(first.to_argb().pixels(), palette.colors());
}

#[test]
fn paletted_format_without_palette() {
    let result = decode_with(
        &[0u8; 4],
        PixelFormat::Indexed8,
        2,
        2,
        &PaletteContext::default(),
        &DecodeOptions::default(),
    );
    assert!(matches!(
        result,
        Err(DecodeError::MissingPalette(PixelFormat::Indexed8))
    ));
}

#[test]
fn every_format_decodes_noise_without_panicking() {
    let bytes = noise_bytes(4096, 1234);
    let context = PaletteContext::with_palette(Arc::new(Palette::from(vec![0xFF12_3456; 256])));
    let options = DecodeOptions::default();

    for format in PixelFormat::all_values().iter() {
        let image = decode_with(&bytes, *format, 8, 8, &context, &options)
            .unwrap_or_else(|error| panic!("{format:?}: {error}"))
            .unwrap_or_else(|| panic!("{format:?} reported truncation"));
        assert_eq!(image.pixels().len(), 64, "{format:?}");
    }
}

#[test]
fn empty_source_never_panics() {
    let context = PaletteContext::with_palette(Arc::new(Palette::from(vec![0; 16])));
    let options = DecodeOptionsBuilder::new().truncation_tolerance(0).build();
    for format in PixelFormat::all_values().iter() {
        match decode_with(&[], *format, 4, 4, &context, &options) {
            Ok(None) => assert!(format.is_block_compressed(), "{format:?}"),
            Err(DecodeError::Io(_)) => assert!(!format.is_block_compressed(), "{format:?}"),
            other => panic!("{format:?}: unexpected {other:?}"),
        }
    }
}

#[rstest]
#[case(16, 16, 4)]
#[case(64, 32, 1)]
#[case(8, 8, 16)]
fn morton_unswizzle_inverts_swizzle(#[case] width: u32, #[case] height: u32, #[case] block_size: usize) {
    let data = noise_bytes(width as usize * height as usize * block_size, width);
    let swizzled = swizzle_morton(&data, width, height, block_size);
    assert_eq!(unswizzle_morton(&swizzled, width, height, block_size), data);
}

#[rstest]
#[case(16, 16)]
#[case(128, 32)]
fn ps2_unswizzle_inverts_swizzle(#[case] width: u32, #[case] height: u32) {
    let data = noise_bytes(width as usize * height as usize, height);
    assert_eq!(unswizzle_ps2(&swizzle_ps2(&data, width, height), width, height), data);
}

#[rstest]
#[case(64, 64, 4)]
#[case(100, 30, 1)]
#[case(16, 256, 16)]
fn tegra_deswizzle_inverts_swizzle(#[case] width: u32, #[case] height: u32, #[case] bytes_per_pixel: usize) {
    let data = noise_bytes(width as usize * height as usize * bytes_per_pixel, width ^ height);
    let block_height = block_height_for(height);
    let swizzled = swizzle_block_linear(&data, width, height, bytes_per_pixel, block_height);
    assert_eq!(
        deswizzle_block_linear(&swizzled, width, height, bytes_per_pixel, block_height),
        data
    );
}
