use nanorand::Rng;
use piko_core::bit_depth::BitDepth;
use piko_core::colorspace::{ColorCharacteristics, ColorSpace};
use piko_core::options::{DecoderOptions, EncoderOptions};
use piko_qoi::{QoiDecoder, QoiEncoder};

fn encode(pixels: &[u8], width: usize, height: usize, colorspace: ColorSpace) -> Vec<u8> {
    let options = EncoderOptions::new(width, height, colorspace, BitDepth::Eight);
    QoiEncoder::new(pixels, options).encode().unwrap()
}

fn decode(data: &[u8]) -> Vec<u8> {
    QoiDecoder::new(data).decode().unwrap()
}

fn decode_forced(data: &[u8], colorspace: ColorSpace) -> Vec<u8> {
    let options = DecoderOptions::default().set_out_colorspace(colorspace);
    QoiDecoder::new_with_options(data, options).decode().unwrap()
}

/// The chunk payload between the header and the stream trailer
fn chunk_region(data: &[u8]) -> &[u8] {
    &data[14..data.len() - 8]
}

#[test]
fn test_single_black_pixel_stream() {
    let pixels = [0x00, 0x00, 0x00, 0xFF];
    let encoded = encode(&pixels, 1, 1, ColorSpace::RGBA);

    // the first pixel differs from the implicit starting pixel only
    // in alpha, which forces a full five byte chunk
    #[rustfmt::skip]
    let expected = [
        0x71, 0x6F, 0x69, 0x66,             // qoif
        0x00, 0x00, 0x00, 0x01,             // width
        0x00, 0x00, 0x00, 0x01,             // height
        0x04, 0x00,                         // channels + colorspace
        0xFF, 0x00, 0x00, 0x00, 0xFF,       // full RGBA chunk
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00
    ];
    assert_eq!(&encoded[..], &expected[..]);
    assert_eq!(decode(&encoded), &pixels);
}

#[test]
fn test_short_run_flushes_at_final_pixel() {
    // three pixels identical to the implicit starting pixel become
    // a single run chunk of length three
    let pixels = [0_u8; 3 * 4];
    let encoded = encode(&pixels, 3, 1, ColorSpace::RGBA);

    assert_eq!(encoded.len(), 23);
    assert_eq!(chunk_region(&encoded), &[0xC2]);
    assert_eq!(decode(&encoded), &pixels);
}

#[test]
fn test_index_hit_beats_delta_chunks() {
    // the second pixel matches slot zero of the freshly zeroed
    // pixel array, so a one byte index chunk wins
    let pixels = [10, 20, 30, 255, 0, 0, 0, 0];
    let encoded = encode(&pixels, 2, 1, ColorSpace::RGBA);

    assert_eq!(chunk_region(&encoded), &[0xFF, 10, 20, 30, 255, 0x00]);
    assert_eq!(decode(&encoded), &pixels);
}

#[test]
fn test_small_diff_is_a_single_byte() {
    // (+1, -1, 0) against the previous pixel, all within -2..=1
    let pixels = [100, 100, 100, 255, 101, 99, 100, 255];
    let encoded = encode(&pixels, 2, 1, ColorSpace::RGBA);

    assert_eq!(chunk_region(&encoded), &[0xFF, 100, 100, 100, 255, 0x76]);
    assert_eq!(decode(&encoded), &pixels);
}

#[test]
fn test_luma_diff_is_two_bytes() {
    // green moves by 20, red and blue stay within -8..=7 of it
    let pixels = [100, 100, 100, 255, 117, 120, 123, 255];
    let encoded = encode(&pixels, 2, 1, ColorSpace::RGBA);

    assert_eq!(
        chunk_region(&encoded),
        &[0xFF, 100, 100, 100, 255, 0xB4, 0x5B]
    );
    assert_eq!(decode(&encoded), &pixels);
}

#[test]
fn test_wide_delta_falls_back_to_full_rgb() {
    // red moves by 10 while green moves by 20, too far apart for
    // the luma chunk
    let pixels = [100, 100, 100, 255, 110, 120, 115, 255];
    let encoded = encode(&pixels, 2, 1, ColorSpace::RGBA);

    assert_eq!(
        chunk_region(&encoded),
        &[0xFF, 100, 100, 100, 255, 0xFE, 110, 120, 115]
    );
    assert_eq!(decode(&encoded), &pixels);
}

#[test]
fn test_index_chunks_for_recently_seen_pixels() {
    let pixels = [
        1, 2, 3, 255, // full chunk, alpha changed
        9, 8, 7, 255, // luma chunk
        1, 2, 3, 255, // index chunk
        9, 8, 7, 255, // index chunk
    ];
    let encoded = encode(&pixels, 4, 1, ColorSpace::RGBA);

    assert_eq!(
        chunk_region(&encoded),
        &[0xFF, 1, 2, 3, 255, 0xA6, 0xA6, 0x17, 0x29]
    );
    assert_eq!(decode(&encoded), &pixels);
}

#[test]
fn test_three_channel_input_keeps_zero_alpha() {
    let pixels = [0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00];
    let encoded = encode(&pixels, 2, 1, ColorSpace::RGB);

    // both pixels wrap into small diff chunks on the zero alpha path
    assert_eq!(chunk_region(&encoded), &[0x5A, 0x76]);

    // native output returns the input
    assert_eq!(decode(&encoded), &pixels);

    // forcing four channels surfaces the zero alpha the encoder tracked
    let forced = decode_forced(&encoded, ColorSpace::RGBA);
    assert_eq!(&forced, &[0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00]);
}

#[test]
fn test_channel_forcing_preserves_color() {
    let pixels = [
        12, 34, 56, 78, //
        90, 12, 34, 56, //
        78, 90, 12, 34, //
        56, 78, 90, 12, //
    ];
    let encoded = encode(&pixels, 2, 2, ColorSpace::RGBA);

    let rgba = decode_forced(&encoded, ColorSpace::RGBA);
    let rgb = decode_forced(&encoded, ColorSpace::RGB);

    assert_eq!(rgba, pixels);
    // the three channel output drops alpha and nothing else
    for (forced, native) in rgb.chunks_exact(3).zip(pixels.chunks_exact(4)) {
        assert_eq!(forced, &native[..3]);
    }
}

#[test]
fn test_run_length_boundaries() {
    // a run caps at 62 pixels per chunk
    let encoded = encode(&[0_u8; 62 * 4], 62, 1, ColorSpace::RGBA);
    assert_eq!(chunk_region(&encoded), &[0xFD]);

    // one more pixel starts a fresh run of one
    let encoded = encode(&[0_u8; 63 * 4], 63, 1, ColorSpace::RGBA);
    assert_eq!(chunk_region(&encoded), &[0xFD, 0xC0]);

    let encoded = encode(&[0_u8; 124 * 4], 124, 1, ColorSpace::RGBA);
    assert_eq!(chunk_region(&encoded), &[0xFD, 0xFD]);

    // ceil(125 / 62) run chunks for a uniform image
    let encoded = encode(&[0_u8; 125 * 4], 125, 1, ColorSpace::RGBA);
    assert_eq!(chunk_region(&encoded), &[0xFD, 0xFD, 0xC0]);

    assert_eq!(decode(&encoded), &[0_u8; 125 * 4][..]);
}

#[test]
fn test_stream_framing() {
    let mut rng = nanorand::WyRand::new_seed(0x716F_6966);
    let (w, h) = (37, 11);
    let pixels: Vec<u8> = (0..w * h * 4).map(|_| rng.generate::<u8>()).collect();

    let options = EncoderOptions::new(w, h, ColorSpace::RGBA, BitDepth::Eight);
    let mut encoder = QoiEncoder::new(&pixels, options);
    let encoded = encoder.encode().unwrap();

    // starts with the magic, ends with eight zero bytes
    assert_eq!(&encoded[..4], b"qoif");
    assert_eq!(&encoded[encoded.len() - 8..], &[0; 8]);

    // bounded above by the worst case, below by header + trailer
    assert!(encoded.len() >= 14 + 8);
    assert!(encoded.len() <= encoder.max_size());
}

#[test]
fn test_descriptor_survives_roundtrip() {
    let pixels = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

    let options = EncoderOptions::new(2, 2, ColorSpace::RGB, BitDepth::Eight);
    let mut encoder = QoiEncoder::new(&pixels, options);
    encoder.set_color_characteristics(ColorCharacteristics::Linear);
    let encoded = encoder.encode().unwrap();

    let mut decoder = QoiDecoder::new(&encoded);
    decoder.decode_headers().unwrap();

    assert_eq!(decoder.dimensions(), Some((2, 2)));
    assert_eq!(decoder.colorspace(), Some(ColorSpace::RGB));
    assert_eq!(
        decoder.color_characteristics(),
        Some(ColorCharacteristics::Linear)
    );
    assert_eq!(decoder.bit_depth(), BitDepth::Eight);
}

#[test]
fn test_gradient_roundtrip() {
    // neighbouring pixels stay close, exercising the delta chunks
    let (w, h) = (64, 64);
    let mut pixels = Vec::with_capacity(w * h * 4);

    for i in 0..w * h {
        pixels.push((2 * i) as u8);
        pixels.push((3 * i) as u8);
        pixels.push(i as u8);
        pixels.push(255);
    }

    let encoded = encode(&pixels, w, h, ColorSpace::RGBA);
    assert_eq!(decode(&encoded), pixels);
}

#[test]
fn test_blocky_roundtrip() {
    // flat blocks with a few colors, exercising runs and index hits
    let (w, h) = (48, 32);
    let palette = [
        [0x12, 0x34, 0x56, 0xFF],
        [0x65, 0x43, 0x21, 0xFF],
        [0x00, 0x00, 0x00, 0x80],
        [0xFF, 0xFF, 0xFF, 0xFF],
    ];
    let mut pixels = Vec::with_capacity(w * h * 4);

    for y in 0..h {
        for x in 0..w {
            let color = palette[((x / 8) + (y / 8)) % palette.len()];
            pixels.extend_from_slice(&color);
        }
    }

    let encoded = encode(&pixels, w, h, ColorSpace::RGBA);
    assert!(encoded.len() < pixels.len() / 4);
    assert_eq!(decode(&encoded), pixels);
}

#[test]
fn test_random_pixels_roundtrip() {
    let mut rng = nanorand::WyRand::new_seed(0xDEAD_BEEF);

    for (w, h) in [(1, 1), (3, 7), (13, 1), (64, 64)] {
        for colorspace in [ColorSpace::RGB, ColorSpace::RGBA] {
            let len = w * h * colorspace.num_components();
            let pixels: Vec<u8> = (0..len).map(|_| rng.generate::<u8>()).collect();

            let encoded = encode(&pixels, w, h, colorspace);
            assert_eq!(decode(&encoded), pixels, "{w}x{h} {colorspace:?}");
        }
    }
}

#[test]
fn test_alpha_changes_force_full_chunks() {
    // alpha differs on every pixel, small rgb deltas must not
    // collapse into diff or luma chunks
    let pixels = [
        10, 10, 10, 10, //
        11, 10, 10, 20, //
        11, 11, 10, 30, //
    ];
    let encoded = encode(&pixels, 3, 1, ColorSpace::RGBA);

    let chunks = chunk_region(&encoded);
    assert_eq!(chunks.len(), 3 * 5);
    for chunk in chunks.chunks_exact(5) {
        assert_eq!(chunk[0], 0xFF);
    }
    assert_eq!(decode(&encoded), &pixels);
}
