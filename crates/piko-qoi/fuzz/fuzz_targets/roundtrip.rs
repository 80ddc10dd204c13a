#![no_main]

use libfuzzer_sys::fuzz_target;
use piko_core::bit_depth::BitDepth;
use piko_core::colorspace::ColorSpace;
use piko_core::options::EncoderOptions;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // small dimensions taken from the input itself
    let width = usize::from(data[0] % 32) + 1;
    let colorspace = if data[1] & 1 == 0 { ColorSpace::RGB } else { ColorSpace::RGBA };
    let channels = colorspace.num_components();

    let pixels = &data[2..];
    let height = pixels.len() / (width * channels);
    if height == 0 {
        return;
    }
    let pixels = &pixels[..width * height * channels];

    let options = EncoderOptions::new(width, height, colorspace, BitDepth::Eight);
    let encoded = piko_qoi::QoiEncoder::new(pixels, options)
        .encode()
        .expect("Failed to encode valid pixel data!");

    let mut decoder = piko_qoi::QoiDecoder::new(&encoded);
    let decoded = decoder.decode().expect("Failed to decode a valid stream!");

    assert!(
        pixels == decoded,
        "The decoded pixels do not match the original data!"
    );
});
