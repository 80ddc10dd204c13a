#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut decoder = piko_qoi::QoiDecoder::new(data);
    // errors are fine, panics are not
    let _ = decoder.decode();
});
