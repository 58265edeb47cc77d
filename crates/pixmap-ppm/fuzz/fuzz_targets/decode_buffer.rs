#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use pixmap_ppm::pixmap_core::options::DecoderOptions;

    // keep allocations small, the header alone can ask for gigabytes
    let options = DecoderOptions::default()
        .set_max_width(1 << 10)
        .set_max_height(1 << 10);

    let mut decoder = pixmap_ppm::PpmDecoder::new_with_options(options, data);
    let _ = decoder.decode();
});
