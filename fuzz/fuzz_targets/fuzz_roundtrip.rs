#![no_main]
use libfuzzer_sys::fuzz_target;
use bmpkit::*;

fuzz_target!(|data: &[u8]| {
    // Negating twice must give back the original image
    let Ok(image) = BmpImage::from_bytes(data) else {
        return;
    };

    let once = negate(image.clone()).expect("negate decoded image");
    let negated = BmpImage::from_bytes(&once).expect("negated output must decode");
    assert_eq!(negated.header(), image.header());

    let twice = negate(negated).expect("negate twice");
    let restored = BmpImage::from_bytes(&twice).expect("restored output must decode");
    assert_eq!(restored, image, "negation is not an involution");

    // The pixel-level path must always produce a decodable file
    if !image.header().is_top_down() {
        if let Ok(reencoded) = reencode_negative(&image) {
            BmpImage::from_bytes(&reencoded).expect("re-encoded output must decode");
        }
    }
});
