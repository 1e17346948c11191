#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header validation and plane reading must never panic
    let Ok(image) = bmpkit::BmpImage::from_bytes(data) else {
        return;
    };

    // Anything that validates re-serialises to the exact input
    let bytes = image.to_bytes().expect("serialise decoded image");
    assert_eq!(bytes, data, "re-serialised bytes differ");

    let report = bmpkit::compare(&image, &image).expect("self-comparison");
    assert_eq!(report.verdict(), bmpkit::Verdict::Equal);
    assert!(report.coordinates().is_empty());
});
