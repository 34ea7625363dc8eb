//! Assertion helpers for tests.

use std::path::Path;

use halftone::models::UploadLimits;
use halftone::rendering::decode_png;
use halftone_engine::SourceImage;

const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Assert bytes are a PNG and decode them.
pub fn assert_png(bytes: &[u8]) -> SourceImage {
    assert!(
        bytes.starts_with(&PNG_MAGIC),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    decode_png(bytes, &UploadLimits::default()).expect("decode PNG")
}

/// Read and decode a PNG file written by the code under test.
pub fn read_output(path: &Path) -> SourceImage {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected output at {}: {e}", path.display()));
    assert_png(&bytes)
}

/// Count pixels that differ from `background`.
pub fn ink_pixels(image: &SourceImage, background: [u8; 4]) -> usize {
    image
        .data()
        .chunks_exact(4)
        .filter(|px| *px != background)
        .count()
}
