//! Assertion helpers for tests.

use std::path::Path;

use pretty_assertions::assert_eq;

use super::fixtures::{read_png, DecodedPng};

/// Assert a file is a PNG of the given layout and return it decoded
pub fn assert_png(path: &Path, color: png::ColorType, width: u32, height: u32) -> DecodedPng {
    let bytes = std::fs::read(path).expect("Output file missing");
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G']),
        "Expected PNG at {}, got {} bytes starting with {:?}",
        path.display(),
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );

    let png = read_png(path);
    assert_eq!(png.color, color, "Unexpected color type");
    assert_eq!((png.width, png.height), (width, height), "Unexpected size");
    png
}

/// Channel `c` of every pixel
pub fn channel(png: &DecodedPng, channels: usize, c: usize) -> Vec<u8> {
    png.data.iter().skip(c).step_by(channels).copied().collect()
}

/// Assert an RGB(A) image is gray with the given levels
pub fn assert_gray_levels(png: &DecodedPng, channels: usize, expected: &[u8]) {
    for c in 0..3 {
        assert_eq!(
            channel(png, channels, c),
            expected,
            "Channel {c} does not match expected gray levels"
        );
    }
}
