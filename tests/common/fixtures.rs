//! Test fixtures: PNG writers and a scratch directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Four gray levels, one per pixel of a 2x2 image
pub const GRAY_RAMP: [u8; 4] = [0, 85, 170, 255];

/// The same ramp run backwards, as rendered by `gray_r`
pub const GRAY_RAMP_REVERSED: [u8; 4] = [255, 170, 85, 0];

/// Scratch directory that is removed when dropped
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a config file and return its path
    pub fn write_config(&self, yaml: &str) -> PathBuf {
        let path = self.path("config.yaml");
        fs::write(&path, yaml).expect("Failed to write config");
        path
    }

    /// Write an 8-bit PNG and return its path
    pub fn write_png(
        &self,
        name: &str,
        width: u32,
        height: u32,
        color: png::ColorType,
        data: &[u8],
    ) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, encode_png(width, height, color, data)).expect("Failed to write PNG");
        path
    }

    /// 2x2 RGB image of [`GRAY_RAMP`]
    pub fn gray_ramp_rgb(&self, name: &str) -> PathBuf {
        let data: Vec<u8> = GRAY_RAMP.iter().flat_map(|&g| [g, g, g]).collect();
        self.write_png(name, 2, 2, png::ColorType::Rgb, &data)
    }
}

pub fn encode_png(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("Failed to write PNG header");
        writer
            .write_image_data(data)
            .expect("Failed to write PNG data");
    }
    buf
}

/// Decoded PNG: color type, dimensions and raw samples
pub struct DecodedPng {
    pub color: png::ColorType,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

pub fn read_png(path: &Path) -> DecodedPng {
    let file = fs::File::open(path).expect("Failed to open PNG");
    let mut reader = png::Decoder::new(std::io::BufReader::new(file))
        .read_info()
        .expect("Failed to read PNG header");
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).expect("Failed to decode PNG");
    buf.truncate(frame.buffer_size());
    DecodedPng {
        color: frame.color_type,
        width: frame.width,
        height: frame.height,
        data: buf,
    }
}
