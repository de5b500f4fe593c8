//! PNG decoding and encoding for recolor jobs.
//!
//! Decoded images carry raw 8-bit channel values (`0.0..=255.0`) until they
//! are normalized. Every supported PNG layout is expanded to RGB or RGBA.

use std::fs;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use cmap_invert::{Image, MaskedField, Normalizer};

use crate::error::{CodecError, RecolorError};

/// Decode a PNG into an RGB or RGBA image with values in `0.0..=255.0`.
///
/// 16-bit samples are reduced to 8 bits, palettes are expanded and gray is
/// replicated into RGB.
pub fn decode_png<R: Read>(reader: R) -> Result<Image, CodecError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| CodecError::PngDecode(e.to_string()))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| CodecError::PngDecode(e.to_string()))?;
    let bytes = &buf[..frame.buffer_size()];

    if frame.bit_depth != png::BitDepth::Eight {
        return Err(CodecError::UnsupportedLayout(format!(
            "{:?} {:?}",
            frame.color_type, frame.bit_depth
        )));
    }

    let (width, height) = (frame.width as usize, frame.height as usize);
    let (channels, data): (usize, Vec<f64>) = match frame.color_type {
        png::ColorType::Grayscale => (
            3,
            bytes
                .iter()
                .flat_map(|&g| [g, g, g])
                .map(f64::from)
                .collect(),
        ),
        png::ColorType::GrayscaleAlpha => (
            4,
            bytes
                .chunks_exact(2)
                .flat_map(|px| [px[0], px[0], px[0], px[1]])
                .map(f64::from)
                .collect(),
        ),
        png::ColorType::Rgb => (3, bytes.iter().copied().map(f64::from).collect()),
        png::ColorType::Rgba => (4, bytes.iter().copied().map(f64::from).collect()),
        other => {
            return Err(CodecError::UnsupportedLayout(format!("{other:?}")));
        }
    };

    tracing::debug!(width, height, channels, "Decoded PNG");
    Image::new(width, height, channels, data)
        .map_err(|e| CodecError::UnsupportedLayout(e.to_string()))
}

/// Read a PNG file and normalize its values to `0.0..=1.0`.
///
/// The whole array (alpha included) is rescaled by its own minimum and
/// spread, so a constant image cannot be normalized.
pub fn read_image(path: &Path) -> Result<Image, RecolorError> {
    let file = fs::File::open(path).map_err(CodecError::from)?;
    let image = decode_png(BufReader::new(file))?;
    let norm = Normalizer::fit(image.data(), (0.0, 1.0))?;
    tracing::debug!(
        path = %path.display(),
        min = norm.min(),
        ptp = norm.ptp(),
        "Normalized image"
    );
    Ok(image.map(|v| norm.apply(v)))
}

/// Convert a channel value in `0.0..=scale` to a byte.
#[inline]
fn to_byte(v: f64, scale: f64) -> u8 {
    (v / scale * 255.0).round().clamp(0.0, 255.0) as u8
}

fn dimensions(width: usize, height: usize) -> Result<(u32, u32), CodecError> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(CodecError::UnsupportedDimensions { width, height }),
    }
}

/// Encode raw 8-bit samples as a PNG.
fn encode_raw(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    data: &[u8],
) -> Result<Vec<u8>, CodecError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| CodecError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| CodecError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Encode an image whose channels lie in `0.0..=scale` as an 8-bit PNG.
pub fn encode_png(image: &Image, scale: f64) -> Result<Vec<u8>, CodecError> {
    let (width, height) = dimensions(image.width(), image.height())?;
    let color_type = if image.channels() == 4 {
        png::ColorType::Rgba
    } else {
        png::ColorType::Rgb
    };
    let data: Vec<u8> = image.data().iter().map(|&v| to_byte(v, scale)).collect();
    encode_raw(width, height, color_type, &data)
}

/// Recompress PNG bytes with oxipng, keeping the input if that fails.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    let before = png_bytes.len();
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    tracing::debug!(before, after = optimized.len(), "Optimized PNG");
    optimized
}

/// Encode `image` and write it to `path`, returning the number of bytes.
pub fn write_image(
    image: &Image,
    path: &Path,
    scale: f64,
    optimize: bool,
) -> Result<usize, CodecError> {
    let mut bytes = encode_png(image, scale)?;
    if optimize {
        bytes = optimize_png(bytes);
    }
    fs::write(path, &bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote PNG");
    Ok(bytes.len())
}

/// Render a value field as an 8-bit gray+alpha PNG.
///
/// `value_range` is the range the field was inferred with; values map
/// linearly from its low end (black) to its high end (white). Masked pixels
/// are fully transparent.
pub fn encode_value_field(
    field: &MaskedField,
    value_range: (f64, f64),
) -> Result<Vec<u8>, CodecError> {
    let (rows, cols) = field.shape();
    let (width, height) = dimensions(cols, rows)?;

    // Inferred values are `(vmax - vmin) * f - vmin` for a fraction `f`.
    let (vmin, vmax) = value_range;
    let span = vmax - vmin;
    let fraction = |v: f64| if span == 0.0 { 0.0 } else { (v + vmin) / span };

    let data: Vec<u8> = field
        .iter()
        .flat_map(|v| match v {
            Some(v) => [to_byte(fraction(v), 1.0), 255],
            None => [0, 0],
        })
        .collect();
    encode_raw(width, height, png::ColorType::GrayscaleAlpha, &data)
}
