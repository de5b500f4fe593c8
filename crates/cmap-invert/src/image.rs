//! Dense RGB/RGBA images and borrowed color views.

use crate::error::InvertError;

/// A dense row-major image of shape `[height, width, channels]`.
///
/// `channels` is 3 (RGB) or 4 (RGBA). Channel values are plain `f64`; their
/// range is whatever the producer used (`0..=1` after decoding, or the
/// channel scale of the colormap the image is compared against).
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<f64>,
}

impl Image {
    /// Wrap raw row-major data.
    ///
    /// # Errors
    ///
    /// [`InvertError::Precondition`] if `channels` is not 3 or 4 or the data
    /// length is not `width * height * channels`.
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<f64>,
    ) -> Result<Self, InvertError> {
        check_channels(channels)?;
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(InvertError::Precondition(format!(
                "image data has {} values, expected {width}x{height}x{channels}={expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Build an RGB image from pixel triples in row-major order.
    pub fn from_rgb(width: usize, height: usize, pixels: &[[f64; 3]]) -> Result<Self, InvertError> {
        Self::new(width, height, 3, pixels.concat())
    }

    /// Build an RGBA image from pixel quadruples in row-major order.
    pub fn from_rgba(
        width: usize,
        height: usize,
        pixels: &[[f64; 4]],
    ) -> Result<Self, InvertError> {
        Self::new(width, height, 4, pixels.concat())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The raw row-major channel data.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// The channels of pixel `idx` (row-major index).
    #[inline]
    pub fn pixel(&self, idx: usize) -> &[f64] {
        let start = idx * self.channels;
        &self.data[start..start + self.channels]
    }

    #[inline]
    pub fn pixel_mut(&mut self, idx: usize) -> &mut [f64] {
        let start = idx * self.channels;
        &mut self.data[start..start + self.channels]
    }

    /// The channels of the pixel at column `x`, row `y`.
    #[inline]
    pub fn pixel_at(&self, x: usize, y: usize) -> &[f64] {
        self.pixel(y * self.width + x)
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.channels)
    }

    /// A new image with `f` applied to every channel value.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Image {
        Image {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

pub(crate) fn check_channels(channels: usize) -> Result<(), InvertError> {
    if channels == 3 || channels == 4 {
        Ok(())
    } else {
        Err(InvertError::Precondition(format!(
            "colors must have 3 or 4 channels, got {channels}"
        )))
    }
}

/// A borrowed view of colors with an explicit trailing channel axis.
///
/// Lists of single colors and whole images go through the same view, so
/// inversion sees one flat `[pixels, channels]` layout with the spatial
/// shape carried alongside.
#[derive(Debug, Clone, Copy)]
pub struct Colors<'a> {
    data: &'a [f64],
    channels: usize,
    rows: usize,
    cols: usize,
}

impl<'a> Colors<'a> {
    /// View flat data as a single row of colors.
    pub fn new(data: &'a [f64], channels: usize) -> Result<Self, InvertError> {
        check_channels(channels)?;
        if data.len() % channels != 0 {
            return Err(InvertError::Precondition(format!(
                "{} values cannot be split into {channels}-channel colors",
                data.len()
            )));
        }
        Ok(Self {
            data,
            channels,
            rows: 1,
            cols: data.len() / channels,
        })
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Spatial shape as `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &'a [f64]> {
        self.data.chunks_exact(self.channels)
    }
}

impl<'a> From<&'a Image> for Colors<'a> {
    fn from(image: &'a Image) -> Self {
        Self {
            data: &image.data,
            channels: image.channels,
            rows: image.height,
            cols: image.width,
        }
    }
}

impl<'a, const N: usize> From<&'a [[f64; N]]> for Colors<'a> {
    fn from(colors: &'a [[f64; N]]) -> Self {
        Self {
            data: colors.as_flattened(),
            channels: N,
            rows: 1,
            cols: colors.len(),
        }
    }
}

impl<'a, const N: usize> From<&'a Vec<[f64; N]>> for Colors<'a> {
    fn from(colors: &'a Vec<[f64; N]>) -> Self {
        Colors::from(colors.as_slice())
    }
}

impl<'a, const N: usize, const M: usize> From<&'a [[f64; N]; M]> for Colors<'a> {
    fn from(colors: &'a [[f64; N]; M]) -> Self {
        Colors::from(colors.as_slice())
    }
}
