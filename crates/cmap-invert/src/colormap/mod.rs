//! Color functions and the named colormap registry
//!
//! A color function maps a normalized scalar `t` in `0.0..=1.0` to a color
//! with 3 (RGB) or 4 (RGBA) channels. Channel values live in `0.0..=scale`,
//! where `scale` is fixed per function (usually `1.0` or `255.0`).
//!
//! # Example
//!
//! ```
//! use cmap_invert::{Colormap, Registry};
//!
//! let registry = Registry::builtin();
//! let jet = registry.resolve("jet").unwrap();
//! assert_eq!(jet.channels(), 4);
//!
//! let ramp = Colormap::from_fn("ramp", 3, 255.0, |t, out| out.fill(255.0 * t));
//! assert_eq!(ramp.color(0.5), vec![127.5, 127.5, 127.5]);
//! ```

mod builtin;
mod registry;
mod segmented;

pub use registry::{CmapSpec, Registry, RegistryBuilder};
pub use segmented::{Anchor, Segmented, Stops};

use std::fmt;
use std::sync::Arc;

use crate::error::InvertError;

/// Positions at which a color function is evaluated during validation.
const CHECK_POINTS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Slack allowed above `scale` when validating sampled colors.
const SCALE_SLACK: f64 = 1e-9;

/// A pure mapping from a normalized scalar to a color.
///
/// Implementations must write exactly [`channels()`](Self::channels) values
/// into `out`, each within `0.0..=scale()`. `t` is always clamped to
/// `0.0..=1.0` by [`Colormap`] before this is called.
pub trait ColorFunction: Send + Sync {
    /// Number of channels per color: 3 for RGB, 4 for RGBA.
    fn channels(&self) -> usize;

    /// Upper bound of the channel value range.
    fn scale(&self) -> f64 {
        1.0
    }

    /// Write the color for `t` into `out` (`out.len() == self.channels()`).
    fn eval_into(&self, t: f64, out: &mut [f64]);
}

/// A named, cheaply clonable handle to a [`ColorFunction`].
#[derive(Clone)]
pub struct Colormap {
    name: Arc<str>,
    func: Arc<dyn ColorFunction>,
}

impl Colormap {
    /// Wrap a color function under the given name.
    pub fn new(name: impl Into<String>, func: impl ColorFunction + 'static) -> Self {
        Self {
            name: Arc::from(name.into()),
            func: Arc::new(func),
        }
    }

    /// Build a colormap from a closure writing `channels` values in `0..=scale`.
    pub fn from_fn<F>(name: impl Into<String>, channels: usize, scale: f64, f: F) -> Self
    where
        F: Fn(f64, &mut [f64]) + Send + Sync + 'static,
    {
        Self::new(name, FnColorFunction { channels, scale, f })
    }

    /// The colormap's registry name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.func.channels()
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.func.scale()
    }

    /// Write the color for `t` into `out`. `t` is clamped to `0.0..=1.0`.
    #[inline]
    pub fn eval_into(&self, t: f64, out: &mut [f64]) {
        self.func.eval_into(t.clamp(0.0, 1.0), out);
    }

    /// The color for a single value.
    pub fn color(&self, t: f64) -> Vec<f64> {
        let mut out = vec![0.0; self.channels()];
        self.eval_into(t, &mut out);
        out
    }

    /// Colors for many values, flattened with a trailing channel axis.
    ///
    /// The result has length `ts.len() * self.channels()`.
    pub fn colors(&self, ts: &[f64]) -> Vec<f64> {
        let channels = self.channels();
        let mut out = vec![0.0; ts.len() * channels];
        for (&t, color) in ts.iter().zip(out.chunks_exact_mut(channels)) {
            self.eval_into(t, color);
        }
        out
    }

    /// The same colormap traversed backwards, named `<name>_r`.
    pub fn reversed(&self) -> Colormap {
        Colormap {
            name: Arc::from(format!("{}_r", self.name)),
            func: Arc::new(Reversed(self.func.clone())),
        }
    }

    /// Check that this behaves like a color function.
    ///
    /// The channel count must be 3 or 4, the scale finite and positive, and
    /// colors evaluated across `0.0..=1.0` finite and within `0.0..=scale`.
    pub fn validate(&self) -> Result<(), InvertError> {
        let channels = self.channels();
        if channels != 3 && channels != 4 {
            return Err(InvertError::invalid(
                self.name(),
                format!("expected 3 or 4 channels, got {channels}"),
            ));
        }

        let scale = self.scale();
        if !scale.is_finite() || scale <= 0.0 {
            return Err(InvertError::invalid(
                self.name(),
                format!("channel scale must be finite and positive, got {scale}"),
            ));
        }

        let mut out = vec![0.0; channels];
        for t in CHECK_POINTS {
            self.eval_into(t, &mut out);
            if let Some(v) = out
                .iter()
                .find(|v| !v.is_finite() || **v < -SCALE_SLACK || **v > scale + SCALE_SLACK)
            {
                return Err(InvertError::invalid(
                    self.name(),
                    format!("color at t={t} has channel value {v} outside 0..={scale}"),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Colormap")
            .field("name", &self.name)
            .field("channels", &self.channels())
            .field("scale", &self.scale())
            .finish()
    }
}

struct FnColorFunction<F> {
    channels: usize,
    scale: f64,
    f: F,
}

impl<F> ColorFunction for FnColorFunction<F>
where
    F: Fn(f64, &mut [f64]) + Send + Sync,
{
    fn channels(&self) -> usize {
        self.channels
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn eval_into(&self, t: f64, out: &mut [f64]) {
        (self.f)(t, out)
    }
}

struct Reversed(Arc<dyn ColorFunction>);

impl ColorFunction for Reversed {
    fn channels(&self) -> usize {
        self.0.channels()
    }

    fn scale(&self) -> f64 {
        self.0.scale()
    }

    fn eval_into(&self, t: f64, out: &mut [f64]) {
        self.0.eval_into(1.0 - t, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray255() -> Colormap {
        Colormap::from_fn("gray255", 3, 255.0, |t, out| out.fill(255.0 * t))
    }

    #[test]
    fn test_color_clamps_input() {
        let cmap = gray255();
        assert_eq!(cmap.color(-0.5), vec![0.0, 0.0, 0.0]);
        assert_eq!(cmap.color(2.0), vec![255.0, 255.0, 255.0]);
    }

    #[test]
    fn test_colors_flat_layout() {
        let cmap = gray255();
        let colors = cmap.colors(&[0.0, 1.0]);
        assert_eq!(colors, vec![0.0, 0.0, 0.0, 255.0, 255.0, 255.0]);
    }

    #[test]
    fn test_reversed() {
        let cmap = gray255().reversed();
        assert_eq!(cmap.name(), "gray255_r");
        assert_eq!(cmap.color(0.0), vec![255.0, 255.0, 255.0]);
        assert_eq!(cmap.color(1.0), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_validate_accepts_ramp() {
        assert!(gray255().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_two_channels() {
        let cmap = Colormap::from_fn("pair", 2, 1.0, |t, out| out.fill(t));
        assert!(matches!(
            cmap.validate(),
            Err(InvertError::InvalidColorFunction { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_scale() {
        let cmap = Colormap::from_fn("zero", 3, 0.0, |_, out| out.fill(0.0));
        assert!(cmap.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_color() {
        // Declares unit scale but produces byte values.
        let cmap = Colormap::from_fn("liar", 3, 1.0, |t, out| out.fill(255.0 * t));
        let err = cmap.validate().unwrap_err();
        assert!(err.to_string().contains("outside 0..=1"), "{err}");
    }

    #[test]
    fn test_validate_rejects_nan() {
        let cmap = Colormap::from_fn("nan", 3, 1.0, |_, out| out.fill(f64::NAN));
        assert!(cmap.validate().is_err());
    }
}
