//! Recoloring: invert through one colormap, re-render through another.

use crate::colormap::{CmapSpec, Colormap, Registry};
use crate::error::InvertError;
use crate::field::MaskedField;
use crate::image::Image;
use crate::inverse::{InvertedColorMap, ValueScaling, DEFAULT_VALUE_RANGE, DEFAULT_XTOL};

/// Output of [`Recolorer::recolor()`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recolored {
    /// The recolored image, same shape and channel scale as the input.
    pub image: Image,
    /// The value field recovered through the source colormap.
    pub values: MaskedField,
}

/// Recolors images from a source colormap to a target colormap.
///
/// Pixels that match the source colormap are replaced by the target color
/// of their recovered value, converted to the source's channel scale.
/// Pixels that do not match are copied through unchanged.
///
/// # Example
///
/// ```
/// use cmap_invert::{Image, Recolorer, Registry};
///
/// let registry = Registry::builtin();
/// let recolorer = Recolorer::new(&registry, "gray", "gray_r").unwrap();
///
/// let image = Image::from_rgb(2, 1, &[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]).unwrap();
/// let out = recolorer.recolor(&image).unwrap();
/// assert_eq!(out.image.pixel(0), &[1.0, 1.0, 1.0]);
/// assert_eq!(out.image.pixel(1), &[0.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Recolorer {
    source: Colormap,
    target: Colormap,
    value_range: (f64, f64),
    xtol: f64,
    scaling: ValueScaling,
}

impl Recolorer {
    /// Resolve both colormaps against `registry`.
    pub fn new(
        registry: &Registry,
        source: impl Into<CmapSpec>,
        target: impl Into<CmapSpec>,
    ) -> Result<Self, InvertError> {
        let source = registry.resolve(source)?;
        let target = registry.resolve(target)?;
        Ok(Self {
            source,
            target,
            value_range: DEFAULT_VALUE_RANGE,
            xtol: DEFAULT_XTOL,
            scaling: ValueScaling::default(),
        })
    }

    pub fn value_range(mut self, value_range: (f64, f64)) -> Self {
        self.value_range = value_range;
        self
    }

    pub fn xtol(mut self, xtol: f64) -> Self {
        self.xtol = xtol;
        self
    }

    pub fn value_scaling(mut self, scaling: ValueScaling) -> Self {
        self.scaling = scaling;
        self
    }

    #[inline]
    pub fn source(&self) -> &Colormap {
        &self.source
    }

    #[inline]
    pub fn target(&self) -> &Colormap {
        &self.target
    }

    /// Recolor `image`, returning the new image and the recovered values.
    ///
    /// The input is never modified.
    pub fn recolor(&self, image: &Image) -> Result<Recolored, InvertError> {
        let inverse =
            InvertedColorMap::from_colormap(self.source.clone(), self.value_range, self.xtol)?
                .with_value_scaling(self.scaling);
        let values = inverse.values(image)?;

        let mut out = image.clone();
        let k = image.channels().min(self.target.channels());
        let (from, to) = (self.target.scale(), self.source.scale());
        let mut color = vec![0.0; self.target.channels()];
        for (i, value) in values.iter().enumerate() {
            let Some(value) = value else { continue };
            self.target.eval_into(value, &mut color);
            for (dst, &src) in out.pixel_mut(i)[..k].iter_mut().zip(&color[..k]) {
                *dst = src / from * to;
            }
        }

        tracing::debug!(
            source = self.source.name(),
            target = self.target.name(),
            recolored = values.valid_count(),
            unchanged = values.masked_count(),
            "Recolored image"
        );
        Ok(Recolored { image: out, values })
    }
}

/// Recolor `data` from `source` to `target` with the default `xtol`.
///
/// Valid pixels take the target color of their recovered value; invalid
/// pixels keep their original values exactly.
pub fn convert_color(
    data: &Image,
    (source, target): (impl Into<CmapSpec>, impl Into<CmapSpec>),
    value_range: (f64, f64),
    registry: &Registry,
) -> Result<Image, InvertError> {
    let recolored = Recolorer::new(registry, source, target)?
        .value_range(value_range)
        .recolor(data)?;
    Ok(recolored.image)
}
