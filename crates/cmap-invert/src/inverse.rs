//! Numerical inversion of a colormap.
//!
//! The colormap is sampled once into a [`SampleTable`]; every query color is
//! matched to its nearest sample and the sample position becomes the
//! inferred value. Colors farther than `10 * xtol` from every sample are
//! masked rather than rejected.

use crate::colormap::{CmapSpec, Colormap, Registry};
use crate::error::InvertError;
use crate::field::MaskedField;
use crate::image::{check_channels, Colors};
use crate::normalize::Normalizer;
use crate::table::SampleTable;

/// Default table spacing: one sample per 8-bit level.
pub const DEFAULT_XTOL: f64 = 1.0 / 255.0;

/// Default output range of inferred values.
pub const DEFAULT_VALUE_RANGE: (f64, f64) = (0.0, 1.0);

/// Matches farther than `MASK_FACTOR * xtol` are masked.
pub const MASK_FACTOR: f64 = 10.0;

/// Largest sample table `xtol` may ask for.
pub const MAX_SAMPLES: usize = 1 << 20;

/// How matched sample positions are rescaled into the value range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueScaling {
    /// Fit the rescaling to the positions selected by the whole query.
    ///
    /// The darkest and brightest matches span the full value range. A query
    /// whose matches all land on the same sample has no spread and is
    /// rescaled as in [`ValueScaling::Domain`].
    #[default]
    Batch,
    /// Rescale from the sample domain `0.0..=1.0`, independent of the query.
    Domain,
}

/// A colormap prepared for color → value lookups.
///
/// # Example
///
/// ```
/// use cmap_invert::{InvertedColorMap, Registry, ValueScaling, DEFAULT_XTOL};
///
/// let registry = Registry::builtin();
/// let inv = InvertedColorMap::new(&registry, "gray", (0.0, 1.0), DEFAULT_XTOL)
///     .unwrap()
///     .with_value_scaling(ValueScaling::Domain);
///
/// let field = inv.values(&[[0.25, 0.25, 0.25, 1.0], [1.0, 0.0, 0.0, 1.0]]).unwrap();
/// assert!((field.get(0).unwrap() - 0.25).abs() < DEFAULT_XTOL);
/// assert!(field.is_masked(1));
/// ```
#[derive(Debug, Clone)]
pub struct InvertedColorMap {
    cmap: Colormap,
    value_range: (f64, f64),
    xtol: f64,
    table: SampleTable,
    scaling: ValueScaling,
}

impl InvertedColorMap {
    /// Resolve `spec` against `registry` and sample it.
    ///
    /// # Errors
    ///
    /// - resolution errors from [`Registry::resolve()`]
    /// - [`InvertError::Precondition`] for an unusable `xtol`
    pub fn new(
        registry: &Registry,
        spec: impl Into<CmapSpec>,
        value_range: (f64, f64),
        xtol: f64,
    ) -> Result<Self, InvertError> {
        let cmap = registry.resolve(spec)?;
        Self::sampled(cmap, value_range, xtol)
    }

    /// Invert an already constructed colormap.
    pub fn from_colormap(
        cmap: Colormap,
        value_range: (f64, f64),
        xtol: f64,
    ) -> Result<Self, InvertError> {
        cmap.validate()?;
        Self::sampled(cmap, value_range, xtol)
    }

    fn sampled(cmap: Colormap, value_range: (f64, f64), xtol: f64) -> Result<Self, InvertError> {
        let n = sample_count(xtol)?;
        let table = SampleTable::sample(&cmap, n)?;
        tracing::debug!(
            cmap = cmap.name(),
            samples = n,
            xtol,
            "Sampled colormap for inversion"
        );
        Ok(Self {
            cmap,
            value_range,
            xtol,
            table,
            scaling: ValueScaling::default(),
        })
    }

    pub fn with_value_scaling(mut self, scaling: ValueScaling) -> Self {
        self.scaling = scaling;
        self
    }

    #[inline]
    pub fn colormap(&self) -> &Colormap {
        &self.cmap
    }

    #[inline]
    pub fn table(&self) -> &SampleTable {
        &self.table
    }

    #[inline]
    pub fn xtol(&self) -> f64 {
        self.xtol
    }

    #[inline]
    pub fn value_range(&self) -> (f64, f64) {
        self.value_range
    }

    #[inline]
    pub fn value_scaling(&self) -> ValueScaling {
        self.scaling
    }

    /// Distance beyond which a match is masked.
    #[inline]
    pub fn threshold(&self) -> f64 {
        MASK_FACTOR * self.xtol
    }

    /// Forward evaluation of the underlying colormap.
    pub fn color(&self, t: f64) -> Vec<f64> {
        self.cmap.color(t)
    }

    /// Forward evaluation for many values, flat with a trailing channel axis.
    pub fn colors(&self, ts: &[f64]) -> Vec<f64> {
        self.cmap.colors(ts)
    }

    /// Infer the scalar value behind each color.
    ///
    /// Colors are compared in unit channel space over the channels both the
    /// query and the colormap have. The returned field has the query's
    /// spatial shape.
    ///
    /// # Errors
    ///
    /// - [`InvertError::Precondition`] when the query does not have 3 or 4
    ///   channels
    ///
    /// Unmatched colors are masked, never rejected.
    pub fn values<'a>(&self, colors: impl Into<Colors<'a>>) -> Result<MaskedField, InvertError> {
        let colors = colors.into();
        check_channels(colors.channels())?;
        let shape = colors.shape();
        if colors.is_empty() {
            return Ok(MaskedField::empty(shape));
        }

        let threshold = self.threshold();
        let mut indices = Vec::with_capacity(colors.len());
        let mut errors = Vec::with_capacity(colors.len());
        let mut mask = Vec::with_capacity(colors.len());
        for pixel in colors.iter() {
            let (idx, dist) = self.table.nearest(pixel);
            indices.push(idx);
            errors.push(dist);
            mask.push(!(dist <= threshold));
        }

        let x = self.table.x();
        let selected: Vec<f64> = indices.iter().map(|&i| x[i]).collect();
        let domain = || Normalizer::with_reference(0.0, 1.0, self.value_range);
        let norm = match self.scaling {
            ValueScaling::Batch => match Normalizer::fit(&selected, self.value_range) {
                Err(InvertError::DegenerateRange) => {
                    tracing::debug!("All colors matched one sample, using domain scaling");
                    domain()?
                }
                fitted => fitted?,
            },
            ValueScaling::Domain => domain()?,
        };
        let values = selected.iter().map(|&v| norm.apply(v)).collect();

        let field = MaskedField::new(values, mask, errors, indices, shape);
        tracing::debug!(
            cmap = self.cmap.name(),
            pixels = field.len(),
            masked = field.masked_count(),
            "Inverted colors"
        );
        Ok(field)
    }
}

/// Number of table samples for `xtol`: `round(1 / xtol)`, between 2 and
/// [`MAX_SAMPLES`].
fn sample_count(xtol: f64) -> Result<usize, InvertError> {
    if !xtol.is_finite() || xtol <= 0.0 {
        return Err(InvertError::Precondition(format!(
            "xtol must be finite and positive, got {xtol}"
        )));
    }
    // Subnormal xtol overflows to infinity, caught by the upper bound.
    let n = (1.0 / xtol).round();
    if n > MAX_SAMPLES as f64 {
        return Err(InvertError::Precondition(format!(
            "xtol {xtol} yields more than {MAX_SAMPLES} samples"
        )));
    }
    if n < 2.0 {
        return Err(InvertError::Precondition(format!(
            "xtol {xtol} yields fewer than 2 samples"
        )));
    }
    Ok(n as usize)
}
